//! Web form widgets and the agreements signed through them.

// self
use crate::{_prelude::*, client::Client, http::Transport, resource::Agreement};

/// Widget payload as returned by `GET /widgets` and `GET /widgets/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRecord {
	/// Widget identifier.
	pub widget_id: String,
	/// Embed snippet.
	#[serde(default)]
	pub javascript: Option<String>,
	/// Last modification timestamp as sent by the API.
	#[serde(default)]
	pub modified_date: Option<String>,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Lifecycle status (e.g. `ACTIVE`).
	#[serde(default)]
	pub status: Option<String>,
	/// Hosted widget URL.
	#[serde(default)]
	pub url: Option<String>,
	/// Audit events.
	#[serde(default)]
	pub events: Option<Value>,
	/// Latest version identifier.
	#[serde(default)]
	pub latest_version_id: Option<String>,
	/// Participant sets.
	#[serde(default)]
	pub participant_set_infos: Option<Value>,
}

/// Widget bound to a client, with lazily fetched agreements.
pub struct Widget<C>
where
	C: ?Sized + Transport,
{
	client: Client<C>,
	record: WidgetRecord,
	agreements: OnceCell<Vec<Agreement<C>>>,
}
impl<C> Widget<C>
where
	C: ?Sized + Transport,
{
	pub(crate) fn new(client: Client<C>, record: WidgetRecord) -> Self {
		Self { client, record, agreements: OnceCell::new() }
	}

	/// Widget identifier.
	pub fn id(&self) -> &str {
		&self.record.widget_id
	}

	/// Underlying record.
	pub fn record(&self) -> &WidgetRecord {
		&self.record
	}

	/// Agreements created through this widget; fetched once.
	pub async fn agreements(&self) -> Result<&[Agreement<C>]> {
		self.agreements
			.get_or_try_init(|| self.client.widget_agreements(&self.record.widget_id))
			.await
			.map(Vec::as_slice)
	}
}
impl<C> Debug for Widget<C>
where
	C: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Widget")
			.field("record", &self.record)
			.field("agreements_loaded", &self.agreements.is_initialized())
			.finish()
	}
}
