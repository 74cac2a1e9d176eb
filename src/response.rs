//! Response normalization.
//!
//! Adobe Sign answers with JSON for most resources and CSV for form data, and never reliably
//! labels which one it sent. [`normalize`] sniffs the body instead of trusting the declared
//! content type: JSON first, then CSV, then the raw text.

// self
use crate::_prelude::*;

/// Structured value produced from a raw response body.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedResponse {
	/// JSON object.
	Object(serde_json::Map<String, Value>),
	/// JSON array.
	Array(Vec<Value>),
	/// Bare JSON string, number, boolean, or null.
	Scalar(Value),
	/// Comma-separated rows keyed by a header row.
	Table(CsvTable),
	/// Body that is neither JSON nor CSV, returned unchanged.
	Text(String),
}
impl ParsedResponse {
	/// Returns a stable label describing the parsed shape.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Object(_) => "JSON object",
			Self::Array(_) => "JSON array",
			Self::Scalar(_) => "JSON scalar",
			Self::Table(_) => "CSV table",
			Self::Text(_) => "text",
		}
	}

	/// Returns the JSON object, if that is what was parsed.
	pub fn as_object(&self) -> Option<&serde_json::Map<String, Value>> {
		match self {
			Self::Object(map) => Some(map),
			_ => None,
		}
	}

	/// Looks up a top-level field of a JSON object response.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.as_object().and_then(|map| map.get(name))
	}

	/// Converts any JSON variant back into a [`Value`].
	pub fn into_json(self) -> Option<Value> {
		match self {
			Self::Object(map) => Some(Value::Object(map)),
			Self::Array(items) => Some(Value::Array(items)),
			Self::Scalar(value) => Some(value),
			Self::Table(_) | Self::Text(_) => None,
		}
	}

	/// Deserializes a JSON response into `T`, reporting the failing path on mismatch.
	pub fn deserialize<T>(self) -> Result<T>
	where
		T: for<'de> Deserialize<'de>,
	{
		let found = self.kind();
		let value = self
			.into_json()
			.ok_or(Error::UnexpectedResponse { expected: "JSON", found })?;

		Ok(serde_path_to_error::deserialize(value)?)
	}
}

/// CSV rows keyed by the header row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CsvTable {
	/// Column names taken from the first row.
	pub headers: Vec<String>,
	/// Data rows; each has exactly `headers.len()` fields.
	pub rows: Vec<Vec<String>>,
}
impl CsvTable {
	/// Returns the number of data rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Returns `true` when there are no data rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Returns a cell by row index and column name.
	pub fn get(&self, row: usize, column: &str) -> Option<&str> {
		let idx = self.headers.iter().position(|h| h == column)?;

		self.rows.get(row)?.get(idx).map(String::as_str)
	}

	/// Iterates rows as header-keyed maps.
	pub fn records(&self) -> impl Iterator<Item = BTreeMap<&str, &str>> + '_ {
		self.rows.iter().map(|row| {
			self.headers.iter().map(String::as_str).zip(row.iter().map(String::as_str)).collect()
		})
	}
}

/// Normalizes a raw response body; JSON wins over CSV, and CSV wins over raw text.
pub fn normalize(raw: &str) -> ParsedResponse {
	if let Ok(value) = serde_json::from_str::<Value>(raw) {
		return match value {
			Value::Object(map) => ParsedResponse::Object(map),
			Value::Array(items) => ParsedResponse::Array(items),
			scalar => ParsedResponse::Scalar(scalar),
		};
	}
	if let Some(table) = parse_csv(raw) {
		return ParsedResponse::Table(table);
	}

	ParsedResponse::Text(raw.to_owned())
}

/// Accepts only rectangular CSV with at least two header columns, so prose that happens to
/// contain a comma is left as text.
///
/// A terminated header line without data rows is an empty table, which is how form data looks
/// before anyone has signed; an unterminated single line stays text.
fn parse_csv(raw: &str) -> Option<CsvTable> {
	let mut reader = csv::ReaderBuilder::new()
		.has_headers(true)
		.flexible(false)
		.trim(csv::Trim::None)
		.from_reader(raw.as_bytes());
	let headers =
		reader.headers().ok()?.iter().map(str::to_owned).collect::<Vec<_>>();

	if headers.len() < 2 {
		return None;
	}

	let mut rows = Vec::new();

	for record in reader.records() {
		rows.push(record.ok()?.iter().map(str::to_owned).collect::<Vec<_>>());
	}

	if rows.is_empty() && !raw.ends_with('\n') {
		return None;
	}

	Some(CsvTable { headers, rows })
}

/// Serde helper for payloads that hold either a bare record or a list of records.
///
/// Some list endpoints collapse a single-element list into the element itself; converting
/// through this type always yields a `Vec`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
	/// List form.
	Many(Vec<T>),
	/// Collapsed single-record form.
	One(T),
}
impl<T> OneOrMany<T> {
	/// Coerces either form into a list.
	pub fn into_vec(self) -> Vec<T> {
		match self {
			Self::Many(items) => items,
			Self::One(item) => vec![item],
		}
	}
}
impl<T> Default for OneOrMany<T> {
	fn default() -> Self {
		Self::Many(Vec::new())
	}
}
impl<T> From<OneOrMany<T>> for Vec<T> {
	fn from(value: OneOrMany<T>) -> Self {
		value.into_vec()
	}
}
