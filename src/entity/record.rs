use chrono::{DateTime, NaiveDate, Utc};

/// A single column value as seen by listing filters and sorts.
///
/// `Null` is declared last so it orders after every value, which matches
/// PostgreSQL's default `NULLS LAST` for ascending sorts.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub enum ColumnValue {
    Int(i64),
    Bool(bool),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Null,
}

impl ColumnValue {
    /// Text form used for pattern matching, mirroring a `::text` cast.
    pub fn as_text(&self) -> Option<String> {
        match self {
            ColumnValue::Int(v) => Some(v.to_string()),
            ColumnValue::Bool(v) => Some(v.to_string()),
            ColumnValue::Text(v) => Some(v.clone()),
            ColumnValue::Date(v) => Some(v.format("%Y-%m-%d").to_string()),
            ColumnValue::Timestamp(v) => Some(timestamptz_text(v)),
            ColumnValue::Null => None,
        }
    }
}

/// `timestamptz::text` as PostgreSQL renders it in a UTC session: microsecond
/// precision with trailing zeros dropped, offset in hours.
fn timestamptz_text(value: &DateTime<Utc>) -> String {
    let mut text = value.format("%Y-%m-%d %H:%M:%S").to_string();
    let micros = value.timestamp_subsec_micros();
    if micros > 0 {
        text.push('.');
        text.push_str(format!("{micros:06}").trim_end_matches('0'));
    }
    text.push_str("+00");
    text
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Int(value)
    }
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        ColumnValue::Bool(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::Text(value.to_string())
    }
}

impl From<NaiveDate> for ColumnValue {
    fn from(value: NaiveDate) -> Self {
        ColumnValue::Date(value)
    }
}

impl From<DateTime<Utc>> for ColumnValue {
    fn from(value: DateTime<Utc>) -> Self {
        ColumnValue::Timestamp(value)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ColumnValue::Null)
    }
}

/// A listable record type. `COLUMNS` is the allow-list that filter and sort
/// column names are checked against; only these names ever reach SQL.
pub trait Record: Clone + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i64;

    /// Value of an allow-listed column, `Null` for any other name.
    fn column(&self, name: &str) -> ColumnValue;
}
