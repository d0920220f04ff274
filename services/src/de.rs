use serde::{
    de::DeserializeOwned,
    Deserialize,
};
use serde_json::Value;
use time::{
    format_description::{
        well_known::Rfc3339,
        FormatItem,
    },
    macros::format_description,
    Date,
    OffsetDateTime,
    PrimitiveDateTime,
    UtcOffset,
};
use tracing::warn;


/// Parses the timestamp formats found in history dumps into a naive UTC wall-clock time
///
/// RFC 3339 values are shifted to UTC before the offset is dropped.
pub fn parse_datetime(val: &str) -> Option<PrimitiveDateTime> {
    const FMTS_DT: &[&[FormatItem]] = &[
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]"),
    ];
    const FMTS_DATE: &[&[FormatItem]] = &[format_description!("[year]-[month]-[day]")];

    let val = val.trim();
    OffsetDateTime::parse(val, &Rfc3339)
        .map(|dt| dt.to_offset(UtcOffset::UTC))
        .map(|dt| PrimitiveDateTime::new(dt.date(), dt.time()))
        .ok()
        .or_else(|| FMTS_DT.iter().find_map(|fmt| PrimitiveDateTime::parse(val, fmt).ok()))
        .or_else(|| {
            FMTS_DATE
                .iter()
                .find_map(|fmt| Date::parse(val, fmt).ok())
                .map(Date::midnight)
        })
}

/// Like [`parse_datetime`], but any missing, non-string or unparseable value becomes `None`
pub fn lenient_datetime<'de, D>(de: D) -> Result<Option<PrimitiveDateTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::String(s)) => parse_datetime(&s),
        _ => None,
    })
}

/// Accepts any non-negative JSON number of milliseconds, rounding fractions
///
/// Missing, negative, non-finite or non-numeric values become `None`.
pub fn lenient_ms<'de, D>(de: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|ms| ms.is_finite() && *ms >= 0.0)
                .map(|ms| ms.round() as u64)
        }),
        _ => None,
    })
}

/// Deserializes the records of one history file
///
/// A lone object counts as a single record. Array elements that don't fit `T` are logged and
/// skipped. Returns `None` if `value` is neither an object nor an array.
pub fn records_skip_errors<T: DeserializeOwned>(value: Value) -> Option<Vec<T>> {
    let items = match value {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        _ => return None,
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match T::deserialize(item) {
            Ok(rec) => records.push(rec),
            Err(e) => warn!(index = idx, "Skipping unreadable record: {e:#}"),
        }
    }
    Some(records)
}
