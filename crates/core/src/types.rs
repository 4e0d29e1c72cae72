use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{de, Deserialize, Deserializer};

/// Server-assigned entity identifier.
///
/// The API hands out opaque ids; numeric ids are accepted and stringified.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse a timestamp the way the API writes them.
///
/// RFC 3339 first; values without an offset (`2024-03-01T10:00:00.1234567`)
/// and bare dates are read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, chrono::ParseError> {
    let raw = raw.trim();
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .or_else(|err| {
            raw.parse::<NaiveDateTime>()
                .or_else(|_| raw.parse::<NaiveDate>().map(|d| d.and_time(NaiveTime::MIN)))
                .map(|naive| naive.and_utc())
                .map_err(|_| err)
        })
}

/// Deserialize an optional timestamp, tolerating a missing offset.
///
/// `null` and blank strings read as `None`.
pub fn deserialize_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse_timestamp(&raw)
            .map(Some)
            .map_err(|err| de::Error::custom(format!("invalid timestamp {raw:?}: {err}"))),
        _ => Ok(None),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for EntityId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Deserialize an id that may arrive as a JSON string or number.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<EntityId, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(EntityId::from)
}

/// Optional variant of [`deserialize_id`] for foreign references.
pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(EntityId::from))
}

/// Deserialize a list of ids, tolerating `null`.
pub fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawId>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(EntityId::from)
        .collect())
}
