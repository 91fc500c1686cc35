//! [`Timestamp`] is the wire representation of every date-time field.

use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    core::{Strictness, Validate},
    errors::Error,
};

/// An instant in time, serialized as RFC 3339 with millisecond precision.
///
/// Any offset is accepted on input; output is always normalized to UTC (`Z`).
///
/// ```
/// use dodopayments_kit::types::Timestamp;
///
/// let ts: Timestamp = serde_json::from_value(serde_json::json!("2019-12-27T18:11:19.117+02:00")).unwrap();
/// assert_eq!(
///     serde_json::to_value(&ts).unwrap(),
///     serde_json::json!("2019-12-27T16:11:19.117Z")
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Timestamp(Utc::now())
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Timestamp(value)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Timestamp(dt.with_timezone(&Utc)))
            .map_err(|err| Error::invalid_data(format!("{s:?} is not an RFC 3339 timestamp: {err}")))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Validate for Timestamp {
    fn check(&self, _strictness: Strictness) -> crate::errors::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_with_millis_and_utc() {
        let ts = Timestamp(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
        assert_eq!(
            serde_json::to_value(ts).unwrap(),
            json!("2024-01-15T10:30:00.000Z")
        );
    }

    #[test]
    fn round_trips_to_the_same_instant() {
        let ts: Timestamp = serde_json::from_value(json!("2019-12-27T18:11:19.117Z")).unwrap();
        let again: Timestamp = serde_json::from_value(serde_json::to_value(ts).unwrap()).unwrap();
        assert_eq!(ts, again);
        assert_eq!(ts.to_string(), "2019-12-27T18:11:19.117Z");
    }

    #[test]
    fn rejects_non_rfc3339() {
        assert!("2019-12-27".parse::<Timestamp>().is_err());
        assert!(serde_json::from_value::<Timestamp>(json!(1577470279)).is_err());
    }
}
