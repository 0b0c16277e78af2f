use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::{ParseFilterError, TimestampError};

/// ISO-8601 instant as received on the wire.
///
/// Equality and hashing use the raw string, so two spellings of the same
/// instant are distinct keys. Ordering is always done on [`Timestamp::instant`].
#[derive(Debug, Clone)]
pub struct Timestamp {
    raw: String,
    instant: DateTime<Utc>,
}

impl Timestamp {
    pub fn parse(raw: impl Into<String>) -> Result<Self, TimestampError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(TimestampError::Empty);
        }

        let instant = DateTime::parse_from_rfc3339(&raw)
            .map_err(|source| TimestampError::Invalid {
                value: raw.clone(),
                source,
            })?
            .with_timezone(&Utc);

        Ok(Self { raw, instant })
    }

    /// Builds a timestamp in the `YYYY-MM-DDTHH:MM:SS.mmmZ` form the metrics API emits.
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        let instant = instant.trunc_subsecs(3);
        Self {
            raw: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            instant,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::from_instant(instant)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(raw).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Us,
    Eu,
    Latam,
    Apac,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Us, Region::Eu, Region::Latam, Region::Apac];

    pub fn code(self) -> &'static str {
        match self {
            Region::Us => "US",
            Region::Eu => "EU",
            Region::Latam => "LATAM",
            Region::Apac => "APAC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Region::Us => "United States",
            Region::Eu => "Europe",
            Region::Latam => "Latin America",
            Region::Apac => "Asia-Pacific",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFilterError::Region(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionBreakdown {
    #[serde(rename = "US")]
    pub us: u64,
    #[serde(rename = "EU")]
    pub eu: u64,
    #[serde(rename = "LATAM")]
    pub latam: u64,
    #[serde(rename = "APAC")]
    pub apac: u64,
}

impl RegionBreakdown {
    pub fn get(&self, region: Region) -> u64 {
        match region {
            Region::Us => self.us,
            Region::Eu => self.eu,
            Region::Latam => self.latam,
            Region::Apac => self.apac,
        }
    }

    pub fn total(&self) -> u64 {
        Region::ALL
            .into_iter()
            .fold(0u64, |acc, region| acc.saturating_add(self.get(region)))
    }
}

/// One metrics observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub timestamp: Timestamp,
    pub active_users: u64,
    pub new_users: u64,
    pub revenue: f64,
    pub churn_rate: f64,
    pub by_region: RegionBreakdown,
}

impl Snapshot {
    /// Checks the numeric ranges that serde alone cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if !self.revenue.is_finite() || self.revenue < 0.0 {
            return Err(format!(
                "sample {} has invalid revenue {}",
                self.timestamp, self.revenue
            ));
        }
        if !self.churn_rate.is_finite() || !(0.0..=1.0).contains(&self.churn_rate) {
            return Err(format!(
                "sample {} has churn rate {} outside [0, 1]",
                self.timestamp, self.churn_rate
            ));
        }
        Ok(())
    }
}
