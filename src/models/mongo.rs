//! MongoDB extended-JSON values as the makechat API emits them.
//!
//! The API serializes documents with `bson.json_util`, so ids may arrive as
//! `{"$oid": "..."}` and timestamps as `{"$date": ...}`.

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Server-assigned document id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ResourceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ResourceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Plain(String),
            Number(i64),
            Oid {
                #[serde(rename = "$oid")]
                oid: String,
            },
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Plain(id) | Wire::Oid { oid: id } => ResourceId(id),
            Wire::Number(n) => ResourceId(n.to_string()),
        })
    }
}

/// A `{"$date": ...}` timestamp, normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MongoDate(DateTime<Utc>);

impl MongoDate {
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(MongoDate)
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Format with a strftime pattern. Returns `None` when the pattern is
    /// not a valid strftime string.
    pub fn format(&self, pattern: &str) -> Option<String> {
        let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return None;
        }
        Some(self.0.format_with_items(items.into_iter()).to_string())
    }
}

impl From<DateTime<Utc>> for MongoDate {
    fn from(dt: DateTime<Utc>) -> Self {
        MongoDate(dt)
    }
}

impl<'de> Deserialize<'de> for MongoDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Inner {
            Millis(i64),
            Iso(String),
            Long {
                #[serde(rename = "$numberLong")]
                value: String,
            },
        }

        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(rename = "$date")]
            date: Inner,
        }

        let millis = match Wrapper::deserialize(deserializer)?.date {
            Inner::Millis(ms) => ms,
            Inner::Long { value } => value
                .parse::<i64>()
                .map_err(|_| D::Error::custom(format!("invalid $numberLong '{value}'")))?,
            Inner::Iso(text) => {
                return DateTime::parse_from_rfc3339(&text)
                    .map(|dt| MongoDate(dt.with_timezone(&Utc)))
                    .map_err(|e| D::Error::custom(format!("invalid $date '{text}': {e}")));
            }
        };
        MongoDate::from_millis(millis)
            .ok_or_else(|| D::Error::custom(format!("$date out of range: {millis}")))
    }
}
