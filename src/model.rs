// src/model.rs
//! Crawl data as it travels between the crawl service, the store and the renderer.
//!
//! Field names on the wire are the crawl service's Korean column keys. Numeric
//! columns stay loosely typed: a failed entry carries `"N/A"` where a number
//! would be, and the renderer has to show it as-is.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::config::consts::{LEAGUE_1, LEAGUE_2};

/* ---------------- League ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum League {
    First,
    Second,
}

impl League {
    /// Display order.
    pub const ALL: [League; 2] = [League::First, League::Second];

    pub fn label(self) -> &'static str {
        match self {
            League::First => LEAGUE_1,
            League::Second => LEAGUE_2,
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            LEAGUE_1 => Some(League::First),
            LEAGUE_2 => Some(League::Second),
            _ => None,
        }
    }

    /// Element id prefix on the results page (`league1Table`, `league1_summary_message`).
    pub fn slug(self) -> &'static str {
        match self {
            League::First => "league1",
            League::Second => "league2",
        }
    }
}

/* ---------------- Records ---------------- */

/// Text column: `None` = key absent, `Some(None)` = key present as `null`.
pub type Text = Option<Option<String>>;

/// Wrap a value for a [`Text`] field.
pub fn text(s: impl Into<String>) -> Text {
    Some(Some(s.into()))
}

fn text_ref(field: &Text) -> Option<&str> {
    field.as_ref().and_then(|v| v.as_deref())
}

/// One row of crawl output.
///
/// Keys the model does not name (`player_id`, `주석`, ...) land in `extra`
/// so that a read/write cycle through the store loses nothing. Explicit
/// `null`s are kept apart from absent keys for the same reason.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlRecord {
    #[serde(rename = "리그명", default, deserialize_with = "present_text", skip_serializing_if = "Option::is_none")]
    pub league: Text,

    #[serde(rename = "구단주명", default, deserialize_with = "present_text", skip_serializing_if = "Option::is_none")]
    pub owner_name: Text,

    #[serde(rename = "판수", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub games_played: Option<Value>,

    #[serde(rename = "승", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub wins: Option<Value>,

    #[serde(rename = "무", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub draws: Option<Value>,

    #[serde(rename = "패", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub losses: Option<Value>,

    #[serde(rename = "채굴 효율", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub efficiency_score: Option<Value>,

    #[serde(rename = "승률", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<Value>,

    #[serde(rename = "URL", default, deserialize_with = "present_text", skip_serializing_if = "Option::is_none")]
    pub source_url: Text,

    #[serde(rename = "비고", default, deserialize_with = "present_text", skip_serializing_if = "Option::is_none")]
    pub remark: Text,

    #[serde(default, deserialize_with = "present_text", skip_serializing_if = "Option::is_none")]
    pub error: Text,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// A key that is present keeps its value, `null` included.
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(d).map(Some)
}

fn present_text<'de, D: Deserializer<'de>>(d: D) -> Result<Text, D::Error> {
    Option::<String>::deserialize(d).map(Some)
}

impl CrawlRecord {
    pub fn league(&self) -> Option<League> {
        self.league_label().and_then(League::from_label)
    }

    pub fn league_label(&self) -> Option<&str> {
        text_ref(&self.league)
    }

    /// Owner as shown: absent, `null` and empty all read as `None`.
    pub fn owner(&self) -> Option<&str> {
        text_ref(&self.owner_name).filter(|o| !o.is_empty())
    }

    /// Non-empty error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        text_ref(&self.error).filter(|e| !e.is_empty())
    }

    /// Failed iff the crawler attached a non-empty error message.
    pub fn is_failed(&self) -> bool {
        self.error_message().is_some()
    }

    /// Ranking key. Only JSON numbers count; `"N/A"` and friends are `None`.
    pub fn efficiency(&self) -> Option<f64> {
        self.efficiency_score.as_ref().and_then(Value::as_f64)
    }

    /// Remark as shown in the table: absent or empty becomes the no-change marker.
    pub fn remark_text(&self) -> &str {
        match text_ref(&self.remark) {
            Some(r) if !r.is_empty() => r,
            _ => crate::ranking::NO_CHANGE_MARKER,
        }
    }

    pub fn url(&self) -> Option<&str> {
        text_ref(&self.source_url).filter(|u| !u.is_empty())
    }
}

/// Render a loosely typed cell the way a browser prints a JSON scalar.
/// Absent and `null` cells print as `N/A`.
pub fn display_value(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => s!("N/A"),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/* ---------------- Batch ---------------- */

/// One complete snapshot: every record of one crawl plus its timestamp.
/// This is also the on-disk display-data format written by the crawl service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlBatch {
    #[serde(default)]
    pub results: Vec<CrawlRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl CrawlBatch {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| !r.is_failed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/* ---------------- Crawl endpoint response ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponseStatus {
    Success,
    Warning,
    Other(String),
}

impl ResponseStatus {
    /// `success` and `warning` both carry a batch worth keeping.
    pub fn is_accepted(&self) -> bool {
        matches!(self, ResponseStatus::Success | ResponseStatus::Warning)
    }
}

impl From<String> for ResponseStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => ResponseStatus::Success,
            "warning" => ResponseStatus::Warning,
            _ => ResponseStatus::Other(s),
        }
    }
}

impl From<ResponseStatus> for String {
    fn from(s: ResponseStatus) -> Self {
        match s {
            ResponseStatus::Success => s!("success"),
            ResponseStatus::Warning => s!("warning"),
            ResponseStatus::Other(other) => other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrawlResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<CrawlRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}
