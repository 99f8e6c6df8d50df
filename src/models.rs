//! Typed views over the opaque rows the data access shim moves.
//!
//! The shim itself is a pass-through; these structs exist so the command
//! handlers can deserialize and print records without poking at raw JSON.
//! Identifiers are always externally assigned by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

use crate::store::Row;

/// Deserializes one shim row into a typed record.
pub fn from_row<T: serde::de::DeserializeOwned>(row: Row) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(row))
}

/// A lead/inquiry submitted through the public site form. Read-only from
/// the console's perspective.
///
/// The backing table predates the rest of the schema and uses camelCase
/// column names; the serde renames keep the Rust side conventional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inquiry {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "eventType", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Inquiry {
    /// The event type as shown to staff; submissions without one are
    /// generic consultations.
    pub fn event_label(&self) -> &str {
        self.event_type.as_deref().unwrap_or("General inquiry")
    }
}

/// A vlog post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vlog {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An open job posting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A promotional deal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deal {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub discount: Option<String>,
    #[serde(default)]
    pub expiration: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Platform hosting the public site's live stream embed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StreamPlatform {
    #[default]
    Youtube,
    Twitch,
    Vimeo,
}

/// The live stream embed configuration, stored as the JSON value of the
/// `stream_config` setting.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StreamConfig {
    #[serde(default)]
    pub platform: StreamPlatform,
    #[serde(rename = "channelId", default)]
    pub channel_id: String,
}

impl StreamConfig {
    /// Reads a configuration out of a stored setting value.
    ///
    /// The value may arrive as a JSON object or as a JSON-encoded string,
    /// and hand-edited rows are sometimes malformed; anything unreadable
    /// falls back to the defaults so the console stays usable.
    pub fn from_value(value: &Value) -> StreamConfig {
        match value {
            Value::String(text) => serde_json::from_str(text).unwrap_or_default(),
            other => serde_json::from_value(other.clone()).unwrap_or_default(),
        }
    }

    /// The public embed URL for this configuration.
    pub fn embed_url(&self) -> String {
        match self.platform {
            StreamPlatform::Youtube => format!(
                "https://www.youtube.com/embed/live_stream?channel={}",
                self.channel_id
            ),
            StreamPlatform::Twitch => format!("https://player.twitch.tv/?channel={}", self.channel_id),
            StreamPlatform::Vimeo => format!("https://vimeo.com/event/{}/embed", self.channel_id),
        }
    }
}

impl Display for StreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} channel {}", self.platform, self.channel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::record;
    use serde_json::json;

    #[test]
    /// Inquiries deserialize from the backend's camelCase columns, with the
    /// optional fields tolerated when absent.
    fn inquiry_deserializes_from_camel_case_row() {
        let row = record(json!({
            "id": 2,
            "name": "Jean Dupont",
            "email": "j.dupont@corporate.lu",
            "eventType": "Corporate",
            "message": "Annual gala dinner coverage needed.",
            "createdAt": "2026-08-05T09:30:00Z",
        }));
        let inquiry: Inquiry = from_row(row).unwrap();
        assert_eq!(inquiry.event_label(), "Corporate");
        assert_eq!(inquiry.phone, None);

        let bare = record(json!({
            "id": 9,
            "name": "Walk-in",
            "email": "walkin@example.com",
            "createdAt": "2026-08-05T09:30:00Z",
        }));
        let inquiry: Inquiry = from_row(bare).unwrap();
        assert_eq!(inquiry.event_label(), "General inquiry");
    }

    #[test]
    /// Stored stream config is read from an object, from a JSON-encoded
    /// string, and falls back to defaults when malformed.
    fn stream_config_tolerates_stored_shapes() {
        let object = json!({"platform": "twitch", "channelId": "weluxlive"});
        let config = StreamConfig::from_value(&object);
        assert_eq!(config.platform, StreamPlatform::Twitch);
        assert_eq!(config.channel_id, "weluxlive");

        let encoded = json!("{\"platform\":\"youtube\",\"channelId\":\"UC123\"}");
        let config = StreamConfig::from_value(&encoded);
        assert_eq!(config.channel_id, "UC123");

        // A master-code string is what demo mode hands back for any settings
        // single(); it must degrade to the defaults, not an error.
        let malformed = json!("lux_master_2026");
        assert_eq!(StreamConfig::from_value(&malformed), StreamConfig::default());
    }

    #[test]
    fn stream_platform_parses_and_displays() {
        assert_eq!("youtube".parse::<StreamPlatform>(), Ok(StreamPlatform::Youtube));
        assert_eq!("Twitch".parse::<StreamPlatform>(), Ok(StreamPlatform::Twitch));
        assert!("dailymotion".parse::<StreamPlatform>().is_err());
        assert_eq!(StreamPlatform::Vimeo.to_string(), "vimeo");
    }

    #[test]
    fn embed_url_follows_the_platform() {
        let config = StreamConfig {
            platform: StreamPlatform::Youtube,
            channel_id: "UC_x5XG1OV2P6uZZ5FSM9Ttw".to_string(),
        };
        assert_eq!(
            config.embed_url(),
            "https://www.youtube.com/embed/live_stream?channel=UC_x5XG1OV2P6uZZ5FSM9Ttw"
        );
    }
}
