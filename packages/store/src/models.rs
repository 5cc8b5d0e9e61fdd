//! # Domain records persisted by the portal
//!
//! Every record is `Serialize + Deserialize` and stored as JSON in browser
//! storage. Field names on the wire follow the keys used by the earlier
//! static attendee pages (`user`, `eventCode`, `name`, ...), so existing data stays
//! readable.
//!
//! | Type | Lifetime | Storage |
//! |------|----------|---------|
//! | [`Session`] | one tab | ephemeral fields, optional durable mirror |
//! | [`EntryPass`] | until re-issued | durable, one per email |
//! | [`Announcement`] | until deleted by a volunteer | durable collection |
//! | [`ChatMessage`] | append-only | durable collection |
//! | [`EmergencyRequest`] | until responded to or page reload | page memory only |
//! | [`ThemePreference`] | indefinitely | durable |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to parse one of the string-backed enums in this module.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Role of the logged-in identity. Volunteers may post/delete announcements,
/// scan entry passes and respond to emergencies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Volunteer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Volunteer => "volunteer",
        }
    }

    /// Capitalised label used in greetings.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Volunteer => "Volunteer",
        }
    }

    pub fn is_volunteer(self) -> bool {
        self == Role::Volunteer
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "volunteer" => Ok(Role::Volunteer),
            other => Err(ParseError::new("role", other)),
        }
    }
}

/// The active logged-in identity for the current tab.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub logged_in: bool,
}

impl Session {
    /// First letter of the display name, uppercased, for avatars.
    pub fn initial(&self) -> String {
        self.display_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Profile recorded at signup. Never contains the password.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

/// An issued entry pass, keyed in storage by `email`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPass {
    #[serde(rename = "user")]
    pub email: String,
    pub name: String,
    pub event_code: String,
    #[serde(rename = "timestamp")]
    pub issued_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    Important,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Normal, Priority::Important, Priority::Urgent];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::Important => "important",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Priority::Normal),
            "important" => Ok(Priority::Important),
            "urgent" => Ok(Priority::Urgent),
            other => Err(ParseError::new("priority", other)),
        }
    }
}

/// Filter applied to the announcement board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub const ALL: [PriorityFilter; 4] = [
        PriorityFilter::All,
        PriorityFilter::Only(Priority::Normal),
        PriorityFilter::Only(Priority::Important),
        PriorityFilter::Only(Priority::Urgent),
    ];

    pub fn matches(self, announcement: &Announcement) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(p) => announcement.priority == p,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriorityFilter::All => "all",
            PriorityFilter::Only(p) => p.as_str(),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(PriorityFilter::All);
        }
        s.parse::<Priority>()
            .map(PriorityFilter::Only)
            .map_err(|_| ParseError::new("filter", s))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub priority: Priority,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
}

/// A lost-and-found chat entry. `image` holds an inline `data:` URL.
///
/// Logs written by the earlier static attendee pages carry only a
/// preformatted `time` label (`"10:30"`) and no `timestamp`; both are
/// optional so those entries still load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "name")]
    pub sender: String,
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl ChatMessage {
    /// `HH:MM` in the viewer's timezone, or the stored label for old entries.
    pub fn time_label<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        match (&self.timestamp, &self.time) {
            (Some(ts), _) => ts.with_timezone(tz).format("%H:%M").to_string(),
            (None, Some(label)) => label.clone(),
            (None, None) => String::new(),
        }
    }

    pub fn sender_initial(&self) -> String {
        self.sender
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// An SOS raised from an attendee's device. Held in page memory only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRequest {
    pub id: String,
    pub user_name: String,
    pub location: GeoPoint,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

impl FromStr for ThemePreference {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(ParseError::new("theme", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_pass_wire_names() {
        let pass = EntryPass {
            email: "a@b.co".to_string(),
            name: "a".to_string(),
            event_code: "123456".to_string(),
            issued_at: DateTime::from_timestamp(0, 0).unwrap(),
        };
        let json = serde_json::to_value(&pass).unwrap();
        assert_eq!(json["user"], "a@b.co");
        assert_eq!(json["eventCode"], "123456");
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_chat_message_without_image_field() {
        let raw = r#"{"name":"Ana","text":"Lost my badge","timestamp":"2025-01-01T10:00:00Z"}"#;
        let msg: ChatMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.sender, "Ana");
        assert!(msg.image.is_none());
        assert_eq!(msg.sender_initial(), "A");
        assert_eq!(msg.time_label(&Utc), "10:00");
    }

    #[test]
    fn test_chat_message_with_legacy_time_label() {
        let raw = r#"[{"name":"Ana","text":"Lost my badge","time":"10:30","image":null}]"#;
        let msgs: Vec<ChatMessage> = serde_json::from_str(raw).unwrap();
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].timestamp.is_none());
        assert_eq!(msgs[0].time_label(&Utc), "10:30");

        // Re-serialising keeps the label and does not invent a timestamp.
        let json = serde_json::to_value(&msgs[0]).unwrap();
        assert_eq!(json["time"], "10:30");
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<PriorityFilter>().unwrap(), PriorityFilter::All);
        assert_eq!(
            "urgent".parse::<PriorityFilter>().unwrap(),
            PriorityFilter::Only(Priority::Urgent)
        );
        assert!("loud".parse::<PriorityFilter>().is_err());
    }

    #[test]
    fn test_geo_point_display() {
        assert_eq!(GeoPoint::new(19.076, 72.8777).to_string(), "19.076000, 72.877700");
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(ThemePreference::Light.toggled(), ThemePreference::Dark);
        assert_eq!(ThemePreference::default().toggled().toggled(), ThemePreference::Light);
    }
}
