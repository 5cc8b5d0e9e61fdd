//! # Portal configuration (`portal.toml`)
//!
//! Every tunable of the attendee portal lives in one TOML document that the
//! web binary embeds at build time. All sections default, so a missing or
//! empty file is equivalent to the built-in configuration.
//!
//! ```toml
//! [auth]
//! login_min_password = 4
//! signup_min_password = 6
//! access_code = "VOL-SECRET-2025"
//! volunteers = [{ email = "volunteer1@example.com", password = "vol123" }]
//!
//! [entry]
//! scan_delay_secs = 5
//! qr_size = 140
//!
//! [emergency]
//! default_center = { lat = 19.076, lng = 72.8777 }
//! default_zoom = 13
//! focus_zoom = 16
//!
//! [toast]
//! duration_ms = 3000
//! ```
//!
//! The volunteer allow-list and access code are compared in plaintext on the
//! client. They gate what the UI shows and are not a security boundary.

use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub entry: EntryConfig,
    #[serde(default)]
    pub emergency: EmergencyConfig,
    #[serde(default)]
    pub toast: ToastConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerAccount {
    pub email: String,
    pub password: String,
}

impl VolunteerAccount {
    fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub login_min_password: usize,
    pub signup_min_password: usize,
    pub signup_min_name: usize,
    pub access_code: String,
    pub volunteers: Vec<VolunteerAccount>,
    /// Mirror the session into durable storage so new tabs stay logged in.
    pub mirror_session: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_min_password: 4,
            signup_min_password: 6,
            signup_min_name: 2,
            access_code: "VOL-SECRET-2025".to_string(),
            volunteers: vec![
                VolunteerAccount::new("volunteer1@example.com", "vol123"),
                VolunteerAccount::new("volunteer2@example.com", "vol456"),
            ],
            mirror_session: true,
        }
    }
}

impl AuthConfig {
    /// The allow-list entry matching both email and password exactly.
    pub fn volunteer(&self, email: &str, password: &str) -> Option<&VolunteerAccount> {
        self.volunteers
            .iter()
            .find(|acc| acc.email == email && acc.password == password)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    /// How long the camera observes before decoding.
    pub scan_delay_secs: u64,
    pub qr_size: u32,
    pub qr_dark: String,
    pub qr_light: String,
    /// When set, only passes for this event code verify.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_code: Option<String>,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            scan_delay_secs: 5,
            qr_size: 140,
            qr_dark: "#000000".to_string(),
            qr_light: "#ffffff".to_string(),
            event_code: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyConfig {
    pub default_center: GeoPoint,
    pub default_zoom: u8,
    pub focus_zoom: u8,
    /// Reverse-geocoding URL with `{lat}` and `{lng}` placeholders.
    pub geocode_url: String,
    pub tile_url: String,
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self {
            default_center: GeoPoint::new(19.0760, 72.8777),
            default_zoom: 13,
            focus_zoom: 16,
            geocode_url:
                "https://nominatim.openstreetmap.org/reverse?format=jsonv2&lat={lat}&lon={lng}"
                    .to_string(),
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self { duration_ms: 3000 }
    }
}

impl PortalConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "portal.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = PortalConfig::from_toml("").unwrap();
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.auth.login_min_password, 4);
        assert_eq!(config.entry.scan_delay_secs, 5);
        assert_eq!(config.emergency.default_center, GeoPoint::new(19.0760, 72.8777));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = PortalConfig::from_toml(
            r#"
            [entry]
            event_code = "424242"

            [auth]
            access_code = "LET-ME-IN"
            volunteers = [{ email = "lead@example.com", password = "lead1234" }]
            "#,
        )
        .unwrap();

        assert_eq!(config.entry.event_code.as_deref(), Some("424242"));
        assert_eq!(config.entry.qr_size, 140);
        assert_eq!(config.auth.access_code, "LET-ME-IN");
        assert_eq!(config.auth.signup_min_password, 6);
        assert!(config.auth.volunteer("lead@example.com", "lead1234").is_some());
        assert!(config.auth.volunteer("volunteer1@example.com", "vol123").is_none());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = PortalConfig::default();
        config.toast.duration_ms = 1500;
        let text = config.to_toml().unwrap();
        assert_eq!(PortalConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(PortalConfig::from_toml("[auth\nlogin_min_password = ").is_err());
    }
}
