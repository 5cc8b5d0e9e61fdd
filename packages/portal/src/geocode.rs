//! Reverse geocoding over HTTP.
//!
//! Understands two response shapes: Nominatim (`display_name`) and OpenCage
//! (`results[0].formatted`). Any other shape reads as "no result".

use reqwest::Client;
use serde_json::Value;
use store::{EmergencyConfig, GeoPoint};

use crate::capability::Geocoder;
use crate::error::GeocodeError;

#[derive(Clone, Debug)]
pub struct HttpGeocoder {
    client: Client,
    url_template: String,
}

impl HttpGeocoder {
    /// `url_template` may contain `{lat}` and `{lng}`.
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url_template: url_template.into(),
        }
    }

    pub fn from_config(config: &EmergencyConfig) -> Self {
        Self::new(config.geocode_url.clone())
    }

    pub fn url_for(&self, point: GeoPoint) -> String {
        self.url_template
            .replace("{lat}", &point.lat.to_string())
            .replace("{lng}", &point.lng.to_string())
    }
}

pub fn address_from_response(body: &Value) -> Option<String> {
    let address = body
        .get("display_name")
        .and_then(Value::as_str)
        .or_else(|| body.pointer("/results/0/formatted").and_then(Value::as_str))?;
    let address = address.trim();
    (!address.is_empty()).then(|| address.to_string())
}

impl Geocoder for HttpGeocoder {
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<String, GeocodeError> {
        let body: Value = self
            .client
            .get(self.url_for(point))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| GeocodeError::Request(e.to_string()))?
            .json()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        address_from_response(&body).ok_or(GeocodeError::NoResult)
    }
}
