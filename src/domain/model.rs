use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Public low-quota key documented by api.nasa.gov.
pub const DEMO_KEY: &str = "DEMO_KEY";

/// API key sent to the upstream. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn demo() -> Self {
        Self(DEMO_KEY.to_string())
    }

    pub fn is_demo(&self) -> bool {
        self.0 == DEMO_KEY
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_demo() {
            f.write_str("Credential(DEMO_KEY)")
        } else {
            f.write_str("Credential(***)")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    pub credential: Credential,
    pub date: String,
    pub high_definition: bool,
}

#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    /// Header names are lower-cased.
    pub headers: HashMap<String, Vec<String>>,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RateLimitInfo {
    pub limit: u32,
    pub remaining: u32,
}

impl RateLimitInfo {
    pub fn calls_made(&self) -> u32 {
        self.limit.saturating_sub(self.remaining)
    }

    pub fn remaining_percent(&self) -> Option<f64> {
        if self.limit == 0 {
            None
        } else {
            Some(f64::from(self.remaining) / f64::from(self.limit) * 100.0)
        }
    }
}

/// What the inspector learned from one upstream response.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub status: u16,
    pub rate_limit: RateLimitInfo,
    pub field_names: Vec<String>,
    pub body: Bytes,
}

impl Inspection {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One Astronomy Picture of the Day entry.
///
/// `copyright`, `hdurl` and `service_version` are not present in every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApodRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    pub date: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_version: Option<String>,
    pub title: String,
    pub url: String,
}

impl ApodRecord {
    pub fn is_video(&self) -> bool {
        self.media_type.eq_ignore_ascii_case("video")
    }
}

/// A decoded record together with the telemetry gathered while fetching it.
#[derive(Debug, Clone)]
pub struct Retrieval {
    pub record: ApodRecord,
    pub rate_limit: RateLimitInfo,
    pub field_names: Vec<String>,
}
