use crate::domain::model::{Inspection, RateLimitInfo, UpstreamResponse};

pub const RATE_LIMIT_HEADER: &str = "X-Ratelimit-Limit";
pub const RATE_REMAINING_HEADER: &str = "X-Ratelimit-Remaining";

/// Extracts rate-limit telemetry and the payload's field names, then logs them.
///
/// Nothing here can fail: missing headers read as zero and a body that is not
/// a JSON object simply has no field names.
pub fn inspect(response: UpstreamResponse) -> Inspection {
    let rate_limit = rate_limit(&response);
    let field_names = field_names(&response.body);

    tracing::info!("APOD API rate & usage limits:");
    tracing::info!("API hourly rate limit: {}", rate_limit.limit);
    match rate_limit.remaining_percent() {
        Some(percent) => tracing::info!(
            "API usage details: {} calls made, {} calls or {:.2}% of total calls remaining.",
            rate_limit.calls_made(),
            rate_limit.remaining,
            percent
        ),
        None => tracing::info!(
            "API usage details: {} calls remaining (no limit reported).",
            rate_limit.remaining
        ),
    }
    tracing::info!("APOD API response status: {}", response.status);
    tracing::debug!("Response JSON fields (keys): {:?}", field_names);
    tracing::info!("The #fields in JSON response is: {}", field_names.len());

    Inspection {
        status: response.status,
        rate_limit,
        field_names,
        body: response.body,
    }
}

pub fn rate_limit(response: &UpstreamResponse) -> RateLimitInfo {
    RateLimitInfo {
        limit: header_as_u32(response, RATE_LIMIT_HEADER),
        remaining: header_as_u32(response, RATE_REMAINING_HEADER),
    }
}

fn header_as_u32(response: &UpstreamResponse, name: &str) -> u32 {
    response
        .header(name)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Sorted top-level keys of a JSON object body. Values of any type count.
pub fn field_names(body: &[u8]) -> Vec<String> {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => {
            let mut keys: Vec<String> = map.into_iter().map(|(key, _)| key).collect();
            keys.sort();
            keys
        }
        Ok(_) => {
            tracing::debug!("Response body is JSON but not an object, no fields to list");
            Vec::new()
        }
        Err(e) => {
            tracing::debug!("Response body is not JSON ({}), no fields to list", e);
            Vec::new()
        }
    }
}
