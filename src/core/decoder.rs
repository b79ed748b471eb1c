use crate::domain::model::ApodRecord;
use crate::utils::error::Result;

/// Decodes an APOD payload. Required fields must be present and be strings.
pub fn decode(body: &[u8]) -> Result<ApodRecord> {
    let record: ApodRecord = serde_json::from_slice(body)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ExplorerError;

    const MINIMAL: &str = r#"{"date":"2020-07-04","explanation":"E","media_type":"image","title":"T","url":"http://x"}"#;

    #[test]
    fn test_decode_minimal_record() {
        let record = decode(MINIMAL.as_bytes()).unwrap();

        assert_eq!(record.date, "2020-07-04");
        assert_eq!(record.explanation, "E");
        assert_eq!(record.media_type, "image");
        assert_eq!(record.title, "T");
        assert_eq!(record.url, "http://x");
        assert_eq!(record.copyright, None);
        assert_eq!(record.hdurl, None);
        assert_eq!(record.service_version, None);
    }

    #[test]
    fn test_decode_full_record() {
        let body = serde_json::json!({
            "copyright": "Jane Doe",
            "date": "1995-06-16",
            "explanation": "Today's Picture",
            "hdurl": "https://apod.nasa.gov/apod/image/e_lens.gif",
            "media_type": "image",
            "service_version": "v1",
            "title": "Neutron Star Earth",
            "url": "https://apod.nasa.gov/apod/image/e_lens.gif",
            "extra": 42
        });

        let record = decode(body.to_string().as_bytes()).unwrap();
        assert_eq!(record.copyright.as_deref(), Some("Jane Doe"));
        assert_eq!(record.service_version.as_deref(), Some("v1"));
        assert!(record.hdurl.is_some());
        assert!(!record.is_video());
    }

    #[test]
    fn test_missing_title_fails() {
        let body = r#"{"date":"2020-07-04","explanation":"E","media_type":"image","url":"http://x"}"#;
        let err = decode(body.as_bytes()).unwrap_err();

        assert!(matches!(err, ExplorerError::DecodeError(_)));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_numeric_date_fails() {
        let body = r#"{"date":20200704,"explanation":"E","media_type":"image","title":"T","url":"http://x"}"#;
        let err = decode(body.as_bytes()).unwrap_err();

        assert!(matches!(err, ExplorerError::DecodeError(_)));
    }

    #[test]
    fn test_malformed_json_fails() {
        assert!(matches!(
            decode(b"{\"date\":").unwrap_err(),
            ExplorerError::DecodeError(_)
        ));
        assert!(matches!(
            decode(b"[]").unwrap_err(),
            ExplorerError::DecodeError(_)
        ));
    }
}
