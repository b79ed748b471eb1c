use crate::domain::model::{Credential, QueryParameters};

/// Builds `?api_key=..&date=..&hd=..` with every value percent-encoded.
///
/// The date is forwarded as given; the upstream rejects malformed dates itself.
/// `hd` is sent as the literal `True`/`False` the APOD API documents.
pub fn build(credential: &Credential, date: &str, high_definition: bool) -> String {
    let hd = if high_definition { "True" } else { "False" };
    format!(
        "?api_key={}&date={}&hd={}",
        urlencoding::encode(credential.expose()),
        urlencoding::encode(date),
        hd
    )
}

/// Probe query used to validate a key: only `api_key` is sent.
pub fn build_probe(credential: &Credential) -> String {
    format!("?api_key={}", urlencoding::encode(credential.expose()))
}

impl QueryParameters {
    pub fn new(credential: Credential, date: impl Into<String>, high_definition: bool) -> Self {
        Self {
            credential,
            date: date.into(),
            high_definition,
        }
    }

    pub fn into_query_string(self) -> String {
        build(&self.credential, &self.date, self.high_definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn parse_pairs(query: &str) -> Vec<(String, String)> {
        let url = Url::parse(&format!("http://localhost/{}", query)).unwrap();
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_build_basic_query() {
        let query = build(&Credential::new("abc123"), "2020-07-04", true);
        assert_eq!(query, "?api_key=abc123&date=2020-07-04&hd=True");

        let query = build(&Credential::demo(), "1995-06-16", false);
        assert_eq!(query, "?api_key=DEMO_KEY&date=1995-06-16&hd=False");
    }

    #[test]
    fn test_build_contains_exactly_three_parameters() {
        let query = build(&Credential::new("key"), "2021-01-01", false);
        let pairs = parse_pairs(&query);

        assert_eq!(
            pairs,
            vec![
                ("api_key".to_string(), "key".to_string()),
                ("date".to_string(), "2021-01-01".to_string()),
                ("hd".to_string(), "False".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_percent_encodes_values() {
        let query = build(&Credential::new("a&b=c d"), "2020/07/04&hd=False", true);

        assert!(query.starts_with('?'));
        assert!(query.contains("api_key=a%26b%3Dc%20d"));
        assert!(query.contains("date=2020%2F07%2F04%26hd%3DFalse"));

        let pairs = parse_pairs(&query);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].1, "a&b=c d");
        assert_eq!(pairs[1].1, "2020/07/04&hd=False");
        assert_eq!(pairs[2].1, "True");
    }

    #[test]
    fn test_malformed_date_is_forwarded() {
        let query = build(&Credential::demo(), "not-a-date", true);
        assert!(query.contains("date=not-a-date"));
    }

    #[test]
    fn test_query_parameters_consumed_into_query() {
        let params = QueryParameters::new(Credential::new("k"), "2020-07-04", true);
        assert_eq!(
            params.into_query_string(),
            "?api_key=k&date=2020-07-04&hd=True"
        );
    }

    #[test]
    fn test_build_probe() {
        assert_eq!(build_probe(&Credential::new("xyz")), "?api_key=xyz");
    }
}
