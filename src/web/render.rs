//! Output formats for a decoded APOD record.

use crate::domain::model::ApodRecord;
use crate::domain::ports::Renderer;
use crate::utils::error::Result;
use url::Url;

/// Server-side rendered APOD page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

/// Pretty-printed JSON of the record, for `/api` routes and the fetch tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for HtmlRenderer {
    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn render(&self, record: &ApodRecord) -> Result<String> {
        let url = safe_url(&record.url);
        let hdurl = record.hdurl.as_deref().and_then(safe_url);

        let media = match (url, record.is_video()) {
            (Some(url), true) => format!(
                r#"<iframe class="apod-media" src="{}" width="960" height="540" frameborder="0" allowfullscreen></iframe>"#,
                url
            ),
            (Some(url), false) => format!(
                r#"<a href="{href}"><img class="apod-media" src="{src}" alt="{alt}"></a>"#,
                href = hdurl.as_deref().unwrap_or(&url),
                src = url,
                alt = escape_html(&record.title)
            ),
            (None, _) => {
                tracing::warn!("Refusing to embed media URL with unsupported scheme");
                r#"<p class="apod-media">Media unavailable</p>"#.to_string()
            }
        };

        let hd_link = hdurl
            .as_deref()
            .map(|hd| format!(r#"<p><a href="{}">View in high definition</a></p>"#, hd))
            .unwrap_or_default();

        let copyright = record
            .copyright
            .as_deref()
            .map(|c| format!("<p class=\"copyright\">&copy; {}</p>", escape_html(c.trim())))
            .unwrap_or_default();

        Ok(layout(
            &record.title,
            &format!(
                r#"<h1>{title}</h1>
<p class="date">{date}</p>
{media}
{hd_link}
{copyright}
<p class="explanation">{explanation}</p>"#,
                title = escape_html(&record.title),
                date = escape_html(&record.date),
                explanation = escape_html(&record.explanation),
            ),
        ))
    }

    fn render_error(&self, status: u16, message: &str) -> String {
        layout(
            "APOD unavailable",
            &format!(
                "<h1>APOD unavailable ({status})</h1>\n<p class=\"error\">{}</p>",
                escape_html(message)
            ),
        )
    }
}

impl Renderer for JsonRenderer {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, record: &ApodRecord) -> Result<String> {
        Ok(serde_json::to_string_pretty(record)?)
    }

    fn render_error(&self, status: u16, message: &str) -> String {
        serde_json::json!({ "status": status, "error": message }).to_string()
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{} - Astronomy Picture of the Day</title>
</head>
<body>
{}
<footer><a href="/apod">Today</a> | <a href="/nasaapis">NASA APIs</a></footer>
</body>
</html>
"#,
        escape_html(title),
        body
    )
}

/// Escaped form of `raw` when it is an absolute `http` or `https` URL.
fn safe_url(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw.trim()).ok()?;
    matches!(parsed.scheme(), "http" | "https").then(|| escape_html(raw.trim()))
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ApodRecord {
        ApodRecord {
            copyright: Some("\nJohn <Doe>\n".to_string()),
            date: "2020-07-04".to_string(),
            explanation: "Fireworks & stars".to_string(),
            hdurl: Some("https://apod.nasa.gov/hd.jpg".to_string()),
            media_type: "image".to_string(),
            service_version: Some("v1".to_string()),
            title: "A \"Starry\" Night".to_string(),
            url: "https://apod.nasa.gov/small.jpg".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_html_image_page() {
        let html = HtmlRenderer.render(&record()).unwrap();

        assert!(html.contains("<h1>A &quot;Starry&quot; Night</h1>"));
        assert!(html.contains(r#"<img class="apod-media" src="https://apod.nasa.gov/small.jpg""#));
        assert!(html.contains("View in high definition"));
        assert!(html.contains("&copy; John &lt;Doe&gt;"));
        assert!(html.contains("Fireworks &amp; stars"));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn test_html_video_page_without_optionals() {
        let mut rec = record();
        rec.media_type = "video".to_string();
        rec.url = "https://www.youtube.com/embed/abc".to_string();
        rec.hdurl = None;
        rec.copyright = None;

        let html = HtmlRenderer.render(&rec).unwrap();
        assert!(html.contains(r#"<iframe class="apod-media" src="https://www.youtube.com/embed/abc""#));
        assert!(!html.contains("high definition"));
        assert!(!html.contains("&copy;"));
    }

    #[test]
    fn test_html_drops_non_http_urls() {
        let mut rec = record();
        rec.media_type = "video".to_string();
        rec.url = "javascript:alert(document.cookie)".to_string();
        rec.hdurl = Some("data:text/html,<script>x</script>".to_string());

        let html = HtmlRenderer.render(&rec).unwrap();
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("data:text"));
        assert!(!html.contains("<iframe"));
        assert!(!html.contains("high definition"));
        assert!(html.contains("Media unavailable"));

        rec.media_type = "image".to_string();
        rec.url = "https://apod.nasa.gov/small.jpg".to_string();
        let html = HtmlRenderer.render(&rec).unwrap();
        assert!(html.contains(r#"<a href="https://apod.nasa.gov/small.jpg"><img"#));
        assert!(!html.contains("data:text"));
    }

    #[test]
    fn test_json_render_skips_absent_optionals() {
        let mut rec = record();
        rec.copyright = None;
        let json = JsonRenderer.render(&rec).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "A \"Starry\" Night");
        assert!(value.get("copyright").is_none());
        assert_eq!(value["hdurl"], "https://apod.nasa.gov/hd.jpg");
    }

    #[test]
    fn test_error_rendering() {
        let html = HtmlRenderer.render_error(502, "bad <gateway>");
        assert!(html.contains("APOD unavailable (502)"));
        assert!(html.contains("bad &lt;gateway&gt;"));

        let json: serde_json::Value =
            serde_json::from_str(&JsonRenderer.render_error(504, "timeout")).unwrap();
        assert_eq!(json["status"], 504);
        assert_eq!(json["error"], "timeout");
    }
}
