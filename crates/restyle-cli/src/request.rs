//! Request handling
//!
//! Each handler turns one request into its JSON response. Failures are
//! reported in the response body, never as a panic or a raw error.

use restyle_engine::{ContentType, Engine, SourceSummary};
use restyle_net::Fetch;
use serde::Serialize;

pub const MISSING_INPUT: &str = "Both source HTML and target content are required";

/// Response of `fetch`
#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of `transform`
#[derive(Debug, Serialize)]
pub struct TransformResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformed_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SourceSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransformResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            transformed_html: None,
            content_type: None,
            strategy: None,
            summary: None,
            error: Some(error.into()),
        }
    }
}

/// Response of `render`
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn fetch(fetcher: &dyn Fetch, url: &str) -> FetchResponse {
    match fetcher.fetch_html(url) {
        Ok(html) => FetchResponse {
            success: true,
            html: Some(html),
            error: None,
        },
        Err(e) => {
            tracing::error!("Error fetching URL {}: {}", url, e);
            FetchResponse {
                success: false,
                html: None,
                error: Some(format!("Error fetching URL: {e}")),
            }
        }
    }
}

pub fn transform(engine: &Engine, source_html: &str, target: &str) -> TransformResponse {
    if source_html.trim().is_empty() || target.trim().is_empty() {
        return TransformResponse::failure(MISSING_INPUT);
    }

    match engine.transform(source_html, target) {
        Ok(result) => TransformResponse {
            success: true,
            transformed_html: Some(result.html),
            content_type: Some(result.content_type),
            strategy: Some(result.strategy),
            summary: Some(result.summary),
            error: None,
        },
        Err(e) => {
            tracing::error!("Error transforming HTML: {}", e);
            TransformResponse::failure(format!("Transformation error: {e}"))
        }
    }
}

pub fn render(engine: &Engine, target: &str) -> RenderResponse {
    match engine.classify_and_render(target) {
        Ok((content_type, html)) => RenderResponse {
            success: true,
            content_type: Some(content_type),
            html: Some(html),
            error: None,
        },
        Err(e) => RenderResponse {
            success: false,
            content_type: None,
            html: None,
            error: Some(format!("Rendering error: {e}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle_net::FetchError;
    use serde_json::json;

    struct Canned;

    impl Fetch for Canned {
        fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
            restyle_net::validate_url(url)?;
            Ok("<p>fetched</p>".to_string())
        }
    }

    #[test]
    fn test_fetch_response() {
        let ok = serde_json::to_value(fetch(&Canned, "https://example.com")).unwrap();
        assert_eq!(ok, json!({ "success": true, "html": "<p>fetched</p>" }));

        let err = fetch(&Canned, "not a url");
        assert!(!err.success);
        assert!(err.error.unwrap().starts_with("Error fetching URL: "));
    }

    #[test]
    fn test_transform_requires_both_inputs() {
        let engine = Engine::default();
        for (source, target) in [("", "x"), ("<p>x</p>", "  \n"), (" ", " ")] {
            let response = serde_json::to_value(transform(&engine, source, target)).unwrap();
            assert_eq!(response, json!({ "success": false, "error": MISSING_INPUT }));
        }
    }

    #[test]
    fn test_transform_response() {
        let response = transform(&Engine::default(), r#"<p style="color: red">a</p>"#, "Hi");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["transformed_html"], r#"<p style="color: red;">Hi</p>"#);
        assert_eq!(value["content_type"], "plain_text");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_transform_reports_parse_failure() {
        let response = transform(&Engine::default(), "\u{1}\u{2}\u{3}", "Hi");
        assert!(!response.success);
        assert!(response.error.unwrap().starts_with("Transformation error: "));
    }

    #[test]
    fn test_render_response() {
        let value = serde_json::to_value(render(&Engine::default(), "")).unwrap();
        assert_eq!(value, json!({ "success": true, "content_type": "empty", "html": "<p></p>" }));
    }
}
