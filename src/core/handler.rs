use crate::core::aggregator::Aggregator;
use crate::domain::model::{ErrorBody, ResponseEnvelope};
use crate::utils::error::{IntelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    ("Content-Type", "application/json"),
];

/// Proxy-style HTTP event. Netlify and API Gateway v1 send `httpMethod`,
/// API Gateway v2 and function URLs send `requestContext.http.method`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpContext {
    #[serde(default)]
    pub method: Option<String>,
}

impl HttpEvent {
    pub fn method(&self) -> &str {
        self.http_method
            .as_deref()
            .or_else(|| {
                self.request_context
                    .as_ref()
                    .and_then(|ctx| ctx.http.as_ref())
                    .and_then(|http| http.method.as_deref())
            })
            .unwrap_or("GET")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    fn with_cors(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            headers: CORS_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body,
        }
    }

    pub fn preflight() -> Self {
        Self::with_cors(200, String::new())
    }

    pub fn ok(envelope: &ResponseEnvelope) -> Result<Self> {
        let body = serde_json::to_string(envelope)?;
        Ok(Self::with_cors(200, body))
    }

    pub fn fatal(error: &IntelError) -> Self {
        let body = serde_json::to_string(&ErrorBody::fatal(error.to_string())).unwrap_or_default();
        Self::with_cors(500, body)
    }
}

/// 單一請求的入口：OPTIONS 直接回 200，其餘方法執行聚合。
/// 方法名稱區分大小寫，`options` 會當成一般請求。
pub async fn handle_request(aggregator: &Aggregator, method: &str) -> HttpResponse {
    if method == "OPTIONS" {
        tracing::debug!("CORS preflight request");
        return HttpResponse::preflight();
    }

    let envelope = aggregator.aggregate().await;
    respond(&envelope)
}

pub fn respond(envelope: &ResponseEnvelope) -> HttpResponse {
    match HttpResponse::ok(envelope) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("❌ API Proxy Error: {}", e);
            HttpResponse::fatal(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{SourceResult, Sources};
    use chrono::Utc;

    #[test]
    fn test_event_method_from_netlify_shape() {
        let event: HttpEvent = serde_json::from_str(r#"{"httpMethod": "OPTIONS"}"#).unwrap();
        assert_eq!(event.method(), "OPTIONS");
    }

    #[test]
    fn test_event_method_from_function_url_shape() {
        let event: HttpEvent =
            serde_json::from_str(r#"{"requestContext": {"http": {"method": "POST"}}}"#).unwrap();
        assert_eq!(event.method(), "POST");
    }

    #[test]
    fn test_event_method_defaults_to_get() {
        let event: HttpEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event.method(), "GET");
    }

    #[test]
    fn test_preflight_has_cors_headers_and_empty_body() {
        let response = HttpResponse::preflight();

        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers["Access-Control-Allow-Headers"], "Content-Type");
        assert_eq!(
            response.headers["Access-Control-Allow-Methods"],
            "GET, POST, OPTIONS"
        );
        assert_eq!(response.headers["Content-Type"], "application/json");
    }

    #[test]
    fn test_respond_serializes_envelope() {
        let envelope = ResponseEnvelope::new(
            Utc::now(),
            Sources {
                ransomwhere: SourceResult::success(vec![]),
                cisa: SourceResult::failure("CISA API failed: 500"),
                canadian: SourceResult::success(vec![]),
            },
        );

        let response = respond(&envelope);

        assert_eq!(response.status_code, 200);
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["sources"]["cisa"]["status"], "error");
        assert_eq!(body["sources"]["cisa"]["error"], "CISA API failed: 500");
        assert!(body["sources"]["cisa"]["data"].is_null());
    }

    #[test]
    fn test_fatal_response_shape() {
        let error = IntelError::SerializationError(
            serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
        );

        let response = HttpResponse::fatal(&error);

        assert_eq!(response.status_code, 500);
        assert_eq!(response.headers.len(), 4);
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], "Failed to fetch ransomware data");
        assert!(body["message"].as_str().unwrap().starts_with("Serialization error"));
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn test_response_serializes_as_proxy_result() {
        let json = serde_json::to_value(HttpResponse::preflight()).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["body"], "");
    }
}
