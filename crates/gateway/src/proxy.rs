//! Прозрачная пересылка `/api/*` на удалённый backend.
//!
//! Шлюз не разбирает тела запросов и ответов, бизнес-логики здесь нет.
//! Обратно уходят статус, Content-Type и тело апстрима как есть.

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::common::ApiAck;
use once_cell::sync::OnceCell;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::config::Config;

static HTTP_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();
static UPSTREAM_BASE: OnceCell<String> = OnceCell::new();

/// Заголовки запроса, которые уходят на апстрим. Hop-by-hop заголовки
/// (host, connection, content-length) пересылать нельзя, их выставляет
/// сам HTTP-клиент.
const FORWARDED_REQUEST_HEADERS: [&str; 3] = ["authorization", "content-type", "accept"];

/// Ошибки пересылки. Таймаут и недоступность апстрима различаются
/// в статусе ответа, фронтенд показывает `message` как есть.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("upstream timeout: {0}")]
    Timeout(String),

    #[error("upstream unreachable: {0}")]
    Connect(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("body read failed: {0}")]
    Body(String),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Connect(_) | ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Body(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            ProxyError::Timeout(_) => {
                "Превышено время ожидания ответа удалённого API".to_string()
            }
            ProxyError::Connect(_) => "Удалённый API недоступен".to_string(),
            ProxyError::Upstream(e) => format!("Ошибка обращения к удалённому API: {}", e),
            ProxyError::Body(_) => "Не удалось прочитать тело запроса".to_string(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::error!("proxy error: {}", self);
        let status = self.status();
        let ack = ApiAck {
            success: false,
            message: Some(self.user_message()),
        };
        (status, Json(ack)).into_response()
    }
}

/// Инициализация разделяемого клиента и адреса апстрима из конфигурации.
/// Вызывается один раз на старте, до первого запроса.
pub fn initialize(config: &Config) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.upstream.timeout_secs))
        .build()?;
    HTTP_CLIENT
        .set(client)
        .map_err(|_| anyhow::anyhow!("proxy already initialized"))?;
    UPSTREAM_BASE
        .set(config.upstream.base_url.trim_end_matches('/').to_string())
        .map_err(|_| anyhow::anyhow!("proxy already initialized"))?;
    Ok(())
}

/// Пересылает запрос на апстрим: метод, путь с query, допущенные
/// заголовки и тело без изменений.
pub async fn forward(req: Request<Body>) -> Result<Response, ProxyError> {
    let client = HTTP_CLIENT.get().expect("proxy is not initialized");
    let base = UPSTREAM_BASE.get().expect("proxy is not initialized");

    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let url = upstream_url(base, &path_and_query);
    let headers = filter_request_headers(req.headers());

    let body_bytes = to_bytes(req.into_body(), usize::MAX)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    tracing::info!("[{}] -> {} {}", request_id, method, url);

    let mut upstream_req = client.request(method, &url);
    for (name, value) in headers {
        upstream_req = upstream_req.header(name, value);
    }
    if !body_bytes.is_empty() {
        upstream_req = upstream_req.body(body_bytes.to_vec());
    }

    let upstream_resp = upstream_req.send().await.map_err(classify_send_error)?;

    let status = upstream_resp.status();
    let content_type = upstream_resp
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .cloned();
    let resp_body = upstream_resp
        .bytes()
        .await
        .map_err(|e| ProxyError::Upstream(e.to_string()))?;

    tracing::info!(
        "[{}] <- {} ({} байт)",
        request_id,
        status.as_u16(),
        resp_body.len()
    );

    let mut response = Response::builder().status(status);
    if let Some(ct) = content_type {
        response = response.header(axum::http::header::CONTENT_TYPE, ct);
    }
    response
        .body(Body::from(resp_body))
        .map_err(|e| ProxyError::Upstream(e.to_string()))
}

/// Адрес запроса на апстриме: базовый адрес без хвостового слэша
/// плюс исходный путь вместе с query.
fn upstream_url(base: &str, path_and_query: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path_and_query)
}

fn filter_request_headers(headers: &HeaderMap) -> Vec<(HeaderName, HeaderValue)> {
    headers
        .iter()
        .filter(|(name, _)| FORWARDED_REQUEST_HEADERS.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

fn classify_send_error(e: reqwest::Error) -> ProxyError {
    if e.is_timeout() {
        ProxyError::Timeout(e.to_string())
    } else if e.is_connect() {
        ProxyError::Connect(e.to_string())
    } else {
        ProxyError::Upstream(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_url_preserves_query() {
        assert_eq!(
            upstream_url("http://api.example.com", "/api/categories/tree?depth=2"),
            "http://api.example.com/api/categories/tree?depth=2"
        );
    }

    #[test]
    fn test_upstream_url_strips_trailing_slash() {
        assert_eq!(
            upstream_url("http://api.example.com/", "/api/products"),
            "http://api.example.com/api/products"
        );
    }

    #[test]
    fn test_request_header_allowlist() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("host", HeaderValue::from_static("localhost:3000"));
        headers.insert("cookie", HeaderValue::from_static("sid=1"));

        let forwarded = filter_request_headers(&headers);
        let names: Vec<&str> = forwarded.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"authorization"));
        assert!(names.contains(&"content-type"));
        assert!(!names.contains(&"host"));
        assert!(!names.contains(&"cookie"));
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            ProxyError::Timeout("t".into()).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            ProxyError::Connect("c".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ProxyError::Upstream("u".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ProxyError::Body("b".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_matches_mutation_ack_shape() {
        let err = ProxyError::Connect("refused".into());
        let ack = ApiAck {
            success: false,
            message: Some(err.user_message()),
        };
        let raw = serde_json::to_value(&ack).unwrap();
        assert_eq!(raw["success"], false);
        assert_eq!(raw["message"], "Удалённый API недоступен");
    }
}
