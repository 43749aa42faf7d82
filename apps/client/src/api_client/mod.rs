/// Backend client. Only this module builds `reqwest` requests; feature
/// modules call the per-resource methods defined in the submodules.
///
/// Every JSON body from the backend is wrapped as `{ message, errorCode, data }`.
/// No retries: most calls are not idempotent.
use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::AppError;

pub mod chat;
pub mod dashboard;
pub mod jobs;
pub mod notifications;
pub mod payments;
pub mod resumes;
pub mod upload;

pub use upload::UploadFile;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    pub data: Option<T>,
}

/// Query parameters shared by every paged listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub filter: Option<String>,
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            filter: None,
            sort: None,
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        pairs
    }
}

/// Thin wrapper over `reqwest::Client` holding the base URL and bearer token.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("talentbridge/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Resolves a link returned by the server, which may be absolute or
    /// relative to the API base.
    pub fn resolve(&self, link: &str) -> String {
        if link.starts_with("http://") || link.starts_with("https://") {
            link.to_string()
        } else {
            self.url(link)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.authorize(self.client.request(method, self.url(path)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and returns the raw body of a 2xx response.
    /// Non-2xx responses become `AppError::Api` carrying the server message.
    async fn execute(&self, builder: RequestBuilder) -> Result<String, AppError> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{method} {path} -> {status}");

        if !status.is_success() {
            let err = error_from_body(status.as_u16(), &body);
            warn!("{method} {path} failed: {err}");
            return Err(err);
        }
        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AppError> {
        let body = self.execute(builder).await?;
        decode_data(&body)
    }

    async fn fetch_unit(&self, builder: RequestBuilder) -> Result<(), AppError> {
        self.execute(builder).await.map(|_| ())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.fetch(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<T, AppError> {
        self.fetch(self.request(Method::GET, path).query(&query.to_pairs()))
            .await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.fetch(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.fetch(self.request(Method::POST, path)).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.fetch(self.request(Method::PUT, path).json(body)).await
    }

    pub(crate) async fn put_unit(&self, path: &str) -> Result<(), AppError> {
        self.fetch_unit(self.request(Method::PUT, path)).await
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), AppError> {
        self.fetch_unit(self.request(Method::DELETE, path)).await
    }

    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        form: reqwest::multipart::Form,
    ) -> Result<T, AppError> {
        self.fetch(self.request(method, path).query(query).multipart(form))
            .await
    }

    /// Multipart POST whose successful response is plain text.
    pub(crate) async fn post_multipart_text(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<String, AppError> {
        let body = self
            .execute(self.request(Method::POST, path).multipart(form))
            .await?;
        Ok(decode_text(&body))
    }

    /// Downloads a file by absolute or API-relative link. The bearer token is
    /// only attached when the link points at the API host.
    pub(crate) async fn download(&self, link: &str) -> Result<Bytes, AppError> {
        let url = self.resolve(link);
        let builder = if url.starts_with(&self.base_url) {
            self.authorize(self.client.get(&url))
        } else {
            self.client.get(&url)
        };
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status.as_u16(), &body));
        }
        Ok(response.bytes().await?)
    }
}

/// Extracts `data` from an envelope. Bodies without an envelope are decoded
/// as-is.
pub(crate) fn decode_data<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    let value: Value = serde_json::from_str(body)?;
    let (data, message) = match value {
        Value::Object(mut map) if map.contains_key("data") => {
            let message = map
                .get("message")
                .and_then(|m| m.as_str())
                .map(String::from);
            (map.remove("data").unwrap_or(Value::Null), message)
        }
        other => (other, None),
    };
    if data.is_null() {
        return Err(AppError::Api {
            status: 200,
            code: Some("EMPTY_DATA".to_string()),
            message,
        });
    }
    Ok(serde_json::from_value(data)?)
}

/// Plain-text bodies are returned unchanged; a JSON string or an envelope
/// whose `data` is a string is unwrapped.
pub(crate) fn decode_text(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(s)) => s,
        Ok(Value::Object(map)) => match map.get("data") {
            Some(Value::String(s)) => s.clone(),
            _ => body.to_string(),
        },
        _ => body.to_string(),
    }
}

fn error_from_body(status: u16, body: &str) -> AppError {
    match serde_json::from_str::<ApiEnvelope<Value>>(body) {
        Ok(envelope) => AppError::Api {
            status,
            code: envelope.error_code,
            message: envelope.message,
        },
        Err(_) => {
            let text = body.trim();
            // HTML error pages are noise for the user
            let message = (!text.is_empty() && !text.starts_with('<')).then(|| text.to_string());
            AppError::Api {
                status,
                code: None,
                message,
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{envelope, spawn_backend};
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    #[test]
    fn test_decode_data_unwraps_envelope() {
        let value: Vec<u32> = decode_data(r#"{"message":"OK","data":[1,2]}"#).unwrap();
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn test_decode_data_accepts_bare_body() {
        let value: u32 = decode_data("5").unwrap();
        assert_eq!(value, 5);
    }

    #[test]
    fn test_decode_data_null_is_an_error_with_message() {
        let err = decode_data::<u32>(r#"{"message":"Không có dữ liệu","data":null}"#).unwrap_err();
        assert_eq!(err.user_message("x"), "Không có dữ liệu");
    }

    #[test]
    fn test_decode_text_variants() {
        assert_eq!(decode_text("Xin chào"), "Xin chào");
        assert_eq!(decode_text(r#""quoted""#), "quoted");
        assert_eq!(decode_text(r#"{"message":"OK","data":"wrapped"}"#), "wrapped");
    }

    #[test]
    fn test_error_from_envelope_body() {
        let err = error_from_body(
            404,
            r#"{"message":"Không tìm thấy công việc","errorCode":"ENTITY_NOT_FOUND","data":null}"#,
        );
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.code(), "ENTITY_NOT_FOUND");
        assert_eq!(err.user_message("fallback"), "Không tìm thấy công việc");
    }

    #[test]
    fn test_error_from_html_body_has_no_message() {
        let err = error_from_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.user_message("Máy chủ không phản hồi"), "Máy chủ không phản hồi");
    }

    #[test]
    fn test_list_query_pairs_skip_absent_fields() {
        let mut query = ListQuery::new(1, 5);
        assert_eq!(query.to_pairs().len(), 2);
        query.sort = Some("createdAt,desc".to_string());
        assert_eq!(query.to_pairs()[2], ("sort", "createdAt,desc".to_string()));
    }

    #[test]
    fn test_resolve_relative_and_absolute_links() {
        let client =
            ApiClient::new("http://host/api/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(client.resolve("/files/a.pdf"), "http://host/api/files/a.pdf");
        assert_eq!(client.resolve("https://cdn/x.pdf"), "https://cdn/x.pdf");
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let router = Router::new().route(
            "/api/whoami",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                envelope(auth)
            }),
        );
        let client = spawn_backend(router).await;
        let auth: String = client.get("whoami").await.unwrap();
        assert_eq!(auth, "Bearer test-token");
    }

    #[tokio::test]
    async fn test_non_success_status_surfaces_server_message() {
        let router = Router::new().route(
            "/api/boom",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({"message": "Bạn không có quyền", "errorCode": "FORBIDDEN"})),
                )
            }),
        );
        let client = spawn_backend(router).await;
        let err = client.get::<Value>("boom").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message("fallback"), "Bạn không có quyền");
    }
}
