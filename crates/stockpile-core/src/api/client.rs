//! API client for communicating with the remote product REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ApiError, ProductApi};
use crate::models::{Product, ProductDraft, ProductsPage};

// ============================================================================
// Constants
// ============================================================================

/// Base URL of the public product API.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API client for the product service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default timeout
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!(url = url, error = %e, "Failed to parse JSON response");
            ApiError::InvalidResponse(format!("{}: {}", url, e))
        })
    }

    async fn send(&self, method: Method, url: &str, body: Option<&ProductDraft>) -> Result<Response, ApiError> {
        debug!(%method, url = url, "Sending request");
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::check_response(response).await
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, url, None).await?;
        Self::parse_json(response, url).await
    }

    async fn send_draft<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        draft: &ProductDraft,
    ) -> Result<T, ApiError> {
        let response = self.send(method, url, Some(draft)).await?;
        Self::parse_json(response, url).await
    }
}

#[async_trait]
impl ProductApi for ApiClient {
    async fn list(&self, limit: u32) -> Result<Vec<Product>, ApiError> {
        let url = self.url(&format!("/products?limit={}", limit));
        let page: ProductsPage = self.get(&url).await?;
        debug!(count = page.products.len(), total = ?page.total, "Fetched product page");
        Ok(page.products)
    }

    async fn fetch_one(&self, id: i64) -> Result<Product, ApiError> {
        let url = self.url(&format!("/products/{}", id));
        self.get(&url).await
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        let url = self.url("/products/add");
        self.send_draft(Method::POST, &url, draft).await
    }

    async fn update(&self, id: i64, draft: &ProductDraft) -> Result<Product, ApiError> {
        let url = self.url(&format!("/products/{}", id));
        self.send_draft(Method::PUT, &url, draft).await
    }

    async fn remove(&self, id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/products/{}", id));
        self.send(Method::DELETE, &url, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::{DELETE, GET, POST, PUT};
    use httpmock::MockServer;
    use serde_json::json;

    fn pen_draft() -> ProductDraft {
        ProductDraft {
            title: "Pen".to_string(),
            description: Some("Blue ink".to_string()),
            price: 1.5,
            category: "office".to_string(),
            thumbnail: "u".to_string(),
        }
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(ApiClient::new("not a url"), Err(ApiError::InvalidUrl(_))));
        assert!(matches!(ApiClient::new("ftp://example.com"), Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("https://dummyjson.com/").unwrap();
        assert_eq!(client.base_url(), "https://dummyjson.com");
        assert_eq!(client.url("/products/1"), "https://dummyjson.com/products/1");
    }

    #[tokio::test]
    async fn test_list_unwraps_products_envelope() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/products").query_param("limit", "2");
                then.status(200).json_body(json!({
                    "products": [
                        {"id": 1, "title": "Mascara", "price": 9.99, "category": "beauty", "thumbnail": "a", "stock": 5},
                        {"id": 2, "title": "Eyeshadow", "price": 19.99, "category": "beauty", "thumbnail": "b"}
                    ],
                    "total": 194,
                    "skip": 0,
                    "limit": 2
                }));
            })
            .await;

        let client = ApiClient::new(&server.base_url()).unwrap();
        let products = client.list(2).await.unwrap();

        mock.assert_async().await;
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].title, "Eyeshadow");
    }

    #[tokio::test]
    async fn test_fetch_one_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/products/999");
                then.status(404).json_body(json!({"message": "Product with id '999' not found"}));
            })
            .await;

        let client = ApiClient::new(&server.base_url()).unwrap();
        let err = client.fetch_one(999).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref body) if body.contains("999")));
    }

    #[tokio::test]
    async fn test_create_posts_draft_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/products/add")
                    .json_body(json!({
                        "title": "Pen",
                        "description": "Blue ink",
                        "price": 1.5,
                        "category": "office",
                        "thumbnail": "u"
                    }));
                then.status(201).json_body(json!({
                    "id": 195, "title": "Pen", "description": "Blue ink",
                    "price": 1.5, "category": "office", "thumbnail": "u"
                }));
            })
            .await;

        let client = ApiClient::new(&server.base_url()).unwrap();
        let created = client.create(&pen_draft()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(created.id, 195);
        assert_eq!(created.title, "Pen");
    }

    #[tokio::test]
    async fn test_update_puts_to_record_path() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT).path("/products/7");
                then.status(200).json_body(json!({
                    "id": 7, "title": "Pen", "price": 1.5, "category": "office", "thumbnail": "u"
                }));
            })
            .await;

        let client = ApiClient::new(&server.base_url()).unwrap();
        let updated = client.update(7, &pen_draft()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(updated.id, 7);
    }

    #[tokio::test]
    async fn test_remove_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/products/7");
                then.status(503).body("maintenance");
            })
            .await;

        let client = ApiClient::new(&server.base_url()).unwrap();
        let err = client.remove(7).await.unwrap_err();
        assert!(matches!(err, ApiError::ServerError(ref body) if body == "maintenance"));
        assert!(!err.is_network());
    }

    #[tokio::test]
    async fn test_remove_accepts_any_success_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/products/7");
                then.status(204);
            })
            .await;

        let client = ApiClient::new(&server.base_url()).unwrap();
        client.remove(7).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/products");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let client = ApiClient::new(&server.base_url()).unwrap();
        let err = client.list(10).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = ApiClient::with_timeout("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client.list(10).await.unwrap_err();
        assert!(err.is_network());
    }
}
