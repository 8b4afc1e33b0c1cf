use catalog_pages::{CatalogSource, Category, CategoryList, FetchError, Product, ProductPage};
use reqwest::Url;
use serde::de::DeserializeOwned;

/// Header carrying the per-store credential.
pub const STORE_KEY_HEADER: &str = "Store-Key";

/// HTTP client for the store API.
///
/// Every request carries the store key; nothing else is kept between
/// calls. Timeouts are left at `reqwest` defaults and failed requests are
/// not retried.
pub struct StoreApiClient {
    client: reqwest::Client,
    api_base_url: String,
    store_key: String,
}

impl StoreApiClient {
    pub fn new(api_base_url: impl Into<String>, store_key: impl Into<String>) -> Self {
        let api_base_url: String = api_base_url.into();
        Self {
            client: reqwest::Client::new(),
            api_base_url: api_base_url.trim_end_matches('/').to_owned(),
            store_key: store_key.into(),
        }
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let invalid =
            || FetchError::Network(format!("invalid API endpoint {}", self.api_base_url));
        let mut url = Url::parse(&self.api_base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn build_request(&self, url: Url) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("User-Agent", "catalog-pages")
            .header(STORE_KEY_HEADER, &self.store_key)
    }

    /// GET `url` and decode a 200 response as JSON.
    ///
    /// Any other status becomes `FetchError::Status` with the status line
    /// and raw body, whatever the body contains.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");

        let response = self
            .build_request(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("reading response from {url} failed: {e}")))?;

        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status {
                status: status.to_string(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(format!("{url}: {e}")))
    }
}

#[async_trait::async_trait]
impl CatalogSource for StoreApiClient {
    fn label(&self) -> &str {
        &self.api_base_url
    }

    async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        let list: CategoryList = self.get_json(self.url(&["v1", "categories"])?).await?;
        Ok(list.categories)
    }

    async fn product_page(&self, page: u64, page_size: u64) -> Result<ProductPage, FetchError> {
        let (page, page_size) = (page.to_string(), page_size.to_string());
        self.get_json(self.url(&["v1", "products", &page, &page_size])?)
            .await
    }

    async fn product(&self, slug: &str) -> Result<Product, FetchError> {
        self.get_json(self.url(&["v1", "product", "slug", slug])?)
            .await
    }
}
