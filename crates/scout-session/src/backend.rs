//! The search backend seam.
//!
//! Sessions talk to the backend only through [`SearchBackend`], so tests can
//! drive them with an in-memory implementation and the CLI with
//! [`HttpBackend`].

use async_trait::async_trait;
use scout_commerce::catalog::{Offer, Product};
use scout_commerce::ids::ProductId;
use scout_commerce::search::SearchRequest;
use scout_data::{FetchClient, FetchError};

/// Result type for backend calls.
pub type BackendResult<T> = Result<T, FetchError>;

/// Read-side operations of the search backend.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a search. A missing body counts as zero results.
    async fn search(&self, request: &SearchRequest) -> BackendResult<Vec<Product>>;

    /// Fetch a single product.
    async fn product(&self, id: &ProductId) -> BackendResult<Product>;

    /// Fetch merchant offers for a product.
    async fn offers(&self, id: &ProductId) -> BackendResult<Vec<Offer>>;
}

/// [`SearchBackend`] over the backend's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: FetchClient,
}

impl HttpBackend {
    /// Create a backend from a client whose base URL points at `/api`.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &FetchClient {
        &self.client
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    async fn search(&self, request: &SearchRequest) -> BackendResult<Vec<Product>> {
        let response = self
            .client
            .post("/search")
            .accept("application/json")
            .json(request)?
            .send()
            .await?
            .error_for_status()?;

        // Blank and `null` bodies both mean "no products".
        let products: Option<Option<Vec<Product>>> = response.json_opt()?;
        Ok(products.flatten().unwrap_or_default())
    }

    async fn product(&self, id: &ProductId) -> BackendResult<Product> {
        self.client
            .get(format!("/product/{}", id))
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn offers(&self, id: &ProductId) -> BackendResult<Vec<Offer>> {
        let response = self
            .client
            .get(format!("/product/{}/offers", id))
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?;

        let offers: Option<Option<Vec<Offer>>> = response.json_opt()?;
        Ok(offers.flatten().unwrap_or_default())
    }
}
