//! Client for the backend's operator endpoints.
//!
//! Unlike searches, admin failures are returned to the caller as-is.

use scout_commerce::admin::{ApiKeys, ParserJob, SearchStatistics, StatusMessage};
use scout_commerce::catalog::Product;
use scout_commerce::ids::ProductId;
use scout_data::{FetchClient, FetchError};

use crate::backend::BackendResult;

/// Typed wrapper over `/admin/*`.
#[derive(Debug, Clone)]
pub struct AdminClient {
    client: FetchClient,
}

impl AdminClient {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    // === Parser ===

    pub async fn parser_status(&self) -> BackendResult<StatusMessage> {
        self.client
            .get("/admin/parser/status")
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    pub async fn start_parser(&self, job: &ParserJob) -> BackendResult<StatusMessage> {
        tracing::info!(url = %job.url, category = %job.category, "starting parser");
        let response = self
            .client
            .post("/admin/parser/start")
            .json(job)?
            .send()
            .await?
            .error_for_status()?;
        let status: Option<StatusMessage> = response.json_opt()?;
        Ok(status.unwrap_or_default())
    }

    pub async fn stop_parser(&self) -> BackendResult<StatusMessage> {
        tracing::info!("stopping parser");
        let response = self
            .client
            .post("/admin/parser/stop")
            .send()
            .await?
            .error_for_status()?;
        let status: Option<StatusMessage> = response.json_opt()?;
        Ok(status.unwrap_or_default())
    }

    // === Keys ===

    /// Currently configured keys, masked by the backend.
    pub async fn api_keys(&self) -> BackendResult<ApiKeys> {
        self.client
            .get("/admin/keys")
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    pub async fn update_api_keys(&self, keys: &ApiKeys) -> BackendResult<StatusMessage> {
        let response = self
            .client
            .post("/admin/keys")
            .json(keys)?
            .send()
            .await?
            .error_for_status()?;
        let status: Option<StatusMessage> = response.json_opt()?;
        Ok(status.unwrap_or_default())
    }

    // === Logs ===

    /// Plain-text logs of one backend service ("backend", "parser", ...).
    pub async fn logs(&self, service: &str) -> BackendResult<String> {
        let service = service.trim();
        if service.is_empty() {
            return Err(FetchError::InvalidUrl("service not specified".to_string()));
        }
        self.client
            .get(format!("/admin/logs/{}", service))
            .accept("text/plain")
            .send()
            .await?
            .error_for_status()?
            .text()
    }

    // === Products ===

    pub async fn products(&self) -> BackendResult<Vec<Product>> {
        let response = self
            .client
            .get("/admin/products/")
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?;
        let products: Option<Option<Vec<Product>>> = response.json_opt()?;
        Ok(products.flatten().unwrap_or_default())
    }

    pub async fn add_product(&self, product: &Product) -> BackendResult<()> {
        tracing::info!(product = %product.id, "adding product");
        self.client
            .post("/admin/products/")
            .json(product)?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn update_product(&self, product: &Product) -> BackendResult<()> {
        tracing::info!(product = %product.id, "updating product");
        self.client
            .put(format!("/admin/products/{}", product.id))
            .json(product)?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn delete_product(&self, id: &ProductId) -> BackendResult<()> {
        tracing::info!(product = %id, "deleting product");
        self.client
            .delete(format!("/admin/products/{}", id))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    // === Statistics ===

    pub async fn statistics(&self) -> BackendResult<SearchStatistics> {
        self.client
            .get("/admin/statistics")
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
    }
}
