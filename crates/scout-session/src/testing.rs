//! In-memory backend for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scout_commerce::catalog::{Offer, Product};
use scout_commerce::ids::ProductId;
use scout_commerce::search::SearchRequest;
use scout_data::FetchError;
use tokio::sync::Notify;

use crate::backend::{BackendResult, SearchBackend};

/// Canned answer for the next search.
#[derive(Debug, Clone)]
pub enum Reply {
    Products(Vec<Product>),
    Status(u16),
}

#[derive(Default)]
struct Inner {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<SearchRequest>>,
    products: Mutex<HashMap<String, Product>>,
    offers: Mutex<HashMap<String, Vec<Offer>>>,
    offer_calls: Mutex<usize>,
    gate: Option<Notify>,
}

/// Records every request and answers from a queue of [`Reply`]s.
///
/// A gated backend parks each call until [`FakeBackend::release`].
#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Inner>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            inner: Arc::new(Inner {
                gate: Some(Notify::new()),
                ..Default::default()
            }),
        }
    }

    pub fn push(&self, reply: Reply) {
        self.inner.replies.lock().unwrap().push_back(reply);
    }

    pub fn with_product(self, product: Product) -> Self {
        self.inner
            .products
            .lock()
            .unwrap()
            .insert(product.id.to_string(), product);
        self
    }

    pub fn with_offers(self, id: &str, offers: Vec<Offer>) -> Self {
        self.inner
            .offers
            .lock()
            .unwrap()
            .insert(id.to_string(), offers);
        self
    }

    /// Let one parked call through.
    pub fn release(&self) {
        if let Some(gate) = &self.inner.gate {
            gate.notify_one();
        }
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.requests.lock().unwrap().len()
    }

    pub fn offer_calls(&self) -> usize {
        *self.inner.offer_calls.lock().unwrap()
    }

    async fn wait(&self) {
        if let Some(gate) = &self.inner.gate {
            gate.notified().await;
        }
    }
}

fn not_found(id: &ProductId) -> FetchError {
    FetchError::HttpError {
        status: 404,
        message: format!("product {} not found", id),
    }
}

#[async_trait]
impl SearchBackend for FakeBackend {
    async fn search(&self, request: &SearchRequest) -> BackendResult<Vec<Product>> {
        self.inner.requests.lock().unwrap().push(request.clone());
        self.wait().await;

        let reply = self.inner.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Products(products)) => Ok(products),
            Some(Reply::Status(status)) => Err(FetchError::HttpError {
                status,
                message: "backend error".to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn product(&self, id: &ProductId) -> BackendResult<Product> {
        self.wait().await;
        let product = self.inner.products.lock().unwrap().get(id.as_str()).cloned();
        product.ok_or_else(|| not_found(id))
    }

    async fn offers(&self, id: &ProductId) -> BackendResult<Vec<Offer>> {
        *self.inner.offer_calls.lock().unwrap() += 1;
        self.wait().await;
        let offers = self.inner.offers.lock().unwrap().get(id.as_str()).cloned();
        offers.ok_or_else(|| not_found(id))
    }
}
