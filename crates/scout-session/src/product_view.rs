//! Product detail page state.

use std::sync::Arc;

use scout_commerce::catalog::{Offer, Product};
use scout_commerce::ids::ProductId;
use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::backend::SearchBackend;
use crate::gesture::{NavigationIntent, Swipe};

/// What the detail page shows.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProductViewState {
    pub product: Option<Product>,
    pub loading_product: bool,
    pub offers: Vec<Offer>,
    pub loading_offers: bool,
    /// Set once offers have been requested at least once.
    pub offers_requested: bool,
    pub last_error: Option<String>,
}

/// Result of a [`ProductView`] load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    Loaded,
    /// Already loading, or the view was closed.
    Ignored,
    Failed(String),
    Cancelled,
}

/// Detail page for one product: the product itself plus on-demand offers.
pub struct ProductView<B: SearchBackend> {
    id: ProductId,
    backend: Arc<B>,
    state: watch::Sender<ProductViewState>,
    cancel: CancellationToken,
}

impl<B: SearchBackend> ProductView<B> {
    pub fn new(backend: Arc<B>, id: ProductId) -> Self {
        let (state, _) = watch::channel(ProductViewState::default());
        Self {
            id,
            backend,
            state,
            cancel: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn state(&self) -> ProductViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProductViewState> {
        self.state.subscribe()
    }

    /// Fetch the product. On failure `product` stays empty and the error is kept.
    pub async fn load(&self) -> ViewOutcome {
        if self.cancel.is_cancelled() {
            return ViewOutcome::Ignored;
        }
        let started = self.state.send_if_modified(|state| {
            if state.loading_product {
                return false;
            }
            state.loading_product = true;
            state.last_error = None;
            true
        });
        if !started {
            return ViewOutcome::Ignored;
        }

        tracing::debug!(product = %self.id, "loading product");
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return ViewOutcome::Cancelled,
            result = self.backend.product(&self.id) => result,
        };

        let mut outcome = ViewOutcome::Loaded;
        self.state.send_modify(|state| {
            state.loading_product = false;
            match result {
                Ok(product) => state.product = Some(product),
                Err(e) => {
                    tracing::warn!(product = %self.id, error = %e, "product load failed");
                    state.last_error = Some(e.to_string());
                    outcome = ViewOutcome::Failed(e.to_string());
                }
            }
        });
        outcome
    }

    /// Fetch merchant offers. Ignored while a previous request is in flight.
    pub async fn show_offers(&self) -> ViewOutcome {
        if self.cancel.is_cancelled() {
            return ViewOutcome::Ignored;
        }
        let started = self.state.send_if_modified(|state| {
            if state.loading_offers {
                return false;
            }
            state.loading_offers = true;
            state.offers_requested = true;
            true
        });
        if !started {
            tracing::debug!(product = %self.id, "offers already loading");
            return ViewOutcome::Ignored;
        }

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return ViewOutcome::Cancelled,
            result = self.backend.offers(&self.id) => result,
        };

        let mut outcome = ViewOutcome::Loaded;
        self.state.send_modify(|state| {
            state.loading_offers = false;
            match result {
                Ok(offers) => {
                    tracing::info!(product = %self.id, count = offers.len(), "offers loaded");
                    state.offers = offers;
                }
                Err(e) => {
                    tracing::warn!(product = %self.id, error = %e, "offers failed");
                    state.offers.clear();
                    state.last_error = Some(e.to_string());
                    outcome = ViewOutcome::Failed(e.to_string());
                }
            }
        });
        outcome
    }

    pub fn handle_gesture(&self, swipe: &Swipe) -> Option<NavigationIntent> {
        let intent = swipe.intent();
        if let Some(intent) = intent {
            tracing::debug!(product = %self.id, ?intent, "gesture navigation");
        }
        intent
    }

    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl<B: SearchBackend> Drop for ProductView<B> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;
    use scout_commerce::catalog::OfferPrice;

    fn offer(merchant: &str, price: f64) -> Offer {
        Offer {
            merchant: merchant.to_string(),
            price: Some(OfferPrice::Amount(price)),
            link: format!("https://{}.example", merchant),
            ..Default::default()
        }
    }

    fn view(backend: &FakeBackend, id: &str) -> ProductView<FakeBackend> {
        ProductView::new(Arc::new(backend.clone()), ProductId::new(id))
    }

    #[tokio::test]
    async fn test_load_product() {
        let backend = FakeBackend::new().with_product(Product::new("p1", "Phone"));
        let v = view(&backend, "p1");

        assert_eq!(v.load().await, ViewOutcome::Loaded);
        let state = v.state();
        assert_eq!(state.product.map(|p| p.title), Some("Phone".to_string()));
        assert!(!state.loading_product);
    }

    #[tokio::test]
    async fn test_missing_product_records_error() {
        let backend = FakeBackend::new();
        let v = view(&backend, "nope");

        assert!(matches!(v.load().await, ViewOutcome::Failed(_)));
        let state = v.state();
        assert!(state.product.is_none());
        assert!(state.last_error.unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_offers_replace_previous() {
        let backend = FakeBackend::new().with_offers("p1", vec![offer("a", 10.0), offer("b", 12.5)]);
        let v = view(&backend, "p1");

        assert_eq!(v.show_offers().await, ViewOutcome::Loaded);
        let state = v.state();
        assert!(state.offers_requested);
        assert_eq!(state.offers.len(), 2);
        assert_eq!(state.offers[1].price_label(), "12.50");
    }

    #[tokio::test]
    async fn test_offers_are_single_flight() {
        let backend = FakeBackend::gated().with_offers("p1", vec![offer("a", 1.0)]);
        let v = view(&backend, "p1");
        let mut rx = v.subscribe();

        let (first, second) = tokio::join!(v.show_offers(), async {
            rx.wait_for(|state| state.loading_offers).await.unwrap();
            let outcome = v.show_offers().await;
            backend.release();
            outcome
        });

        assert_eq!(first, ViewOutcome::Loaded);
        assert_eq!(second, ViewOutcome::Ignored);
        assert_eq!(backend.offer_calls(), 1);
    }

    #[tokio::test]
    async fn test_offers_failure_clears_list() {
        let backend = FakeBackend::new();
        let v = view(&backend, "p1");

        assert!(matches!(v.show_offers().await, ViewOutcome::Failed(_)));
        assert!(v.state().offers.is_empty());
        assert!(!v.state().loading_offers);
    }

    #[test]
    fn test_gesture() {
        let backend = FakeBackend::new();
        let v = view(&backend, "p1");
        assert_eq!(
            v.handle_gesture(&Swipe::released(1.0, 0.9)),
            Some(NavigationIntent::Back)
        );
        assert_eq!(v.handle_gesture(&Swipe::released(1.0, 0.2)), None);
    }
}
