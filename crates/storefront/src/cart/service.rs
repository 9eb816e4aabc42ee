use super::Quantity;
use crate::model::{Product, ProductId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

/// The external cart: the only authority on whether an add went through.
///
/// `add_item` is fire-and-forget. Completion is observed through `cart_count`.
#[async_trait]
pub trait CartService: Send + Sync {
    async fn add_item(&self, product: &Product, quantity: Quantity);

    /// A live view of the total number of items in the cart.
    fn cart_count(&self) -> watch::Receiver<u64>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u64,
}

/// In-process cart, keyed by product id.
#[derive(Debug)]
pub struct MemoryCart {
    lines: Mutex<HashMap<ProductId, CartLine>>,
    count: watch::Sender<u64>,
    silent: bool,
}

impl Default for MemoryCart {
    fn default() -> Self {
        Self::with_count(0)
    }
}

impl MemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cart that already holds `count` items from an earlier session.
    pub fn with_count(count: u64) -> Self {
        let (count, _) = watch::channel(count);
        Self {
            lines: Mutex::new(HashMap::new()),
            count,
            silent: false,
        }
    }

    /// A cart that accepts adds but never reports them.
    pub fn silent(count: u64) -> Self {
        Self {
            silent: true,
            ..Self::with_count(count)
        }
    }

    pub fn count(&self) -> u64 {
        *self.count.borrow()
    }

    /// Lines sorted by product id.
    pub async fn lines(&self) -> Vec<CartLine> {
        let lines = self.lines.lock().await;
        let mut lines: Vec<CartLine> = lines.values().cloned().collect();
        lines.sort_by(|a, b| a.product.id.cmp(&b.product.id));
        lines
    }
}

#[async_trait]
impl CartService for MemoryCart {
    async fn add_item(&self, product: &Product, quantity: Quantity) {
        if self.silent {
            debug!(id = %product.id, %quantity, "Dropping add");
            return;
        }

        let added = u64::from(quantity.get());
        {
            let mut lines = self.lines.lock().await;
            lines
                .entry(product.id.clone())
                .and_modify(|line| line.quantity += added)
                .or_insert_with(|| CartLine {
                    product: product.clone(),
                    quantity: added,
                });
        }
        self.count.send_modify(|count| *count += added);
        info!(id = %product.id, %quantity, total = self.count(), "Added to cart");
    }

    fn cart_count(&self) -> watch::Receiver<u64> {
        self.count.subscribe()
    }
}
