use super::notification::{expired_message, loading_message, success_message};
use super::{
    CartError, CartService, CountObserver, NotificationState, Quantity, RequestId, ToastId,
    Toaster,
};
use crate::model::Product;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Bookkeeping for the pending add that is not part of the visible state.
#[derive(Debug)]
struct Submission {
    toast: ToastId,
    deadline: Option<Instant>,
}

/// Quantity selection and add-to-cart feedback for one displayed product.
///
/// The controller never confirms an add itself. It opens a pending notification, hands the
/// add to the [`CartService`], and resolves the notification on the next change of the cart
/// count. At most one add is pending at a time; [`can_submit`](Self::can_submit) is what a
/// UI binds its add button to.
///
/// Without an add timeout a cart that never reports the change leaves the notification
/// pending until the controller is dropped or [`leave`](Self::leave) is called.
pub struct CartController {
    product: Product,
    cart: Arc<dyn CartService>,
    toaster: Arc<dyn Toaster>,
    count: watch::Receiver<u64>,
    observer: CountObserver,
    quantity: Quantity,
    notification: NotificationState,
    submission: Option<Submission>,
    next_request: u64,
    add_timeout: Option<Duration>,
}

impl CartController {
    /// Mounts a controller for `product`. The current cart count becomes the baseline.
    pub fn mount(product: Product, cart: Arc<dyn CartService>, toaster: Arc<dyn Toaster>) -> Self {
        let mut count = cart.cart_count();
        let mut observer = CountObserver::new();
        let baseline = *count.borrow_and_update();
        observer.observe(baseline);
        debug!(id = %product.id, baseline, "Cart controller mounted");

        Self {
            product,
            cart,
            toaster,
            count,
            observer,
            quantity: Quantity::ONE,
            notification: NotificationState::Idle,
            submission: None,
            next_request: 0,
            add_timeout: None,
        }
    }

    /// Expires a pending add that is not confirmed within `timeout`.
    pub fn with_add_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.add_timeout = timeout;
        self
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn notification(&self) -> NotificationState {
        self.notification
    }

    pub fn increment_quantity(&mut self) -> Quantity {
        self.quantity = self.quantity.increment();
        self.quantity
    }

    /// No-op at one.
    pub fn decrement_quantity(&mut self) -> Quantity {
        self.quantity = self.quantity.decrement();
        self.quantity
    }

    pub fn can_decrement(&self) -> bool {
        self.quantity.can_decrement()
    }

    pub fn can_submit(&self) -> bool {
        !self.notification.is_pending()
    }

    /// Opens a pending notification for the current quantity and hands the add to the cart.
    pub async fn submit_add(&mut self) -> Result<RequestId, CartError> {
        if let NotificationState::Pending { request, .. } = self.notification {
            debug!(%request, "Add rejected while another is pending");
            return Err(CartError::AddInFlight(request));
        }

        self.next_request += 1;
        let request = RequestId(self.next_request);
        let quantity = self.quantity;

        let toast = self.toaster.loading(&loading_message(quantity));
        self.notification = NotificationState::Pending { request, quantity };
        self.submission = Some(Submission {
            toast,
            deadline: self.add_timeout.map(|timeout| Instant::now() + timeout),
        });
        info!(id = %self.product.id, %request, %quantity, "Add submitted");

        self.cart.add_item(&self.product, quantity).await;
        Ok(request)
    }

    /// Feeds one observed cart count. Returns the request it resolved, if any.
    pub fn on_cart_count(&mut self, count: u64) -> Option<RequestId> {
        if !self.observer.observe(count) {
            return None;
        }

        let NotificationState::Pending { request, quantity } = self.notification else {
            debug!(count, "Cart count changed with no add pending");
            return None;
        };

        self.notification = NotificationState::Resolved { request };
        self.quantity = Quantity::ONE;
        if let Some(submission) = self.submission.take() {
            self.toaster
                .success(submission.toast, &success_message(quantity, &self.product.name));
        }
        info!(id = %self.product.id, %request, count, "Add confirmed");
        Some(request)
    }

    /// Waits for the next cart count change (or the add timeout) and applies it.
    pub async fn next_change(&mut self) -> Result<NotificationState, CartError> {
        let deadline = match (&self.notification, &self.submission) {
            (NotificationState::Pending { .. }, Some(submission)) => submission.deadline,
            _ => None,
        };

        let changed = match deadline {
            Some(deadline) => {
                match tokio::time::timeout_at(deadline, self.count.changed()).await {
                    Ok(changed) => changed,
                    Err(_) => {
                        self.expire();
                        return Ok(self.notification);
                    }
                }
            }
            None => self.count.changed().await,
        };
        changed.map_err(|_| CartError::SignalClosed)?;

        let count = *self.count.borrow_and_update();
        self.on_cart_count(count);
        Ok(self.notification)
    }

    /// Navigation away: a pending notification is discarded, never resolved.
    pub fn leave(mut self) {
        if let NotificationState::Pending { request, .. } = self.notification {
            if let Some(submission) = self.submission.take() {
                self.toaster.dismiss(submission.toast);
            }
            debug!(id = %self.product.id, %request, "Pending add discarded");
        }
    }

    fn expire(&mut self) {
        if let NotificationState::Pending { request, .. } = self.notification {
            self.notification = NotificationState::Expired { request };
            if let Some(submission) = self.submission.take() {
                self.toaster
                    .error(submission.toast, &expired_message(&self.product.name));
            }
            warn!(id = %self.product.id, %request, "Add not confirmed before timeout");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{MemoryCart, RecordingToaster};

    fn mug() -> Product {
        Product::new("sku-1", "Mug", 1200, "usd")
    }

    #[tokio::test]
    async fn test_quantity_controls() {
        let cart = Arc::new(MemoryCart::new());
        let mut controller = CartController::mount(mug(), cart, Arc::new(RecordingToaster::new()));

        assert!(!controller.can_decrement());
        assert_eq!(controller.decrement_quantity(), Quantity::ONE);
        controller.increment_quantity();
        controller.increment_quantity();
        assert!(controller.can_decrement());
        assert_eq!(controller.decrement_quantity().get(), 2);
    }

    #[tokio::test]
    async fn test_count_change_without_submission_is_ignored() {
        let toaster = Arc::new(RecordingToaster::new());
        let mut controller =
            CartController::mount(mug(), Arc::new(MemoryCart::new()), toaster.clone());

        assert_eq!(controller.on_cart_count(4), None);
        assert_eq!(controller.notification(), NotificationState::Idle);
        assert!(toaster.events().is_empty());
    }

    #[tokio::test]
    async fn test_second_submit_rejected_while_pending() {
        let toaster = Arc::new(RecordingToaster::new());
        let mut controller =
            CartController::mount(mug(), Arc::new(MemoryCart::silent(0)), toaster.clone());

        let first = controller.submit_add().await.unwrap();
        assert!(!controller.can_submit());
        assert_eq!(
            controller.submit_add().await,
            Err(CartError::AddInFlight(first))
        );
        assert_eq!(toaster.events().len(), 1);
    }

    #[tokio::test]
    async fn test_resolution_resets_quantity() {
        let toaster = Arc::new(RecordingToaster::new());
        let mut controller =
            CartController::mount(mug(), Arc::new(MemoryCart::silent(2)), toaster.clone());
        controller.increment_quantity();

        let request = controller.submit_add().await.unwrap();
        assert_eq!(controller.on_cart_count(4), Some(request));
        assert_eq!(controller.quantity(), Quantity::ONE);
        assert_eq!(toaster.successes(), vec!["2 Mug added".to_string()]);
        assert!(controller.can_submit());
    }
}
