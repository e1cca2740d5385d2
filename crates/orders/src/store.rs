//! Order persistence and customer directory ports.

use storegate_core::BackendError;

use crate::model::OrderDraft;

/// Order persistence collaborator.
pub trait OrderStore: Send + Sync {
    /// Allocate a fresh draft with backend-assigned id and order number.
    /// The draft exists in the backend from this point on, even if the
    /// request later fails.
    fn create_draft(&self) -> Result<OrderDraft, BackendError>;

    /// Recompute the draft total from its lines, shipping and fees.
    fn compute_totals(&self, draft: &mut OrderDraft) -> Result<(), BackendError>;

    /// Persist the draft in its current state.
    fn persist(&self, draft: &OrderDraft) -> Result<(), BackendError>;

    /// Walk the draft lines and decrement tracked stock.
    fn decrement_stock(&self, draft: &OrderDraft) -> Result<(), BackendError>;
}

/// Account lookup collaborator.
pub trait CustomerDirectory: Send + Sync {
    /// Resolve an account id from an email, when one exists.
    fn customer_id_by_email(&self, email: &str) -> Result<Option<i64>, BackendError>;
}
