use crate::db_types::{Decision, OrderId};
use crate::traits::DecisionApiError;

/// The adjudication seam for type B orders.
///
/// A returned [`Decision`] with a non-success status is a business-level rejection; a raised [`DecisionApiError`] is
/// a service-level failure. The engine maps these to `api_error` and `api_failure` respectively, and the two
/// channels must not be conflated.
#[allow(async_fn_in_trait)]
pub trait DecisionService {
    /// Asks the service to adjudicate the given order.
    async fn decide(&self, order_id: OrderId) -> Result<Decision, DecisionApiError>;
}
