use std::collections::{HashMap, HashSet};

use log::trace;

use crate::{
    db_types::{Decision, OrderId},
    traits::{DecisionApiError, DecisionService},
};

/// An in-process [`DecisionService`] that answers with a configurable default decision, with optional per-order
/// overrides and scripted per-order failures. Serves demos and tests; build it up front, it is immutable once in
/// use.
#[derive(Debug, Clone)]
pub struct StaticDecisionService {
    default: Decision,
    overrides: HashMap<OrderId, Decision>,
    failures: HashSet<OrderId>,
}

impl Default for StaticDecisionService {
    fn default() -> Self {
        Self::new(Decision::success(100))
    }
}

impl StaticDecisionService {
    pub fn new(default: Decision) -> Self {
        Self { default, overrides: HashMap::new(), failures: HashSet::new() }
    }

    /// Answers with the given decision for this order instead of the default.
    pub fn with_decision(mut self, order_id: OrderId, decision: Decision) -> Self {
        self.overrides.insert(order_id, decision);
        self
    }

    /// Raises a service-level failure for this order instead of answering.
    pub fn with_failure(mut self, order_id: OrderId) -> Self {
        self.failures.insert(order_id);
        self
    }
}

impl DecisionService for StaticDecisionService {
    async fn decide(&self, order_id: OrderId) -> Result<Decision, DecisionApiError> {
        if self.failures.contains(&order_id) {
            return Err(DecisionApiError::Unreachable(order_id));
        }
        let decision = self.overrides.get(&order_id).cloned().unwrap_or_else(|| self.default.clone());
        trace!("🛰️ Static decision for order {order_id}: [{}] payload {}", decision.status, decision.payload);
        Ok(decision)
    }
}
