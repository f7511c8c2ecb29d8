use std::{sync::Arc, time::Duration};

use log::trace;
use reqwest::Client;

use crate::{
    db_types::{Decision, OrderId},
    traits::{DecisionApiError, DecisionService},
};

/// A [`DecisionService`] client for a REST decision endpoint.
///
/// One `GET {base}/decisions/{order_id}` round trip per order, expecting a JSON body
/// `{"status": "...", "payload": n}`. No retries; a transport failure or a non-2xx response surfaces as a
/// [`DecisionApiError`] for the engine to map.
#[derive(Debug, Clone)]
pub struct HttpDecisionService {
    base_url: String,
    client: Arc<Client>,
}

impl HttpDecisionService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DecisionApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder().timeout(timeout).build().map_err(|e| DecisionApiError::Initialization(e.to_string()))?;
        Ok(Self { base_url, client: Arc::new(client) })
    }

    fn url(&self, order_id: OrderId) -> String {
        format!("{}/decisions/{}", self.base_url, order_id.value())
    }
}

impl DecisionService for HttpDecisionService {
    async fn decide(&self, order_id: OrderId) -> Result<Decision, DecisionApiError> {
        let url = self.url(order_id);
        trace!("🛰️ Requesting decision: {url}");
        let response = self.client.get(&url).send().await.map_err(|e| DecisionApiError::RequestError(e.to_string()))?;
        if response.status().is_success() {
            let decision = response.json::<Decision>().await.map_err(|e| DecisionApiError::JsonError(e.to_string()))?;
            trace!("🛰️ Decision for order {order_id}: [{}] payload {}", decision.status, decision.payload);
            Ok(decision)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| DecisionApiError::RequestError(e.to_string()))?;
            Err(DecisionApiError::QueryError { status, message })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_urls_without_double_slashes() {
        let service = HttpDecisionService::new("http://localhost:9000/", Duration::from_secs(10)).unwrap();
        assert_eq!(service.url(OrderId(42)), "http://localhost:9000/decisions/42");
    }
}
