use vin_core::entities::InventoryHistory;
use vin_core::enums::OperationType;

use crate::{ApiRequest, ClientError, VinClient};

impl VinClient {
    /// `POST /inventory-history`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn record_history(
        &self,
        component_id: i64,
        user_id: &str,
        operation: OperationType,
    ) -> Result<InventoryHistory, ClientError> {
        let entry = InventoryHistory::record(component_id, user_id, operation);
        tracing::debug!(component_id, user_id, operation = %operation, "recording history");
        let request = ApiRequest::post("/inventory-history").with_json(&entry)?;
        self.fetch(request, "history entry").await
    }

    /// Assign a component to a user (records `Assigned`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn assign_component(
        &self,
        component_id: i64,
        user_id: &str,
    ) -> Result<InventoryHistory, ClientError> {
        self.record_history(component_id, user_id, OperationType::Assigned)
            .await
    }

    /// Return a component from its current assignee (records `Returned`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAssigned`] if the component is not in use or
    /// its last interactant is no longer a known user; otherwise any request
    /// error.
    pub async fn return_component(&self, component_id: i64) -> Result<InventoryHistory, ClientError> {
        let interactant = self.last_interactant(component_id).await?;
        let user = &interactant.last_interactant_user;
        if !interactant.component_status.is_assigned() || user.id.trim().is_empty() {
            return Err(ClientError::NotAssigned { component_id });
        }
        self.record_history(component_id, &user.id, OperationType::Returned)
            .await
    }
}
