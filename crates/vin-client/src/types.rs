use vin_core::entities::{ComponentType, NewComponentType};
use vin_core::validation::validate_component_type;

use crate::{ApiRequest, ClientError, VinClient};

impl VinClient {
    /// `GET /types`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn list_types(&self) -> Result<Vec<ComponentType>, ClientError> {
        self.fetch_list(ApiRequest::get("/types"), "component types")
            .await
    }

    /// `GET /types/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn get_type(&self, id: i64) -> Result<ComponentType, ClientError> {
        self.fetch(ApiRequest::get(format!("/types/{id}")), "component type")
            .await
    }

    /// `POST /types`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a blank name; otherwise any
    /// request error.
    pub async fn create_type(&self, body: &NewComponentType) -> Result<ComponentType, ClientError> {
        validate_component_type(body)?;
        let request = ApiRequest::post("/types").with_json(body)?;
        self.fetch(request, "component type").await
    }

    /// `PUT /types/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a blank name; otherwise any
    /// request error.
    pub async fn update_type(
        &self,
        id: i64,
        body: &NewComponentType,
    ) -> Result<ComponentType, ClientError> {
        validate_component_type(body)?;
        let request = ApiRequest::put(format!("/types/{id}")).with_json(body)?;
        self.fetch(request, "component type").await
    }

    /// `DELETE /types/{id}`. The API refuses while components reference it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn delete_type(&self, id: i64) -> Result<(), ClientError> {
        self.fetch_unit(ApiRequest::delete(format!("/types/{id}")))
            .await
    }
}
