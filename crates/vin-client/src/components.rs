use futures::future::join_all;
use vin_core::entities::{
    Component, ComponentPatch, CreateComponentRequest, InventoryHistory, NewComponent,
};
use vin_core::enums::FilterAttribute;
use vin_core::filter::ComponentFilter;
use vin_core::responses::{
    ApiMessage, AttributeValue, ComponentDetails, ComponentImages, LastInteractant,
};
use vin_core::validation::{validate_component, validate_numeric_specs};
use vin_core::ValidationError;

use crate::{ApiRequest, ClientError, FilePart, VinClient};

impl VinClient {
    /// `GET /components` with filters, search and sorting.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn list_components(
        &self,
        filter: &ComponentFilter,
    ) -> Result<Vec<Component>, ClientError> {
        let request = ApiRequest::get("/components").with_query(filter.query_pairs());
        self.fetch_list(request, "components").await
    }

    /// Listing with the current assignee filled in for every component that
    /// is `Being Used`. A failed assignee lookup is logged and leaves `user`
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] only if the listing itself fails.
    pub async fn list_components_with_assignees(
        &self,
        filter: &ComponentFilter,
    ) -> Result<Vec<Component>, ClientError> {
        let components = self.list_components(filter).await?;
        let lookups = components.into_iter().map(|mut component| async move {
            component.user = None;
            if component.status.is_assigned() {
                match self.last_interactant(component.id).await {
                    Ok(found) => component.user = Some(found.last_interactant_user),
                    Err(error) => tracing::warn!(
                        component_id = component.id,
                        %error,
                        "failed to fetch last interactant"
                    ),
                }
            }
            component
        });
        Ok(join_all(lookups).await)
    }

    /// `GET /components/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn get_component(&self, id: i64) -> Result<Component, ClientError> {
        self.fetch(ApiRequest::get(format!("/components/{id}")), "component")
            .await
    }

    /// Component plus its type, current assignee and image URLs. Lookups
    /// other than the component itself are best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the component cannot be fetched.
    pub async fn component_details(&self, id: i64) -> Result<ComponentDetails, ClientError> {
        let component = self.get_component(id).await?;
        let in_use = component.status.is_assigned();

        let (component_type, interactant, images) = tokio::join!(
            self.get_type(component.type_id),
            async {
                if in_use {
                    Some(self.last_interactant(id).await)
                } else {
                    None
                }
            },
            self.component_images(id),
        );

        let component_type = component_type
            .inspect_err(|error| tracing::warn!(component_id = id, %error, "failed to fetch component type"))
            .ok();
        let last_interactant = interactant.and_then(|result| {
            result
                .inspect_err(|error| tracing::warn!(component_id = id, %error, "failed to fetch last interactant"))
                .ok()
                .map(|found| found.last_interactant_user)
        });
        let images = images
            .inspect_err(|error| tracing::warn!(component_id = id, %error, "failed to fetch images"))
            .unwrap_or_default();

        Ok(ComponentDetails {
            component,
            component_type,
            last_interactant,
            images,
        })
    }

    /// Validate against the component's type, then `POST /components` on
    /// behalf of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before sending anything if the
    /// component is incomplete; otherwise any request error.
    pub async fn create_component(
        &self,
        component: NewComponent,
        user_id: &str,
    ) -> Result<Component, ClientError> {
        if component.type_id <= 0 {
            return Err(ValidationError::MissingType.into());
        }
        validate_numeric_specs(&component)?;
        let component_type = self.get_type(component.type_id).await?;
        validate_component(&component, &component_type)?;

        let body = CreateComponentRequest {
            component,
            user_id: user_id.to_string(),
        };
        let request = ApiRequest::post("/components").with_json(&body)?;
        let created: Component = self.fetch(request, "component").await?;
        tracing::info!(component_id = created.id, "component created");
        Ok(created)
    }

    /// Fetch, apply `patch`, validate against the (possibly new) type and
    /// `PUT /components/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the patched component is
    /// incomplete; otherwise any request error.
    pub async fn update_component(
        &self,
        id: i64,
        patch: ComponentPatch,
    ) -> Result<Component, ClientError> {
        let mut component = self.get_component(id).await?;
        patch.apply(&mut component);
        validate_numeric_specs(&component)?;
        let component_type = self.get_type(component.type_id).await?;
        validate_component(&component, &component_type)?;
        self.put_component(&component).await
    }

    /// `PUT /components/{id}` with a full component body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn put_component(&self, component: &Component) -> Result<Component, ClientError> {
        let mut body = component.clone();
        body.user = None;
        let request = ApiRequest::put(format!("/components/{}", component.id)).with_json(&body)?;
        self.fetch(request, "component").await
    }

    /// `PUT /components/{id}/activate/{userId}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn activate_component(&self, id: i64, user_id: &str) -> Result<(), ClientError> {
        let path = format!("/components/{id}/activate/{}", urlencoding::encode(user_id));
        self.fetch_unit(ApiRequest::put(path)).await
    }

    /// `PUT /components/{id}/deactivate/{userId}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn deactivate_component(&self, id: i64, user_id: &str) -> Result<(), ClientError> {
        let path = format!("/components/{id}/deactivate/{}", urlencoding::encode(user_id));
        self.fetch_unit(ApiRequest::put(path)).await
    }

    /// `GET /components/{id}/last-interactant`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails (404 when the component
    /// has no history).
    pub async fn last_interactant(&self, id: i64) -> Result<LastInteractant, ClientError> {
        let path = format!("/components/{id}/last-interactant");
        self.fetch(ApiRequest::get(path), "last interactant").await
    }

    /// `GET /components/{id}/inventory-history`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn component_history(&self, id: i64) -> Result<Vec<InventoryHistory>, ClientError> {
        let path = format!("/components/{id}/inventory-history");
        self.fetch_list(ApiRequest::get(path), "inventory history").await
    }

    /// Component history with each entry's user resolved, newest first.
    /// Failed user lookups are logged and leave `user` empty.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] only if the history itself cannot be fetched.
    pub async fn component_history_with_users(
        &self,
        id: i64,
    ) -> Result<Vec<InventoryHistory>, ClientError> {
        let entries = self.component_history(id).await?;
        let lookups = entries.into_iter().map(|mut entry| async move {
            match self.get_user(&entry.user_id).await {
                Ok(user) => entry.user = Some(user),
                Err(error) => tracing::warn!(
                    user_id = %entry.user_id,
                    %error,
                    "failed to fetch history user"
                ),
            }
            entry
        });
        let mut entries = join_all(lookups).await;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    /// `GET /components/{attribute}/uniquevalue`, blanks dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn unique_values(
        &self,
        attribute: FilterAttribute,
    ) -> Result<Vec<AttributeValue>, ClientError> {
        let path = format!("/components/{}/uniquevalue", attribute.as_str());
        let values: Vec<AttributeValue> = self.fetch_list(ApiRequest::get(path), "values").await?;
        Ok(values.into_iter().filter(|v| !v.is_blank()).collect())
    }

    /// `GET /components/{id}/image`: pre-signed image URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn component_images(&self, id: i64) -> Result<Vec<String>, ClientError> {
        let path = format!("/components/{id}/image");
        let images: ComponentImages = self.fetch(ApiRequest::get(path), "images").await?;
        Ok(images.images)
    }

    /// `POST /components/{id}/image` as multipart, one `image` part per file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn upload_images(
        &self,
        id: i64,
        files: Vec<FilePart>,
    ) -> Result<ApiMessage, ClientError> {
        let request = ApiRequest::post(format!("/components/{id}/image")).with_files(files);
        self.fetch(request, "upload response").await
    }
}
