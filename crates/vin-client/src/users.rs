use futures::future::join_all;
use vin_core::entities::{User, UserInventoryHistory};
use vin_core::responses::UserPhoto;

use crate::{ApiRequest, ClientError, VinClient};

impl VinClient {
    /// `POST /auth/users`: every directory user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.fetch_list(ApiRequest::post("/auth/users"), "users").await
    }

    /// Users with `photo_url` filled in. Missing photos are logged.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] only if the user listing fails.
    pub async fn list_users_with_photos(&self) -> Result<Vec<User>, ClientError> {
        let users = self.list_users().await?;
        let lookups = users.into_iter().map(|mut user| async move {
            match self.user_photo(&user.id).await {
                Ok(photo) if !photo.trim().is_empty() => user.photo_url = Some(photo),
                Ok(_) => {}
                Err(error) => {
                    tracing::debug!(user_id = %user.id, %error, "failed to fetch user photo");
                }
            }
            user
        });
        Ok(join_all(lookups).await)
    }

    /// `GET /auth/users/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn get_user(&self, id: &str) -> Result<User, ClientError> {
        let path = format!("/auth/users/{}", urlencoding::encode(id));
        self.fetch(ApiRequest::get(path), "user").await
    }

    /// `GET /auth/users/{id}/photo`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn user_photo(&self, id: &str) -> Result<String, ClientError> {
        let path = format!("/auth/users/{}/photo", urlencoding::encode(id));
        let photo: UserPhoto = self.fetch(ApiRequest::get(path), "user photo").await?;
        Ok(photo.photo_url)
    }

    /// `GET /users/{id}/inventory-history`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn user_history(&self, id: &str) -> Result<Vec<UserInventoryHistory>, ClientError> {
        let path = format!("/users/{}/inventory-history", urlencoding::encode(id));
        self.fetch_list(ApiRequest::get(path), "user inventory history")
            .await
    }

    /// User history, newest first, with each component's serial number.
    /// Failed component lookups are logged and leave the serial empty.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] only if the history itself cannot be fetched.
    pub async fn user_history_with_serials(
        &self,
        id: &str,
    ) -> Result<Vec<UserInventoryHistory>, ClientError> {
        let entries = self.user_history(id).await?;
        let lookups = entries.into_iter().map(|mut entry| async move {
            match self.get_component(entry.entry.component_id).await {
                Ok(component) => entry.component_serial_number = Some(component.serial_number),
                Err(error) => tracing::warn!(
                    component_id = entry.entry.component_id,
                    %error,
                    "failed to fetch component for history"
                ),
            }
            entry
        });
        let mut entries = join_all(lookups).await;
        entries.sort_by(|a, b| b.entry.created_at.cmp(&a.entry.created_at));
        Ok(entries)
    }
}
