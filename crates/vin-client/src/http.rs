//! Response status and body helpers.

use serde::de::DeserializeOwned;
use vin_core::responses::ApiErrorBody;

use crate::error::ClientError;

/// Pass successful responses through; turn the rest into errors carrying the
/// server's message.
///
/// - **401** → [`ClientError::Unauthorized`]
/// - **other non-success** → [`ClientError::Api`]
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = error_message(&resp.text().await.unwrap_or_default());
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized { message });
    }
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

/// `{"error": "..."}` when present, otherwise the trimmed body.
#[must_use]
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map_or_else(|_| body.trim().to_string(), |parsed| parsed.error)
}

/// Read and parse a JSON body.
pub async fn decode<T: DeserializeOwned>(
    resp: reqwest::Response,
    what: &str,
) -> Result<T, ClientError> {
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| ClientError::Parse(format!("{what}: {e}")))
}

/// Parse a JSON array, treating `null` as empty.
pub async fn decode_list<T: DeserializeOwned>(
    resp: reqwest::Response,
    what: &str,
) -> Result<Vec<T>, ClientError> {
    let items: Option<Vec<T>> = decode(resp, what).await?;
    Ok(items.unwrap_or_default())
}
