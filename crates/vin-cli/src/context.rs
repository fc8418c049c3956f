use std::sync::Arc;
use std::time::Duration;

use vin_auth::{CredentialStore, EntraOptions, EntraSessionFactory};
use vin_client::{ClientOptions, VinClient};
use vin_config::VinConfig;

/// Everything a command handler needs: the loaded config, the credential
/// store and a client wired to both.
pub struct AppContext {
    pub config: VinConfig,
    pub store: Arc<CredentialStore>,
    pub client: VinClient,
}

impl AppContext {
    /// Build the client and its identity plumbing. No network traffic happens
    /// here; `/config` is fetched on the first refresh or login.
    pub fn init(config: VinConfig) -> anyhow::Result<Self> {
        let store = Arc::new(CredentialStore::new(&config.auth.keyring_service));
        let sessions = Arc::new(EntraSessionFactory::new(
            entra_options(&config),
            Arc::clone(&store),
        ));

        let client = VinClient::new(
            client_options(&config),
            Arc::clone(&store) as Arc<dyn vin_auth::TokenStore>,
            sessions,
        )?;

        tracing::debug!(base_url = client.base_url(), "client ready");
        Ok(Self {
            config,
            store,
            client,
        })
    }

    /// Object id of the signed-in user, required by operations the server
    /// records in the inventory history.
    pub fn require_user_id(&self) -> anyhow::Result<String> {
        self.client
            .current_user_id()
            .ok_or_else(|| anyhow::anyhow!("not authenticated, run 'vin auth login' first"))
    }
}

fn client_options(config: &VinConfig) -> ClientOptions {
    ClientOptions {
        base_url: config.api.normalized_base_url(),
        timeout: Duration::from_secs(config.api.timeout_secs),
        scopes: config.auth.scopes.clone(),
    }
}

fn entra_options(config: &VinConfig) -> EntraOptions {
    EntraOptions {
        authority_host: config.auth.authority_host.clone(),
        redirect_port: config.auth.redirect_port,
        login_timeout: config.auth.login_timeout(),
        http_timeout: Duration::from_secs(config.api.timeout_secs),
    }
}
