//! Identity provider configuration.
//!
//! Tenant and client ids are not configured here: the API serves them from
//! `GET /config` and the session is built from that response.

use serde::{Deserialize, Serialize};

fn default_authority_host() -> String {
    String::from("https://login.microsoftonline.com")
}

fn default_scopes() -> Vec<String> {
    ["openid", "profile", "email", "offline_access", "user.read", "User.ReadBasic.All"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_login_timeout_secs() -> u64 {
    120
}

fn default_keyring_service() -> String {
    String::from("vinventory-cli")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Authority host; the tenant id is appended as the path.
    #[serde(default = "default_authority_host")]
    pub authority_host: String,

    /// Scopes requested on login and refresh.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    /// Loopback port for the login redirect. `0` picks a free port.
    #[serde(default)]
    pub redirect_port: u16,

    /// How long to wait for the browser to complete login.
    #[serde(default = "default_login_timeout_secs")]
    pub login_timeout_secs: u64,

    /// OS keychain service name credentials are stored under.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            authority_host: default_authority_host(),
            scopes: default_scopes(),
            redirect_port: 0,
            login_timeout_secs: default_login_timeout_secs(),
            keyring_service: default_keyring_service(),
        }
    }
}

impl AuthConfig {
    /// Full authority URL for a tenant.
    pub fn authority(&self, tenant_id: &str) -> String {
        format!("{}/{tenant_id}", self.authority_host.trim_end_matches('/'))
    }

    pub const fn login_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.login_timeout_secs)
    }
}
