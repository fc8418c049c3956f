//! Loopback stand-in for the Vinventory API and fake identity sessions.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use async_trait::async_trait;
use vin_auth::{
    Account, AuthError, IdentitySession, MemoryTokenStore, SessionFactory, TokenResult, TokenStore,
};
use vin_client::{ClientOptions, VinClient};
use vin_core::responses::RemoteAuthConfig;

const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    /// Path under the API prefix, including the query string.
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Seen {
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or_default()
    }
}

struct Route {
    method: String,
    path: String,
    replies: VecDeque<(u16, String)>,
}

#[derive(Default)]
struct State {
    routes: Vec<Route>,
    seen: Vec<Seen>,
}

/// Scripted HTTP server. Each route answers its queued replies in order and
/// repeats the last one once the queue is down to a single reply.
pub struct MockApi {
    server: Arc<tiny_http::Server>,
    base: String,
    state: Arc<Mutex<State>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MockApi {
    pub fn start() -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("bind mock api"));
        let port = server.server_addr().to_ip().expect("ip addr").port();
        let state = Arc::new(Mutex::new(State::default()));

        let handle = {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let header = |name: &'static str| {
                        request
                            .headers()
                            .iter()
                            .find(|h| h.field.equiv(name))
                            .map(|h| h.value.as_str().to_string())
                    };
                    let authorization = header("Authorization");
                    let content_type = header("Content-Type");
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);

                    let url = request
                        .url()
                        .strip_prefix(API_PREFIX)
                        .unwrap_or(request.url())
                        .to_string();
                    let method = request.method().as_str().to_string();
                    let path = url.split('?').next().unwrap_or_default().to_string();

                    let (status, reply) = {
                        let mut state = state.lock().unwrap();
                        state.seen.push(Seen {
                            method: method.clone(),
                            url: url.clone(),
                            authorization,
                            content_type,
                            body,
                        });
                        state
                            .routes
                            .iter_mut()
                            .find(|r| r.method == method && r.path == path)
                            .map_or_else(
                                || (404, r#"{"error":"no route"}"#.to_string()),
                                |route| {
                                    if route.replies.len() > 1 {
                                        route.replies.pop_front().unwrap()
                                    } else {
                                        route.replies.front().cloned().unwrap()
                                    }
                                },
                            )
                    };

                    let response = tiny_http::Response::from_string(reply)
                        .with_status_code(status)
                        .with_header(
                            tiny_http::Header::from_bytes("Content-Type", "application/json")
                                .unwrap(),
                        );
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            server,
            base: format!("http://127.0.0.1:{port}{API_PREFIX}"),
            state,
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> String {
        self.base.clone()
    }

    /// Queue a reply for `method path`.
    pub fn on(&self, method: &str, path: &str, status: u16, body: serde_json::Value) -> &Self {
        self.on_raw(method, path, status, &body.to_string())
    }

    pub fn on_raw(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        let mut state = self.state.lock().unwrap();
        let reply = (status, body.to_string());
        if let Some(route) = state
            .routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            route.replies.push_back(reply);
        } else {
            state.routes.push(Route {
                method: method.to_string(),
                path: path.to_string(),
                replies: VecDeque::from([reply]),
            });
        }
        self
    }

    pub fn requests(&self) -> Vec<Seen> {
        self.state.lock().unwrap().seen.clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Seen> {
        self.requests()
            .into_iter()
            .filter(|s| s.method == method && s.path() == path)
            .collect()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests_to(method, path).len()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// How the fake session answers silent acquisition.
#[derive(Debug, Clone)]
pub enum Silent {
    Succeed(String),
    NeedsInteraction,
    Fail,
}

pub struct FakeSession {
    account: Option<Account>,
    silent: Silent,
    pub silent_calls: AtomicUsize,
    pub interactive_calls: AtomicUsize,
}

impl FakeSession {
    pub fn new(account: Option<Account>, silent: Silent) -> Self {
        Self {
            account,
            silent,
            silent_calls: AtomicUsize::new(0),
            interactive_calls: AtomicUsize::new(0),
        }
    }

    pub fn silent_calls(&self) -> usize {
        self.silent_calls.load(Ordering::SeqCst)
    }

    pub fn interactive_calls(&self) -> usize {
        self.interactive_calls.load(Ordering::SeqCst)
    }
}

pub fn account() -> Account {
    Account {
        home_account_id: "oid-1.tenant-1".into(),
        username: "grace@example.com".into(),
        name: Some("Grace Hopper".into()),
    }
}

fn token_result(token: &str) -> TokenResult {
    TokenResult {
        id_token: token.to_string(),
        access_token: None,
        expires_at: None,
        account: account(),
    }
}

pub const INTERACTIVE_TOKEN: &str = "interactive-token";

#[async_trait]
impl IdentitySession for FakeSession {
    async fn cached_account(&self) -> Option<Account> {
        self.account.clone()
    }

    async fn acquire_token_silently(
        &self,
        _account: &Account,
        _scopes: &[String],
    ) -> Result<TokenResult, AuthError> {
        self.silent_calls.fetch_add(1, Ordering::SeqCst);
        match &self.silent {
            Silent::Succeed(token) => Ok(token_result(token)),
            Silent::NeedsInteraction => {
                Err(AuthError::InteractionRequired("invalid_grant".into()))
            }
            Silent::Fail => Err(AuthError::SilentAcquisitionFailed("network down".into())),
        }
    }

    async fn acquire_token_interactively(
        &self,
        _scopes: &[String],
    ) -> Result<TokenResult, AuthError> {
        self.interactive_calls.fetch_add(1, Ordering::SeqCst);
        Ok(token_result(INTERACTIVE_TOKEN))
    }
}

pub struct FakeFactory {
    session: Arc<FakeSession>,
    pub creates: AtomicUsize,
    pub seen_configs: Mutex<Vec<RemoteAuthConfig>>,
}

impl FakeFactory {
    pub fn new(session: Arc<FakeSession>) -> Self {
        Self {
            session,
            creates: AtomicUsize::new(0),
            seen_configs: Mutex::new(Vec::new()),
        }
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionFactory for FakeFactory {
    async fn create(
        &self,
        config: &RemoteAuthConfig,
    ) -> Result<Arc<dyn IdentitySession>, AuthError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.seen_configs.lock().unwrap().push(config.clone());
        Ok(Arc::clone(&self.session) as Arc<dyn IdentitySession>)
    }
}

pub struct Harness {
    pub api: MockApi,
    pub session: Arc<FakeSession>,
    pub factory: Arc<FakeFactory>,
    pub tokens: Arc<MemoryTokenStore>,
    pub client: VinClient,
}

impl Harness {
    pub fn new(token: Option<&str>, account: Option<Account>, silent: Silent) -> Self {
        let api = MockApi::start();
        api.on(
            "GET",
            "/config",
            200,
            serde_json::json!({"tenantId": "tenant-1", "clientId": "client-1"}),
        );
        let session = Arc::new(FakeSession::new(account, silent));
        let factory = Arc::new(FakeFactory::new(Arc::clone(&session)));
        let tokens = Arc::new(token.map_or_else(MemoryTokenStore::new, MemoryTokenStore::with_token));
        let client = VinClient::new(
            ClientOptions {
                base_url: api.base_url(),
                ..ClientOptions::default()
            },
            Arc::clone(&tokens) as Arc<dyn TokenStore>,
            Arc::clone(&factory) as Arc<dyn SessionFactory>,
        )
        .expect("client builds");
        Self {
            api,
            session,
            factory,
            tokens,
            client,
        }
    }

    /// Signed-in user with a cached account whose silent refresh succeeds.
    pub fn signed_in() -> Self {
        Self::new(
            Some("stored-token"),
            Some(account()),
            Silent::Succeed("fresh-token".into()),
        )
    }
}
