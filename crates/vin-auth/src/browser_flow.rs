//! Loopback redirect listener for the authorization-code login.
//!
//! 1. Bind `tiny_http` on `127.0.0.1:<port>` (`0` picks a free port)
//! 2. Open the browser at the authorize URL (also printed for manual use)
//! 3. Wait in `spawn_blocking` for `/callback?code=..&state=..`

use std::io::Cursor;
use std::time::{Duration, Instant};

use crate::error::AuthError;

pub struct LoopbackListener {
    server: tiny_http::Server,
    redirect_uri: String,
}

impl LoopbackListener {
    /// # Errors
    ///
    /// Returns `AuthError::BrowserFlowFailed` if the port cannot be bound.
    pub fn bind(port: u16) -> Result<Self, AuthError> {
        let server = tiny_http::Server::http(("127.0.0.1", port))
            .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to bind: {e}")))?;
        let bound_port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .ok_or_else(|| AuthError::BrowserFlowFailed("no port".into()))?;
        Ok(Self {
            server,
            redirect_uri: format!("http://127.0.0.1:{bound_port}/callback"),
        })
    }

    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Wait for the identity provider to redirect back with a code.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::BrowserFlowFailed` on timeout, a state mismatch, or
    /// an `error` parameter in the redirect.
    pub async fn wait_for_code(
        self,
        expected_state: String,
        timeout: Duration,
    ) -> Result<String, AuthError> {
        let server = self.server;
        tokio::task::spawn_blocking(move || wait_for_callback(&server, timeout, &expected_state))
            .await
            .map_err(|e| AuthError::BrowserFlowFailed(format!("spawn_blocking join: {e}")))?
    }
}

/// Print the URL and try to open it.
pub fn open_browser(url: &str) {
    eprintln!("Opening browser to: {url}");
    if let Err(error) = open::that(url) {
        eprintln!("Failed to open browser: {error}");
        eprintln!("Open the URL above manually, then return here.");
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

fn parse_callback(query: &str) -> Result<CallbackParams, AuthError> {
    let mut params = CallbackParams::default();
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let decoded = urlencoding::decode(&value.replace('+', " "))
            .map_err(|e| AuthError::BrowserFlowFailed(format!("URL decode: {e}")))?
            .into_owned();
        match key {
            "code" => params.code = Some(decoded),
            "state" => params.state = Some(decoded),
            "error" => params.error = Some(decoded),
            "error_description" => params.error_description = Some(decoded),
            _ => {}
        }
    }
    Ok(params)
}

fn html(body: &str) -> tiny_http::Response<Cursor<Vec<u8>>> {
    let response = tiny_http::Response::from_string(format!("<html><body>{body}</body></html>"));
    match tiny_http::Header::from_bytes("Content-Type", "text/html; charset=utf-8") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

fn timed_out(timeout: Duration) -> AuthError {
    AuthError::BrowserFlowFailed(format!(
        "browser callback timed out after {}s",
        timeout.as_secs()
    ))
}

/// Loops on `recv_timeout()`, answering and skipping anything that is not
/// `/callback` (favicon requests, reloads).
fn wait_for_callback(
    server: &tiny_http::Server,
    timeout: Duration,
    expected_state: &str,
) -> Result<String, AuthError> {
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(timed_out(timeout));
        }

        let request = match server.recv_timeout(remaining) {
            Ok(Some(req)) => req,
            Ok(None) => return Err(timed_out(timeout)),
            Err(e) => return Err(AuthError::BrowserFlowFailed(format!("recv error: {e}"))),
        };

        let url = request.url().to_string();
        let Some(query) = url.strip_prefix("/callback?") else {
            let _ = request.respond(tiny_http::Response::from_string("").with_status_code(204));
            continue;
        };

        let params = parse_callback(query)?;

        if params.state.as_deref() != Some(expected_state) {
            let _ = request.respond(html(
                "<h1>Sign-in failed</h1><p>State mismatch. Check the terminal.</p>",
            ));
            return Err(AuthError::BrowserFlowFailed(
                "state mismatch, possible CSRF".into(),
            ));
        }

        if let Some(error) = params.error {
            let _ = request.respond(html(
                "<h1>Sign-in failed</h1><p>Check the terminal for details.</p>",
            ));
            let detail = params.error_description.unwrap_or_default();
            return Err(AuthError::BrowserFlowFailed(format!("{error}: {detail}")));
        }

        if let Some(code) = params.code {
            let _ = request.respond(html(
                "<h1>Signed in to Vinventory</h1><p>You can close this tab.</p>",
            ));
            return Ok(code);
        }

        let _ = request.respond(html("<h1>Waiting for sign-in</h1>"));
    }
}
