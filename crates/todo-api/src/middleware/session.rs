//! Session cookie authentication

use axum::{
    extract::{Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, Method,
    },
    middleware::Next,
    response::Response,
};
use todo_core::repositories::TaskStore;
use todo_security::SessionToken;
use todo_shared::config::SessionSettings;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the session cookie to an [`Identity`](todo_core::domain::Identity)
/// for the handler and re-issues the cookie on the way out. Pre-flight
/// requests pass through untouched.
pub async fn require_session<S: TaskStore>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if *request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let credential = session_cookie_value(request.headers(), &state.session.cookie_name);
    let authenticated = state.authenticator.authenticate(credential.as_deref()).await?;
    debug!("Authenticated user {}", authenticated.identity.user_id);

    request.extensions_mut().insert(authenticated.identity);
    let mut response = next.run(request).await;
    attach_refreshed_cookie(&mut response, &state.session, authenticated.refreshed.as_ref());

    Ok(response)
}

/// Appends the refreshed session cookie. The handler's response stands even
/// when no cookie can be built.
fn attach_refreshed_cookie(response: &mut Response, settings: &SessionSettings, token: Option<&SessionToken>) {
    let Some(token) = token else {
        return;
    };

    match session_cookie(settings, token) {
        Ok(cookie) => {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
        Err(e) => warn!("Session cookie not refreshed: {}", e),
    }
}

/// Value of the named cookie across all `Cookie` headers.
pub fn session_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

/// `Set-Cookie` value carrying `token` for one session window.
pub fn session_cookie(settings: &SessionSettings, token: &SessionToken) -> Result<HeaderValue, ApiError> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
        settings.cookie_name, token.value, settings.ttl_seconds
    );
    if settings.secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::InternalError(format!("invalid session cookie: {}", e)))
}
