//! Cookie-based session attachment.

use super::AppState;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const COOKIE_NAME: &str = "cc_session";

/// Resolve the caller's session, expose it to handlers as an
/// `Extension<SharedSession>`, and issue a cookie when a new one was started.
pub async fn attach(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let requested = session_id(request.headers());
    let (id, session, created) = state.sessions.get_or_create(requested).await;
    if created {
        tracing::debug!("Session: started {}", id);
    }

    request.extensions_mut().insert(session);
    let mut response = next.run(request).await;

    if created
        && let Ok(value) = HeaderValue::from_str(&format!(
            "{COOKIE_NAME}={id}; Path=/; HttpOnly; SameSite=Lax"
        ))
    {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// Session id from the `Cookie` header, if present and well formed
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_from_cookie_header() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {COOKIE_NAME}={id}")).unwrap(),
        );
        assert_eq!(session_id(&headers), Some(id));
    }

    #[test]
    fn test_session_id_ignores_garbage() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id(&headers), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("cc_session=not-a-uuid"),
        );
        assert_eq!(session_id(&headers), None);
    }
}
