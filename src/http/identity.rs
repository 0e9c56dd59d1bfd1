//! Caller identity as injected by upstream authentication

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Header a trusted upstream sets to the authenticated user's id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
}

/// Lift [`USER_ID_HEADER`] into an [`Identity`] extension. Requests without a
/// usable header pass through anonymous.
pub async fn forwarded_user(mut request: Request, next: Next) -> Response {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<i64>().ok());

    if let Some(user_id) = user_id {
        request.extensions_mut().insert(Identity { user_id });
    }

    next.run(request).await
}
