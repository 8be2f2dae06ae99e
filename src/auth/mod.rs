//! Route guard for the admin panel.
//!
//! Every `/admin` route except the login page runs [`require_admin`]: the
//! stored token is verified with the API and only an authenticated session
//! reaches the handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::models::User;
use crate::session::{removal_cookie, AuthToken, Session};
use crate::AppState;

/// Login page path.
pub const LOGIN_PATH: &str = "/admin/login";

/// The verified admin attached to guarded requests.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub user: User,
    pub token: AuthToken,
}

/// Middleware letting only verified admins through.
///
/// A rejected token is removed from the browser and the request is redirected
/// to the login page.
pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let mut session = Session::load(&jar);
    session.verify(&state.api).await;

    let context = match (session.token(), session.user()) {
        (Some(token), Some(user)) => AdminContext {
            user: user.clone(),
            token: token.clone(),
        },
        _ => {
            tracing::debug!(path = %request.uri().path(), "Unauthenticated admin request");
            return login_redirect(jar, session.token_revoked());
        }
    };

    state
        .poller
        .start(state.api.clone(), context.token.clone());
    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Redirect to the login page, optionally removing the stored token.
pub fn login_redirect(jar: CookieJar, clear_token: bool) -> Response {
    if clear_token {
        (jar.add(removal_cookie()), Redirect::to(LOGIN_PATH)).into_response()
    } else {
        Redirect::to(LOGIN_PATH).into_response()
    }
}
