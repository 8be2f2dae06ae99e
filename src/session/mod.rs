//! Admin session: the bearer token kept in the browser and its verification state.
//!
//! A [`Session`] is created per request from the `adminToken` cookie, verified
//! against `GET /auth/me`, and torn down on logout. The cookie is the only
//! storage; nothing about the session lives in process-wide state.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::client::ApiClient;
use crate::models::{LoginResponse, User};

/// Cookie holding the admin bearer token.
pub const TOKEN_COOKIE: &str = "adminToken";

/// Opaque bearer token issued by `POST /auth/login`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Where the session is in its verification lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Unknown,
    Checking,
    Authenticated(User),
    Unauthenticated,
}

/// The admin session for one request.
#[derive(Debug)]
pub struct Session {
    token: Option<AuthToken>,
    state: AuthState,
    /// The stored token was rejected and must be removed from the browser
    token_revoked: bool,
}

impl Session {
    /// Load the stored token from the request cookies.
    pub fn load(jar: &CookieJar) -> Self {
        Self {
            token: jar
                .get(TOKEN_COOKIE)
                .map(Cookie::value)
                .filter(|value| !value.is_empty())
                .map(AuthToken::new),
            state: AuthState::Unknown,
            token_revoked: false,
        }
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// True when verification rejected a stored token.
    pub fn token_revoked(&self) -> bool {
        self.token_revoked
    }

    /// Verify the stored token with the API.
    ///
    /// Any failure clears the token; there is no retry.
    pub async fn verify(&mut self, api: &ApiClient) -> &AuthState {
        let Some(token) = self.token.clone() else {
            self.state = AuthState::Unauthenticated;
            return &self.state;
        };

        self.state = AuthState::Checking;
        match api.me(&token).await {
            Ok(user) => {
                tracing::debug!(user_id = user.id, "Admin session verified");
                self.state = AuthState::Authenticated(user);
            }
            Err(e) => {
                tracing::debug!("Stored admin token rejected: {}", e);
                self.token = None;
                self.token_revoked = true;
                self.state = AuthState::Unauthenticated;
            }
        }
        &self.state
    }

    /// Adopt a fresh login and return the cookie that stores its token.
    pub fn login(&mut self, login: LoginResponse, secure: bool) -> Cookie<'static> {
        let cookie = token_cookie(&login.token, secure);
        self.token = Some(AuthToken::new(login.token));
        self.state = AuthState::Authenticated(login.user);
        self.token_revoked = false;
        cookie
    }

    /// Forget the token and user and return the cookie that removes it.
    pub fn logout(&mut self) -> Cookie<'static> {
        self.token = None;
        self.state = AuthState::Unauthenticated;
        removal_cookie()
    }
}

/// Cookie storing `token`.
pub fn token_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Expired, empty token cookie that makes the browser drop it.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}
