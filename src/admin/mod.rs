//! Admin panel handlers and routes.

mod messages;
mod resources;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Form, Router,
};
use axum_extra::extract::CookieJar;

use crate::auth::{self, AdminContext, LOGIN_PATH};
use crate::errors::AppError;
use crate::models::{sort_newest_first, Credentials};
use crate::resource::{Projects, Services, Team};
use crate::session::{removal_cookie, AuthState, Session};
use crate::views::{render, AdminChrome, DashboardPage, DashboardStats, LoginPage};
use crate::AppState;

/// Dashboard path.
pub const DASHBOARD_PATH: &str = "/admin";

const RECENT_MESSAGES: usize = 5;

/// Admin routes. Everything except login/logout runs behind [`auth::require_admin`].
pub fn routes(state: AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route(DASHBOARD_PATH, get(dashboard))
        .route("/admin/messages", get(messages::list))
        .route("/admin/messages/{id}", get(messages::view))
        .route("/admin/messages/{id}/toggle-read", post(messages::toggle_read))
        .route("/admin/messages/{id}/delete", post(messages::delete))
        .merge(resources::routes::<Projects>())
        .merge(resources::routes::<Team>())
        .merge(resources::routes::<Services>())
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin));

    Router::new()
        .route(LOGIN_PATH, get(login_page).post(login))
        .route("/admin/logout", post(logout))
        .merge(guarded)
}

/// GET /admin/login
pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let mut session = Session::load(&jar);
    if let AuthState::Authenticated(_) = session.verify(&state.api).await {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }

    let page = render(&LoginPage {
        email: String::new(),
        alert: None,
    })?;
    if session.token_revoked() {
        return Ok((jar.add(removal_cookie()), page).into_response());
    }
    Ok(page.into_response())
}

/// POST /admin/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(credentials): Form<Credentials>,
) -> Result<Response, AppError> {
    let email = credentials.email.trim().to_string();
    if email.is_empty() || credentials.password.is_empty() {
        return login_failed(
            email,
            AppError::Validation("Email and password are required".to_string()),
        );
    }

    let credentials = Credentials {
        email: email.clone(),
        password: credentials.password,
    };
    match state.api.login(&credentials).await {
        Ok(response) => {
            tracing::info!(user_id = response.user.id, "Admin logged in");
            let mut session = Session::load(&jar);
            let cookie = session.login(response, state.config.secure_cookies);
            if let Some(token) = session.token() {
                state.poller.start(state.api.clone(), token.clone());
            }
            Ok((jar.add(cookie), Redirect::to(DASHBOARD_PATH)).into_response())
        }
        Err(e) => {
            tracing::warn!("Admin login failed: {}", e);
            login_failed(email, e)
        }
    }
}

fn login_failed(email: String, error: AppError) -> Result<Response, AppError> {
    let status = match error {
        AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::UNAUTHORIZED,
    };
    let page = LoginPage {
        email,
        alert: Some(error.message()),
    };
    Ok((status, render(&page)?).into_response())
}

/// POST /admin/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut session = Session::load(&jar);
    let cookie = session.logout();
    state.poller.stop();
    tracing::info!("Admin logged out");
    (jar.add(cookie), Redirect::to(LOGIN_PATH)).into_response()
}

/// GET /admin
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(context): Extension<AdminContext>,
) -> Result<Html<String>, AppError> {
    let (mut messages, projects, team, services) = tokio::try_join!(
        state.api.fetch_messages(&context.token),
        state.api.fetch_projects(),
        state.api.fetch_team_members(),
        state.api.fetch_services()
    )?;

    let stats = DashboardStats {
        total_messages: messages.len(),
        unread_messages: messages.iter().filter(|m| !m.is_read).count(),
        total_projects: projects.len(),
        total_team_members: team.len(),
        total_services: services.len(),
    };
    state.poller.set_count(stats.unread_messages);

    sort_newest_first(&mut messages);
    messages.truncate(RECENT_MESSAGES);

    render(&DashboardPage {
        chrome: AdminChrome::new(&context, stats.unread_messages, "dashboard"),
        stats,
        recent: messages,
    })
}

/// Fallback for unknown paths: anything under `/admin` goes to the dashboard.
pub async fn not_found(request: Request) -> Response {
    let path = request.uri().path();
    if path == "/admin" || path.starts_with("/admin/") {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }
    AppError::NotFound(format!("No page at {}", path)).into_response()
}
