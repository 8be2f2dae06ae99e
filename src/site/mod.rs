//! Public marketing site: home page, project detail and the contact form.

mod fallback;
mod sections;

pub use sections::*;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{ContactForm, Id, ProjectCategory};
use crate::views::{current_year, render, ContactView, HomePage, ProjectMissingPage, ProjectPage};
use crate::AppState;

const CONTACT_SENT: &str = "Message sent successfully! We'll get back to you soon.";
const CONTACT_FAILED: &str = "Failed to send message. Please try again.";

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// GET /
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>, AppError> {
    let category = query.category.as_deref().and_then(ProjectCategory::parse);
    let page = home_page(&state, category, ContactView::default()).await;
    render(&page)
}

/// POST /contact
pub async fn contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
    let outcome = match form.validate() {
        Ok(request) => state.api.submit_contact_form(&request).await,
        Err(e) => Err(e),
    };

    let (status, contact) = match outcome {
        Ok(()) => {
            tracing::info!("Contact message submitted");
            (
                StatusCode::OK,
                ContactView {
                    notice: Some(CONTACT_SENT.to_string()),
                    ..Default::default()
                },
            )
        }
        Err(e) => {
            tracing::warn!("Contact submission failed: {}", e);
            let alert = match &e {
                AppError::Validation(_) | AppError::Api { .. } => e.message(),
                _ => CONTACT_FAILED.to_string(),
            };
            (
                e.status_code(),
                ContactView {
                    full_name: form.full_name,
                    email: form.email,
                    phone: form.phone,
                    message: form.message,
                    notice: None,
                    alert: Some(alert),
                },
            )
        }
    };

    let page = home_page(&state, None, contact).await;
    Ok((status, render(&page)?).into_response())
}

/// GET /project/{id}
pub async fn project_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Ok(id) = id.trim().parse::<Id>() else {
        return project_missing(StatusCode::NOT_FOUND, "Project not found".to_string());
    };

    let project = match state.api.fetch_project(id).await {
        Ok(project) => project,
        Err(e) => {
            tracing::warn!(id, "Project detail unavailable: {}", e);
            return project_missing(e.status_code(), e.message());
        }
    };

    let related = match state.api.fetch_projects().await {
        Ok(all) => related_projects(all, &project),
        Err(e) => {
            tracing::warn!("Related projects unavailable: {}", e);
            Vec::new()
        }
    };

    let page = ProjectPage {
        project,
        related,
        year: current_year(),
    };
    Ok(render(&page)?.into_response())
}

fn project_missing(status: StatusCode, message: String) -> Result<Response, AppError> {
    let page = ProjectMissingPage {
        message,
        year: current_year(),
    };
    Ok((status, render(&page)?).into_response())
}

async fn home_page(
    state: &AppState,
    category: Option<ProjectCategory>,
    contact: ContactView,
) -> HomePage {
    let sections = HomeSections::load(&state.api).await;
    HomePage {
        project_count: sections.project_count,
        services: sections.services,
        work: filter_work(sections.work, category),
        filters: work_filters(category),
        team: sections.team,
        contact,
        year: current_year(),
    }
}
