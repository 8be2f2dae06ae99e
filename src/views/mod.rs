//! Askama page templates.

use askama::Template;
use axum::response::Html;
use chrono::Datelike;

use crate::auth::AdminContext;
use crate::errors::AppError;
use crate::models::{Message, Project};
use crate::resource::FormField;
use crate::site::{FilterLink, MemberCard, ProjectCard, ServiceCard};
use crate::table::TableView;

/// Render a template into an HTML response body.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

// ==================== PUBLIC ====================

/// Contact form values and outcome.
#[derive(Debug, Clone, Default)]
pub struct ContactView {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub notice: Option<String>,
    pub alert: Option<String>,
}

#[derive(Template)]
#[template(path = "site/home.html")]
pub struct HomePage {
    pub project_count: usize,
    pub services: Vec<ServiceCard>,
    pub work: Vec<ProjectCard>,
    pub filters: Vec<FilterLink>,
    pub team: Vec<MemberCard>,
    pub contact: ContactView,
    pub year: i32,
}

#[derive(Template)]
#[template(path = "site/project.html")]
pub struct ProjectPage {
    pub project: Project,
    pub related: Vec<ProjectCard>,
    pub year: i32,
}

#[derive(Template)]
#[template(path = "site/project_missing.html")]
pub struct ProjectMissingPage {
    pub message: String,
    pub year: i32,
}

// ==================== ADMIN ====================

/// Sidebar and header data shared by every admin page.
#[derive(Debug, Clone)]
pub struct AdminChrome {
    pub user_name: String,
    pub user_email: String,
    pub unread: usize,
    pub active: &'static str,
}

impl AdminChrome {
    pub fn new(context: &AdminContext, unread: usize, active: &'static str) -> Self {
        Self {
            user_name: context.user.display_name().to_string(),
            user_email: context.user.email.clone(),
            unread,
            active,
        }
    }

    pub fn is_active(&self, section: &str) -> bool {
        self.active == section
    }
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginPage {
    pub email: String,
    pub alert: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_messages: usize,
    pub unread_messages: usize,
    pub total_projects: usize,
    pub total_team_members: usize,
    pub total_services: usize,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardPage {
    pub chrome: AdminChrome,
    pub stats: DashboardStats,
    pub recent: Vec<Message>,
}

#[derive(Template)]
#[template(path = "admin/resource_list.html")]
pub struct ResourceListPage {
    pub chrome: AdminChrome,
    pub title: &'static str,
    pub count: usize,
    pub count_suffix: &'static str,
    pub add_href: String,
    pub add_label: &'static str,
    pub filters: Vec<FilterLink>,
    pub notice: Option<String>,
    pub alert: Option<String>,
    pub table: TableView,
}

#[derive(Template)]
#[template(path = "admin/resource_form.html")]
pub struct ResourceFormPage {
    pub chrome: AdminChrome,
    pub heading: String,
    pub action: String,
    pub cancel_href: String,
    pub submit_label: &'static str,
    pub fields: Vec<FormField>,
    pub alert: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/messages.html")]
pub struct MessagesPage {
    pub chrome: AdminChrome,
    pub unread: usize,
    pub total: usize,
    pub notice: Option<String>,
    pub alert: Option<String>,
    pub table: TableView,
}

#[derive(Template)]
#[template(path = "admin/message.html")]
pub struct MessagePage {
    pub chrome: AdminChrome,
    pub message: Message,
    pub delete_onsubmit: String,
    pub alert: Option<String>,
}
