//! Home page sections and their fallback policy.
//!
//! Each section decides on its own what to show when the API fails or returns
//! nothing; marketing content is never left broken.

use crate::client::ApiClient;
use crate::errors::AppError;
use crate::models::{Id, Project, ProjectCategory, Service, TeamMember};

use super::fallback;

/// Project shown on the work grid or as a related project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard {
    /// `None` for built-in projects, which have no detail page
    pub id: Option<Id>,
    pub title: String,
    pub category: ProjectCategory,
    pub description: String,
    pub location: String,
    pub image: String,
}

impl ProjectCard {
    pub fn href(&self) -> Option<String> {
        self.id.map(|id| format!("/project/{}", id))
    }

    pub fn category_label(&self) -> &'static str {
        self.category.label()
    }
}

impl From<Project> for ProjectCard {
    fn from(project: Project) -> Self {
        Self {
            id: Some(project.id),
            title: project.title,
            category: project.category,
            description: project.description,
            location: project.location,
            image: project.image,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCard {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
}

impl From<Service> for ServiceCard {
    fn from(service: Service) -> Self {
        Self {
            title: service.title,
            description: service.description,
            features: service.features,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberCard {
    pub name: String,
    pub role: String,
    pub description: String,
    pub image: String,
}

impl From<TeamMember> for MemberCard {
    fn from(member: TeamMember) -> Self {
        Self {
            name: member.name,
            role: member.role,
            description: member.description,
            image: member.image,
        }
    }
}

/// A filter button: label, target link and whether it is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// Everything the home page shows that comes from the API.
#[derive(Debug, Clone)]
pub struct HomeSections {
    pub project_count: usize,
    pub services: Vec<ServiceCard>,
    pub work: Vec<ProjectCard>,
    pub team: Vec<MemberCard>,
}

impl HomeSections {
    /// Fetch projects, team and services concurrently and apply each section's policy.
    pub async fn load(api: &ApiClient) -> Self {
        let (projects, team, services) = tokio::join!(
            api.fetch_projects(),
            api.fetch_team_members(),
            api.fetch_services()
        );

        Self {
            project_count: hero_project_count(&projects),
            services: services_section(services),
            work: work_section(projects),
            team: team_section(team),
        }
    }
}

/// Hero statistic: number of projects, 0 when unavailable.
pub fn hero_project_count(projects: &Result<Vec<Project>, AppError>) -> usize {
    projects.as_ref().map(Vec::len).unwrap_or(0)
}

/// API services by display order, or the built-in list.
pub fn services_section(services: Result<Vec<Service>, AppError>) -> Vec<ServiceCard> {
    match services {
        Ok(mut services) if !services.is_empty() => {
            services.sort_by_key(|s| s.order);
            services.into_iter().map(ServiceCard::from).collect()
        }
        Ok(_) => fallback::services(),
        Err(e) => {
            tracing::warn!("Services unavailable, showing defaults: {}", e);
            fallback::services()
        }
    }
}

/// API projects, or the built-in projects.
pub fn work_section(projects: Result<Vec<Project>, AppError>) -> Vec<ProjectCard> {
    match projects {
        Ok(projects) if !projects.is_empty() => {
            projects.into_iter().map(ProjectCard::from).collect()
        }
        Ok(_) => fallback::projects(),
        Err(e) => {
            tracing::warn!("Projects unavailable, showing defaults: {}", e);
            fallback::projects()
        }
    }
}

/// API members except the CEO, or the built-in members.
pub fn team_section(team: Result<Vec<TeamMember>, AppError>) -> Vec<MemberCard> {
    match team {
        Ok(members) => {
            let others: Vec<MemberCard> = members
                .into_iter()
                .filter(|m| !m.is_ceo)
                .map(MemberCard::from)
                .collect();
            if others.is_empty() {
                fallback::team()
            } else {
                others
            }
        }
        Err(e) => {
            tracing::warn!("Team unavailable, showing defaults: {}", e);
            fallback::team()
        }
    }
}

/// Keep the projects of `category`; `None` keeps all.
pub fn filter_work(work: Vec<ProjectCard>, category: Option<ProjectCategory>) -> Vec<ProjectCard> {
    match category {
        Some(category) => work.into_iter().filter(|p| p.category == category).collect(),
        None => work,
    }
}

/// Work filter buttons.
pub fn work_filters(active: Option<ProjectCategory>) -> Vec<FilterLink> {
    let mut filters = vec![FilterLink {
        label: "All Projects".to_string(),
        href: "/#work".to_string(),
        active: active.is_none(),
    }];
    filters.extend(ProjectCategory::ALL.iter().map(|category| FilterLink {
        label: category.label().to_string(),
        href: format!("/?category={}#work", category.as_str()),
        active: active == Some(*category),
    }));
    filters
}

/// Up to three other projects in the same category.
pub fn related_projects(all: Vec<Project>, current: &Project) -> Vec<ProjectCard> {
    all.into_iter()
        .filter(|p| p.category == current.category && p.id != current.id)
        .take(3)
        .map(ProjectCard::from)
        .collect()
}
