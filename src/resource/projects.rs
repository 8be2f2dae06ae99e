//! Projects admin schema.

use async_trait::async_trait;

use super::{AdminResource, FormField, ResourceAdmin, SubmittedForm};
use crate::client::ApiClient;
use crate::errors::AppError;
use crate::models::{Id, Project, ProjectCategory, ProjectDraft};
use crate::session::AuthToken;
use crate::table::{Cell, Column, FieldValue, TableRow, Tone};
use crate::AppState;

impl TableRow for Project {
    fn row_key(&self) -> Id {
        self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.into()),
            "title" => Some((&self.title).into()),
            "description" => Some((&self.description).into()),
            "category" => Some(self.category.as_str().into()),
            "location" => Some((&self.location).into()),
            "image" => Some((&self.image).into()),
            "featured" => Some(self.featured.into()),
            "createdAt" => Some((&self.created_at).into()),
            _ => None,
        }
    }
}

pub struct Projects;

#[async_trait]
impl AdminResource for Projects {
    type Item = Project;
    type Draft = ProjectDraft;

    const SLUG: &'static str = "projects";
    const TITLE: &'static str = "Projects";
    const SINGULAR: &'static str = "Project";
    const COUNT_SUFFIX: &'static str = "total projects";
    const ADD_LABEL: &'static str = "Add Project";
    const DELETE_PROMPT: &'static str = "Are you sure you want to delete this project?";
    const SEARCH_PLACEHOLDER: &'static str = "Search projects...";
    const SEARCH_KEYS: &'static [&'static str] = &["title", "location", "description"];
    const EMPTY_MESSAGE: &'static str = "No projects found";

    fn columns() -> Vec<Column<Project>> {
        vec![
            Column::new("image", "Image").render(|p| Cell::image(&p.image, &p.title)),
            Column::new("title", "Title")
                .sortable()
                .render(|p| Cell::Strong(p.title.clone())),
            Column::new("category", "Category").sortable().render(|p| {
                let tone = match p.category {
                    ProjectCategory::Residential => Tone::Info,
                    ProjectCategory::Commercial => Tone::Success,
                };
                Cell::badge(p.category.as_str(), tone)
            }),
            Column::new("location", "Location").sortable(),
            Column::new("featured", "Featured").render(|p| {
                if p.featured {
                    Cell::badge("Yes", Tone::Warning)
                } else {
                    Cell::badge("No", Tone::Neutral)
                }
            }),
        ]
    }

    fn label(item: &Project) -> String {
        item.title.clone()
    }

    fn form(item: Option<&Project>, _next_order: i64) -> Vec<FormField> {
        let categories: Vec<(&str, &str)> = ProjectCategory::ALL
            .iter()
            .map(|c| (c.as_str(), c.label()))
            .collect();
        let category = item.map(|p| p.category).unwrap_or_default();

        vec![
            FormField::text("title", "Title", item.map(|p| p.title.as_str()).unwrap_or(""))
                .required(),
            FormField::textarea(
                "description",
                "Description",
                item.map(|p| p.description.as_str()).unwrap_or(""),
            )
            .required(),
            FormField::select("category", "Category", &categories, category.as_str()),
            FormField::text(
                "location",
                "Location",
                item.map(|p| p.location.as_str()).unwrap_or(""),
            )
            .required(),
            FormField::checkbox(
                "featured",
                "Featured Project",
                item.map(|p| p.featured).unwrap_or(false),
            ),
            FormField::image("image", "Image", item.map(|p| p.image.as_str()))
                .required_if(item.is_none())
                .hint("Leave empty to keep the current image"),
        ]
    }

    fn parse_draft(
        form: &mut SubmittedForm,
        existing: Option<&Project>,
    ) -> Result<ProjectDraft, AppError> {
        let title = form.required("title", "Title")?;
        let description = form.required("description", "Description")?;
        let location = form.required("location", "Location")?;
        let category = ProjectCategory::parse(&form.text("category")).ok_or_else(|| {
            AppError::Validation("Category must be residential or commercial".to_string())
        })?;

        let image = form.take_file("image");
        if image.is_none() && existing.is_none() {
            return Err(AppError::Validation("Image is required".to_string()));
        }

        Ok(ProjectDraft {
            title,
            description,
            category,
            location,
            featured: form.checked("featured"),
            image,
        })
    }

    fn filters() -> Vec<(&'static str, &'static str)> {
        vec![
            ("all", "All"),
            ("residential", "Residential"),
            ("commercial", "Commercial"),
        ]
    }

    fn matches_filter(item: &Project, filter: &str) -> bool {
        item.category.as_str() == filter
    }

    async fn list(api: &ApiClient, _token: &AuthToken) -> Result<Vec<Project>, AppError> {
        api.fetch_projects().await
    }

    async fn create(
        api: &ApiClient,
        token: &AuthToken,
        draft: &ProjectDraft,
    ) -> Result<Project, AppError> {
        api.create_project(token, draft).await
    }

    async fn update(
        api: &ApiClient,
        token: &AuthToken,
        id: Id,
        draft: &ProjectDraft,
    ) -> Result<Project, AppError> {
        api.update_project(token, id, draft).await
    }

    async fn delete(api: &ApiClient, token: &AuthToken, id: Id) -> Result<(), AppError> {
        api.delete_project(token, id).await
    }

    fn admin(state: &AppState) -> &ResourceAdmin<Self> {
        &state.projects
    }
}
