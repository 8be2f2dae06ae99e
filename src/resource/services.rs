//! Services admin schema.

use async_trait::async_trait;

use super::{AdminResource, FormField, ResourceAdmin, SubmittedForm};
use crate::client::ApiClient;
use crate::errors::AppError;
use crate::models::{Id, Service, ServiceDraft};
use crate::session::AuthToken;
use crate::table::{Cell, Column, FieldValue, TableRow};
use crate::AppState;

impl TableRow for Service {
    fn row_key(&self) -> Id {
        self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.into()),
            "title" => Some((&self.title).into()),
            "description" => Some((&self.description).into()),
            "features" => Some(FieldValue::Text(self.features.join(", "))),
            "order" => Some(self.order.into()),
            _ => None,
        }
    }

    fn display_order(&self) -> Option<i64> {
        Some(self.order)
    }
}

pub struct Services;

#[async_trait]
impl AdminResource for Services {
    type Item = Service;
    type Draft = ServiceDraft;

    const SLUG: &'static str = "services";
    const TITLE: &'static str = "Services";
    const SINGULAR: &'static str = "Service";
    const COUNT_SUFFIX: &'static str = "services";
    const ADD_LABEL: &'static str = "Add Service";
    const DELETE_PROMPT: &'static str = "Are you sure you want to delete this service?";
    const SEARCH_PLACEHOLDER: &'static str = "Search services...";
    const SEARCH_KEYS: &'static [&'static str] = &["title", "description"];
    const EMPTY_MESSAGE: &'static str = "No services found";

    fn columns() -> Vec<Column<Service>> {
        vec![
            Column::new("order", "#").sortable(),
            Column::new("title", "Title")
                .sortable()
                .render(|s| Cell::Strong(s.title.clone())),
            Column::new("description", "Description")
                .render(|s| Cell::Muted(s.description.clone())),
            Column::new("features", "Features")
                .render(|s| Cell::Muted(format!("{} feature(s)", s.features.len()))),
        ]
    }

    fn label(item: &Service) -> String {
        item.title.clone()
    }

    fn form(item: Option<&Service>, next_order: i64) -> Vec<FormField> {
        let no_features: Vec<String> = Vec::new();
        vec![
            FormField::text("title", "Title", item.map(|s| s.title.as_str()).unwrap_or(""))
                .required(),
            FormField::number(
                "order",
                "Display Order",
                item.map(|s| s.order).unwrap_or(next_order),
            ),
            FormField::textarea(
                "description",
                "Description",
                item.map(|s| s.description.as_str()).unwrap_or(""),
            )
            .required(),
            FormField::lines(
                "features",
                "Features",
                item.map(|s| &s.features).unwrap_or(&no_features),
            )
            .hint("One feature per line"),
        ]
    }

    fn parse_draft(
        form: &mut SubmittedForm,
        existing: Option<&Service>,
    ) -> Result<ServiceDraft, AppError> {
        let title = form.required("title", "Title")?;
        let description = form.required("description", "Description")?;
        let order = form.number("order", "Display Order")?;

        Ok(ServiceDraft {
            title,
            description,
            features: ServiceDraft::features_from_lines(&form.text("features")),
            order: order.or(existing.map(|s| s.order)),
        })
    }

    fn with_defaults(mut draft: ServiceDraft, next_order: i64) -> ServiceDraft {
        draft.order.get_or_insert(next_order);
        draft
    }

    async fn list(api: &ApiClient, _token: &AuthToken) -> Result<Vec<Service>, AppError> {
        api.fetch_services().await
    }

    async fn create(
        api: &ApiClient,
        token: &AuthToken,
        draft: &ServiceDraft,
    ) -> Result<Service, AppError> {
        api.create_service(token, draft).await
    }

    async fn update(
        api: &ApiClient,
        token: &AuthToken,
        id: Id,
        draft: &ServiceDraft,
    ) -> Result<Service, AppError> {
        api.update_service(token, id, draft).await
    }

    async fn delete(api: &ApiClient, token: &AuthToken, id: Id) -> Result<(), AppError> {
        api.delete_service(token, id).await
    }

    fn admin(state: &AppState) -> &ResourceAdmin<Self> {
        &state.services
    }
}
