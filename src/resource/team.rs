//! Team members admin schema.

use async_trait::async_trait;

use super::{AdminResource, FormField, ResourceAdmin, SubmittedForm};
use crate::client::ApiClient;
use crate::errors::AppError;
use crate::models::{Id, TeamDraft, TeamMember};
use crate::session::AuthToken;
use crate::table::{Cell, Column, FieldValue, TableRow};
use crate::AppState;

impl TableRow for TeamMember {
    fn row_key(&self) -> Id {
        self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.into()),
            "name" => Some((&self.name).into()),
            "role" => Some((&self.role).into()),
            "description" => Some((&self.description).into()),
            "image" => Some((&self.image).into()),
            "order" => Some(self.order.into()),
            "isCEO" => Some(self.is_ceo.into()),
            _ => None,
        }
    }

    fn display_order(&self) -> Option<i64> {
        Some(self.order)
    }
}

pub struct Team;

#[async_trait]
impl AdminResource for Team {
    type Item = TeamMember;
    type Draft = TeamDraft;

    const SLUG: &'static str = "team";
    const TITLE: &'static str = "Team Members";
    const SINGULAR: &'static str = "Team member";
    const COUNT_SUFFIX: &'static str = "team members";
    const ADD_LABEL: &'static str = "Add Member";
    const DELETE_PROMPT: &'static str = "Are you sure you want to delete this team member?";
    const SEARCH_PLACEHOLDER: &'static str = "Search team members...";
    const SEARCH_KEYS: &'static [&'static str] = &["name", "role"];
    const EMPTY_MESSAGE: &'static str = "No team members found";

    fn columns() -> Vec<Column<TeamMember>> {
        vec![
            Column::new("image", "Photo").render(|m| Cell::image(&m.image, &m.name)),
            Column::new("name", "Name").sortable().render(|m| {
                if m.is_ceo {
                    Cell::Tagged {
                        text: m.name.clone(),
                        tag: "CEO".to_string(),
                    }
                } else {
                    Cell::Strong(m.name.clone())
                }
            }),
            Column::new("role", "Role").sortable(),
            Column::new("order", "Order").sortable(),
        ]
    }

    fn label(item: &TeamMember) -> String {
        item.name.clone()
    }

    fn form(item: Option<&TeamMember>, next_order: i64) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", item.map(|m| m.name.as_str()).unwrap_or("")).required(),
            FormField::text("role", "Role", item.map(|m| m.role.as_str()).unwrap_or("")).required(),
            FormField::textarea(
                "description",
                "Description",
                item.map(|m| m.description.as_str()).unwrap_or(""),
            )
            .required(),
            FormField::number(
                "order",
                "Display Order",
                item.map(|m| m.order).unwrap_or(next_order),
            ),
            FormField::checkbox("isCEO", "Is CEO", item.map(|m| m.is_ceo).unwrap_or(false)),
            FormField::image("image", "Photo", item.map(|m| m.image.as_str()))
                .required_if(item.is_none())
                .hint("Leave empty to keep the current photo"),
        ]
    }

    fn parse_draft(
        form: &mut SubmittedForm,
        existing: Option<&TeamMember>,
    ) -> Result<TeamDraft, AppError> {
        let name = form.required("name", "Name")?;
        let role = form.required("role", "Role")?;
        let description = form.required("description", "Description")?;
        let order = form.number("order", "Display Order")?;

        let image = form.take_file("image");
        if image.is_none() && existing.is_none() {
            return Err(AppError::Validation("Photo is required".to_string()));
        }

        Ok(TeamDraft {
            name,
            role,
            description,
            order: order.or(existing.map(|m| m.order)),
            is_ceo: form.checked("isCEO"),
            image,
        })
    }

    fn with_defaults(mut draft: TeamDraft, next_order: i64) -> TeamDraft {
        draft.order.get_or_insert(next_order);
        draft
    }

    async fn list(api: &ApiClient, _token: &AuthToken) -> Result<Vec<TeamMember>, AppError> {
        api.fetch_team_members().await
    }

    async fn create(
        api: &ApiClient,
        token: &AuthToken,
        draft: &TeamDraft,
    ) -> Result<TeamMember, AppError> {
        api.create_team_member(token, draft).await
    }

    async fn update(
        api: &ApiClient,
        token: &AuthToken,
        id: Id,
        draft: &TeamDraft,
    ) -> Result<TeamMember, AppError> {
        api.update_team_member(token, id, draft).await
    }

    async fn delete(api: &ApiClient, token: &AuthToken, id: Id) -> Result<(), AppError> {
        api.delete_team_member(token, id).await
    }

    fn admin(state: &AppState) -> &ResourceAdmin<Self> {
        &state.team
    }
}
