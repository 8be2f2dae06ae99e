//! Multipart bodies for the project and team endpoints.

use reqwest::multipart::{Form, Part};

use crate::errors::AppError;
use crate::models::{ImageUpload, ProjectDraft, TeamDraft};

pub(super) fn project_form(draft: &ProjectDraft) -> Result<Form, AppError> {
    let form = Form::new()
        .text("title", draft.title.clone())
        .text("description", draft.description.clone())
        .text("category", draft.category.as_str())
        .text("location", draft.location.clone())
        .text("featured", draft.featured.to_string());

    with_image(form, draft.image.as_ref())
}

pub(super) fn team_form(draft: &TeamDraft) -> Result<Form, AppError> {
    let mut form = Form::new()
        .text("name", draft.name.clone())
        .text("role", draft.role.clone())
        .text("description", draft.description.clone())
        .text("isCEO", draft.is_ceo.to_string());
    if let Some(order) = draft.order {
        form = form.text("order", order.to_string());
    }

    with_image(form, draft.image.as_ref())
}

fn with_image(form: Form, image: Option<&ImageUpload>) -> Result<Form, AppError> {
    let Some(image) = image else {
        return Ok(form);
    };

    let part = Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.content_type)
        .map_err(|e| AppError::BadRequest(format!("Invalid image type: {}", e)))?;

    Ok(form.part("image", part))
}
