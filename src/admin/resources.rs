//! Generic list/create/edit/delete screens for every [`AdminResource`].

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Router,
};

use crate::auth::AdminContext;
use crate::errors::AppError;
use crate::models::Id;
use crate::resource::{AdminResource, ListQuery, SubmittedForm};
use crate::site::FilterLink;
use crate::table::{with_query, DataTable, RowAction, TableRow, TableState, Tone};
use crate::views::{render, AdminChrome, ResourceFormPage, ResourceListPage};
use crate::AppState;

/// Routes for `R` under `/admin/{slug}`.
pub fn routes<R: AdminResource>() -> Router<AppState> {
    let base = format!("/admin/{}", R::SLUG);
    Router::new()
        .route(&base, get(list::<R>).post(create::<R>))
        .route(&format!("{}/new", base), get(new_form::<R>))
        .route(&format!("{}/{{id}}", base), post(update::<R>))
        .route(&format!("{}/{{id}}/edit", base), get(edit_form::<R>))
        .route(&format!("{}/{{id}}/delete", base), post(delete::<R>))
}

/// GET /admin/{slug}
pub async fn list<R: AdminResource>(
    State(state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    R::admin(&state).load(&state.api, &context.token).await?;
    list_page::<R>(&state, &context, &query, None, None, StatusCode::OK).await
}

/// GET /admin/{slug}/new
pub async fn new_form<R: AdminResource>(
    State(state): State<AppState>,
    Extension(context): Extension<AdminContext>,
) -> Result<Response, AppError> {
    let admin = R::admin(&state);
    admin.ensure_loaded(&state.api, &context.token).await?;
    form_page::<R>(&state, &context, None, None, None).await
}

/// POST /admin/{slug}
pub async fn create<R: AdminResource>(
    State(state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let mut form = SubmittedForm::from_multipart(multipart).await?;
    let admin = R::admin(&state);
    if let Err(e) = admin.ensure_loaded(&state.api, &context.token).await {
        tracing::warn!(
            resource = R::SLUG,
            "List unavailable before create, order left to the server: {}",
            e
        );
    }

    let result = match R::parse_draft(&mut form, None) {
        Ok(draft) => admin.create(&state.api, &context.token, draft).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(item) => {
            let notice = format!("{} \"{}\" created", R::SINGULAR, R::label(&item));
            let query = ListQuery::default();
            list_page::<R>(&state, &context, &query, Some(notice), None, StatusCode::OK).await
        }
        Err(e) => form_page::<R>(&state, &context, None, Some(&form), Some(e)).await,
    }
}

/// GET /admin/{slug}/{id}/edit
pub async fn edit_form<R: AdminResource>(
    State(state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    Path(id): Path<Id>,
) -> Result<Response, AppError> {
    let item = R::admin(&state).find(&state.api, &context.token, id).await?;
    form_page::<R>(&state, &context, Some(&item), None, None).await
}

/// POST /admin/{slug}/{id}
pub async fn update<R: AdminResource>(
    State(state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    Path(id): Path<Id>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let mut form = SubmittedForm::from_multipart(multipart).await?;
    let admin = R::admin(&state);
    let existing = admin.find(&state.api, &context.token, id).await?;

    let result = match R::parse_draft(&mut form, Some(&existing)) {
        Ok(draft) => admin.update(&state.api, &context.token, id, draft).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(item) => {
            let notice = format!("{} \"{}\" updated", R::SINGULAR, R::label(&item));
            let query = ListQuery::default();
            list_page::<R>(&state, &context, &query, Some(notice), None, StatusCode::OK).await
        }
        Err(e) => form_page::<R>(&state, &context, Some(&existing), Some(&form), Some(e)).await,
    }
}

/// POST /admin/{slug}/{id}/delete
pub async fn delete<R: AdminResource>(
    State(state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    Path(id): Path<Id>,
) -> Result<Response, AppError> {
    let query = ListQuery::default();
    match R::admin(&state).delete(&state.api, &context.token, id).await {
        Ok(()) => {
            let notice = format!("{} deleted", R::SINGULAR);
            list_page::<R>(&state, &context, &query, Some(notice), None, StatusCode::OK).await
        }
        Err(e) => {
            let status = e.status_code();
            list_page::<R>(&state, &context, &query, None, Some(e.message()), status).await
        }
    }
}

/// Render the list page from local state.
async fn list_page<R: AdminResource>(
    state: &AppState,
    context: &AdminContext,
    query: &ListQuery,
    notice: Option<String>,
    alert: Option<String>,
    status: StatusCode,
) -> Result<Response, AppError> {
    let (items, deleting) = R::admin(state).snapshot().await;
    let count = items.len();
    let filter = query.filter();
    let rows: Vec<R::Item> = items
        .into_iter()
        .filter(|item| filter.map_or(true, |f| R::matches_filter(item, f)))
        .collect();

    let base = format!("/admin/{}", R::SLUG);
    let mut table = DataTable::new(base.clone(), R::columns())
        .search(R::SEARCH_PLACEHOLDER, R::SEARCH_KEYS)
        .empty_message(R::EMPTY_MESSAGE)
        .row_disabled(|item| deleting.contains(&item.row_key()))
        .actions(|item| {
            let id = item.row_key();
            let busy = deleting.contains(&id);
            vec![
                RowAction::link("Edit", format!("/admin/{}/{}/edit", R::SLUG, id)).disabled(busy),
                RowAction::post(
                    if busy { "Deleting..." } else { "Delete" },
                    format!("/admin/{}/{}/delete", R::SLUG, id),
                )
                .confirm(R::DELETE_PROMPT)
                .tone(Tone::Danger)
                .disabled(busy),
            ]
        });
    if let Some(filter) = filter {
        table = table.preserve_query("category", filter);
    }
    let view = table.view(&rows, &TableState::from(&query.table_query()));

    let active_filter = filter.unwrap_or("all");
    let filters = R::filters()
        .into_iter()
        .map(|(value, label)| FilterLink {
            label: label.to_string(),
            href: if value == "all" {
                base.clone()
            } else {
                with_query(&base, &[("category".to_string(), value.to_string())])
            },
            active: value == active_filter,
        })
        .collect();

    let page = ResourceListPage {
        chrome: AdminChrome::new(context, state.poller.count(), R::SLUG),
        title: R::TITLE,
        count,
        count_suffix: R::COUNT_SUFFIX,
        add_href: format!("{}/new", base),
        add_label: R::ADD_LABEL,
        filters,
        notice,
        alert,
        table: view,
    };
    Ok((status, render(&page)?).into_response())
}

/// Render the create/edit form, keeping submitted values after a rejection.
async fn form_page<R: AdminResource>(
    state: &AppState,
    context: &AdminContext,
    existing: Option<&R::Item>,
    submitted: Option<&SubmittedForm>,
    error: Option<AppError>,
) -> Result<Response, AppError> {
    let admin = R::admin(state);
    let mut fields = R::form(existing, admin.next_order().await);
    if let Some(submitted) = submitted {
        for field in &mut fields {
            field.refill(submitted);
        }
    }

    let base = format!("/admin/{}", R::SLUG);
    let (heading, action, submit_label) = match existing {
        Some(item) => (
            format!("Edit {}", R::SINGULAR),
            format!("{}/{}", base, item.row_key()),
            "Update",
        ),
        None => (format!("Add {}", R::SINGULAR), base.clone(), "Create"),
    };

    let status = error
        .as_ref()
        .map(AppError::status_code)
        .unwrap_or(StatusCode::OK);
    let page = ResourceFormPage {
        chrome: AdminChrome::new(context, state.poller.count(), R::SLUG),
        heading,
        action,
        cancel_href: base,
        submit_label,
        fields,
        alert: error.map(|e| e.message()),
    };
    Ok((status, render(&page)?).into_response())
}
