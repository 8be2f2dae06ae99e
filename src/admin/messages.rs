//! Contact messages screens.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Form,
};

use crate::auth::AdminContext;
use crate::errors::AppError;
use crate::models::{Id, ReadStatusUpdate};
use crate::resource::messages::{
    columns, DELETE_PROMPT, EMPTY_MESSAGE, SEARCH_KEYS, SEARCH_PLACEHOLDER,
};
use crate::table::{DataTable, RowAction, TableQuery, TableState, Tone};
use crate::views::{render, AdminChrome, MessagePage, MessagesPage};
use crate::AppState;

/// GET /admin/messages
pub async fn list(
    State(state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    Query(query): Query<TableQuery>,
) -> Result<Response, AppError> {
    state.inbox.load(&state.api, &context.token).await?;
    state.poller.set_count(state.inbox.unread_count().await);
    messages_page(&state, &context, &query, None, None, StatusCode::OK).await
}

/// GET /admin/messages/{id}
///
/// Opening an unread message marks it read in the background; the page shows
/// it as read whatever the outcome.
pub async fn view(
    State(state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    Path(id): Path<Id>,
) -> Result<Response, AppError> {
    let mut message = state.inbox.find(&state.api, &context.token, id).await?;

    if !message.is_read {
        let api = Arc::clone(&state.api);
        let inbox = Arc::clone(&state.inbox);
        let token = context.token.clone();
        tokio::spawn(async move {
            match api.update_message_read_status(&token, id, true).await {
                Ok(updated) => inbox.apply(updated).await,
                Err(e) => tracing::debug!(id, "Marking message read failed: {}", e),
            }
        });
        message.is_read = true;
    }

    let page = MessagePage {
        chrome: AdminChrome::new(&context, state.poller.count(), "messages"),
        delete_onsubmit: RowAction::post("Delete", "")
            .confirm(DELETE_PROMPT)
            .onsubmit(),
        message,
        alert: None,
    };
    Ok(render(&page)?.into_response())
}

/// POST /admin/messages/{id}/toggle-read
///
/// The form carries the read state the button offered.
pub async fn toggle_read(
    State(state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    Path(id): Path<Id>,
    Form(wanted): Form<ReadStatusUpdate>,
) -> Result<Response, AppError> {
    let query = TableQuery::default();
    match state
        .inbox
        .set_read(&state.api, &context.token, id, wanted.is_read)
        .await
    {
        Ok(updated) => {
            state.poller.set_count(state.inbox.unread_count().await);
            let notice = if updated.is_read {
                "Message marked as read"
            } else {
                "Message marked as unread"
            };
            messages_page(&state, &context, &query, Some(notice.to_string()), None, StatusCode::OK)
                .await
        }
        Err(e) => {
            let status = e.status_code();
            messages_page(&state, &context, &query, None, Some(e.message()), status).await
        }
    }
}

/// POST /admin/messages/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    Path(id): Path<Id>,
) -> Result<Response, AppError> {
    let query = TableQuery::default();
    match state.inbox.delete(&state.api, &context.token, id).await {
        Ok(()) => {
            state.poller.set_count(state.inbox.unread_count().await);
            messages_page(
                &state,
                &context,
                &query,
                Some("Message deleted".to_string()),
                None,
                StatusCode::OK,
            )
            .await
        }
        Err(e) => {
            let status = e.status_code();
            messages_page(&state, &context, &query, None, Some(e.message()), status).await
        }
    }
}

async fn messages_page(
    state: &AppState,
    context: &AdminContext,
    query: &TableQuery,
    notice: Option<String>,
    alert: Option<String>,
    status: StatusCode,
) -> Result<Response, AppError> {
    let (messages, deleting) = state.inbox.snapshot().await;
    let unread = messages.iter().filter(|m| !m.is_read).count();

    let table = DataTable::new("/admin/messages", columns())
        .search(SEARCH_PLACEHOLDER, SEARCH_KEYS)
        .empty_message(EMPTY_MESSAGE)
        .row_href(|m| format!("/admin/messages/{}", m.id))
        .row_disabled(|m| deleting.contains(&m.id))
        .actions(|m| {
            let busy = deleting.contains(&m.id);
            vec![
                RowAction::post(
                    if m.is_read { "Mark as unread" } else { "Mark as read" },
                    format!("/admin/messages/{}/toggle-read", m.id),
                )
                .field("isRead", (!m.is_read).to_string())
                .disabled(busy),
                RowAction::post(
                    if busy { "Deleting..." } else { "Delete" },
                    format!("/admin/messages/{}/delete", m.id),
                )
                .confirm(DELETE_PROMPT)
                .tone(Tone::Danger)
                .disabled(busy),
            ]
        });
    let view = table.view(&messages, &TableState::from(query));

    let page = MessagesPage {
        chrome: AdminChrome::new(context, state.poller.count(), "messages"),
        unread,
        total: messages.len(),
        notice,
        alert,
        table: view,
    };
    Ok((status, render(&page)?).into_response())
}
