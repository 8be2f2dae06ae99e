//! Contact messages inbox.
//!
//! Messages are never created from the admin panel, so the inbox keeps its own
//! small controller instead of going through [`super::AdminResource`].

use std::collections::HashSet;

use tokio::sync::RwLock;

use super::ResourceList;
use crate::client::ApiClient;
use crate::errors::AppError;
use crate::models::{sort_newest_first, Id, Message};
use crate::session::AuthToken;
use crate::table::{Cell, Column, FieldValue, TableRow, Tone};

pub const SEARCH_PLACEHOLDER: &str = "Search messages...";
pub const SEARCH_KEYS: &[&str] = &["fullName", "email", "message"];
pub const EMPTY_MESSAGE: &str = "No messages yet";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this message?";

impl TableRow for Message {
    fn row_key(&self) -> Id {
        self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.into()),
            "fullName" => Some((&self.full_name).into()),
            "email" => self.email.as_ref().map(FieldValue::from),
            "phone" => self.phone.as_ref().map(FieldValue::from),
            "message" => self.message.as_ref().map(FieldValue::from),
            "isRead" => Some(self.is_read.into()),
            "createdAt" => Some((&self.created_at).into()),
            _ => None,
        }
    }
}

pub fn columns() -> Vec<Column<Message>> {
    vec![
        Column::new("isRead", "Status").render(|m| {
            if m.is_read {
                Cell::badge("Read", Tone::Neutral)
            } else {
                Cell::badge("Unread", Tone::Warning)
            }
        }),
        Column::new("fullName", "Name").sortable().render(|m| {
            if m.is_read {
                Cell::Text(m.full_name.clone())
            } else {
                Cell::Strong(m.full_name.clone())
            }
        }),
        Column::new("email", "Email").sortable(),
        Column::new("phone", "Phone"),
        Column::new("createdAt", "Date")
            .sortable()
            .render(|m| Cell::Text(m.created_display())),
    ]
}

/// Local state of the messages screen.
#[derive(Default)]
pub struct Inbox {
    list: RwLock<ResourceList<Message>>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch all messages, newest first.
    pub async fn load(&self, api: &ApiClient, token: &AuthToken) -> Result<(), AppError> {
        let mut messages = api.fetch_messages(token).await?;
        sort_newest_first(&mut messages);
        self.list.write().await.replace_all(messages);
        Ok(())
    }

    pub async fn snapshot(&self) -> (Vec<Message>, HashSet<Id>) {
        let list = self.list.read().await;
        (list.items().to_vec(), list.deleting())
    }

    pub async fn unread_count(&self) -> usize {
        self.list
            .read()
            .await
            .items()
            .iter()
            .filter(|m| !m.is_read)
            .count()
    }

    /// Message from local state, or fetched individually.
    pub async fn find(
        &self,
        api: &ApiClient,
        token: &AuthToken,
        id: Id,
    ) -> Result<Message, AppError> {
        if let Some(message) = self.list.read().await.find(id).cloned() {
            return Ok(message);
        }
        api.fetch_message(token, id).await
    }

    /// Set the read flag of `id` to the state the admin asked for and keep the server's copy.
    pub async fn set_read(
        &self,
        api: &ApiClient,
        token: &AuthToken,
        id: Id,
        is_read: bool,
    ) -> Result<Message, AppError> {
        let updated = api.update_message_read_status(token, id, is_read).await?;
        self.apply(updated.clone()).await;
        Ok(updated)
    }

    /// Replace a known message in place, keeping list order.
    pub async fn apply(&self, message: Message) {
        let mut list = self.list.write().await;
        if list.find(message.id).is_some() {
            list.apply_updated(message);
        }
    }

    /// Delete `id`; a second delete of the same row while one is in flight is rejected.
    pub async fn delete(&self, api: &ApiClient, token: &AuthToken, id: Id) -> Result<(), AppError> {
        if !self.list.write().await.begin_delete(id) {
            return Err(AppError::Conflict(format!(
                "Message {} is already being deleted",
                id
            )));
        }

        let result = api.delete_message(token, id).await;

        let mut list = self.list.write().await;
        list.finish_delete(id);
        if result.is_ok() {
            list.remove(id);
            tracing::info!(id, "Message deleted");
        }
        result
    }

    #[cfg(test)]
    pub(crate) async fn seed(&self, mut messages: Vec<Message>) {
        sort_newest_first(&mut messages);
        self.list.write().await.replace_all(messages);
    }
}
