//! Generic admin CRUD over the upstream API.
//!
//! Each managed entity implements [`AdminResource`]: its table columns, form
//! schema, draft parsing and endpoint set. [`ResourceAdmin`] holds the local
//! list state for one entity and applies every mutation from the object the
//! server returns.

mod form;
mod list;
pub mod messages;
mod projects;
mod services;
mod team;

pub use form::{FormField, SubmittedForm};
pub use list::ResourceList;
pub use messages::Inbox;
pub use projects::Projects;
pub use services::Services;
pub use team::Team;

use std::collections::HashSet;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::client::ApiClient;
use crate::errors::AppError;
use crate::models::Id;
use crate::session::AuthToken;
use crate::table::{Column, TableQuery, TableRow};
use crate::AppState;

/// Schema and endpoints of one admin-managed entity.
#[async_trait]
pub trait AdminResource: Send + Sync + Sized + 'static {
    type Item: TableRow + Clone + Send + Sync + 'static;
    type Draft: Send + Sync + 'static;

    /// Path segment under `/admin`.
    const SLUG: &'static str;
    /// Plural heading, e.g. "Projects".
    const TITLE: &'static str;
    /// Singular noun, e.g. "Project".
    const SINGULAR: &'static str;
    /// Text after the row count in the page header, e.g. "total projects".
    const COUNT_SUFFIX: &'static str;
    const ADD_LABEL: &'static str;
    const DELETE_PROMPT: &'static str;
    const SEARCH_PLACEHOLDER: &'static str;
    const SEARCH_KEYS: &'static [&'static str];
    const EMPTY_MESSAGE: &'static str;

    fn columns() -> Vec<Column<Self::Item>>;

    /// Short name used in confirmations and notices.
    fn label(item: &Self::Item) -> String;

    /// Form inputs, blank for a new entry or pre-filled from `item`.
    fn form(item: Option<&Self::Item>, next_order: i64) -> Vec<FormField>;

    /// Validate submitted data. `existing` is the row being edited, if any.
    fn parse_draft(
        form: &mut SubmittedForm,
        existing: Option<&Self::Item>,
    ) -> Result<Self::Draft, AppError>;

    /// Fill defaults that depend on the current list (e.g. `order`).
    fn with_defaults(draft: Self::Draft, _next_order: i64) -> Self::Draft {
        draft
    }

    /// Optional list filter (`?category=`): (value, label) pairs.
    fn filters() -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    fn matches_filter(_item: &Self::Item, _filter: &str) -> bool {
        true
    }

    async fn list(api: &ApiClient, token: &AuthToken) -> Result<Vec<Self::Item>, AppError>;

    async fn create(
        api: &ApiClient,
        token: &AuthToken,
        draft: &Self::Draft,
    ) -> Result<Self::Item, AppError>;

    async fn update(
        api: &ApiClient,
        token: &AuthToken,
        id: Id,
        draft: &Self::Draft,
    ) -> Result<Self::Item, AppError>;

    async fn delete(api: &ApiClient, token: &AuthToken, id: Id) -> Result<(), AppError>;

    /// The controller for this entity held in the app state.
    fn admin(state: &AppState) -> &ResourceAdmin<Self>;
}

/// Query string of a resource list page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ListQuery {
    pub fn table_query(&self) -> TableQuery {
        TableQuery {
            q: self.q.clone(),
            sort: self.sort.clone(),
            dir: self.dir.clone(),
        }
    }

    /// Selected filter, `None` for "all".
    pub fn filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "all")
    }
}

/// Local list state and mutations for one entity.
///
/// No lock is held across an API call.
pub struct ResourceAdmin<R: AdminResource> {
    list: RwLock<ResourceList<R::Item>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: AdminResource> Default for ResourceAdmin<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AdminResource> ResourceAdmin<R> {
    pub fn new() -> Self {
        Self {
            list: RwLock::new(ResourceList::default()),
            _resource: PhantomData,
        }
    }

    /// Fetch the list and replace the local state. A failure leaves it untouched.
    pub async fn load(&self, api: &ApiClient, token: &AuthToken) -> Result<(), AppError> {
        let items = R::list(api, token).await?;
        tracing::debug!(resource = R::SLUG, count = items.len(), "Loaded admin list");
        self.list.write().await.replace_all(items);
        Ok(())
    }

    /// Load the list unless it was fetched before.
    pub async fn ensure_loaded(&self, api: &ApiClient, token: &AuthToken) -> Result<(), AppError> {
        if self.list.read().await.is_loaded() {
            return Ok(());
        }
        self.load(api, token).await
    }

    /// Current rows and the ids with a delete in flight.
    pub async fn snapshot(&self) -> (Vec<R::Item>, HashSet<Id>) {
        let list = self.list.read().await;
        (list.items().to_vec(), list.deleting())
    }

    pub async fn next_order(&self) -> i64 {
        self.list.read().await.next_order()
    }

    /// Row from local state, loading the list first if it was never fetched.
    pub async fn find(
        &self,
        api: &ApiClient,
        token: &AuthToken,
        id: Id,
    ) -> Result<R::Item, AppError> {
        let cached = {
            let list = self.list.read().await;
            list.is_loaded().then(|| list.find(id).cloned())
        };
        let found = match cached {
            Some(found) => found,
            None => {
                self.load(api, token).await?;
                self.list.read().await.find(id).cloned()
            }
        };
        found.ok_or_else(|| AppError::NotFound(format!("{} {} not found", R::SINGULAR, id)))
    }

    /// Create from `draft`, then append the server's object.
    ///
    /// List-derived defaults are only filled from a loaded list; otherwise the
    /// server's defaults apply.
    pub async fn create(
        &self,
        api: &ApiClient,
        token: &AuthToken,
        draft: R::Draft,
    ) -> Result<R::Item, AppError> {
        let next_order = {
            let list = self.list.read().await;
            list.is_loaded().then(|| list.next_order())
        };
        let draft = match next_order {
            Some(next_order) => R::with_defaults(draft, next_order),
            None => draft,
        };
        let created = R::create(api, token, &draft).await?;
        tracing::info!(resource = R::SLUG, id = created.row_key(), "Created");
        self.list.write().await.apply_created(created.clone());
        Ok(created)
    }

    /// Update `id` from `draft`, then replace the row with the server's object.
    pub async fn update(
        &self,
        api: &ApiClient,
        token: &AuthToken,
        id: Id,
        draft: R::Draft,
    ) -> Result<R::Item, AppError> {
        let updated = R::update(api, token, id, &draft).await?;
        tracing::info!(resource = R::SLUG, id, "Updated");
        self.list.write().await.apply_updated(updated.clone());
        Ok(updated)
    }

    /// Delete `id`. The row is removed only once the server confirms.
    pub async fn delete(&self, api: &ApiClient, token: &AuthToken, id: Id) -> Result<(), AppError> {
        if !self.list.write().await.begin_delete(id) {
            return Err(AppError::Conflict(format!(
                "{} {} is already being deleted",
                R::SINGULAR,
                id
            )));
        }

        let result = R::delete(api, token, id).await;

        let mut list = self.list.write().await;
        list.finish_delete(id);
        match result {
            Ok(()) => {
                list.remove(id);
                tracing::info!(resource = R::SLUG, id, "Deleted");
                Ok(())
            }
            Err(e) => {
                tracing::error!(resource = R::SLUG, id, "Delete failed: {}", e);
                Err(e)
            }
        }
    }

    #[cfg(test)]
    pub(crate) async fn seed(&self, items: Vec<R::Item>) {
        self.list.write().await.replace_all(items);
    }

    #[cfg(test)]
    pub(crate) async fn mark_deleting(&self, id: Id) -> bool {
        self.list.write().await.begin_delete(id)
    }
}
