//! Generic admin data table.
//!
//! [`DataTable`] is configured with column descriptors, searchable keys, an
//! optional row link and an optional per-row action renderer. The visible
//! rows are a pure function of (rows, search text, sort state); see
//! [`DataTable::derive`]. Rendering produces a [`TableView`] consumed by
//! `templates/partials/table.html`.

mod cell;

pub use cell::{Cell, RowAction, Tone};

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;

use crate::models::Id;

/// A single field value as seen by search and sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FieldValue {
    fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (a, b) => a.to_string().cmp(&b.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// A row that can be shown in a [`DataTable`].
pub trait TableRow {
    /// Unique key of the row.
    fn row_key(&self) -> Id;

    /// Value of the field named `key`, if the row has one.
    fn field(&self, key: &str) -> Option<FieldValue>;

    /// Display sequence for entities that carry an `order` field.
    fn display_order(&self) -> Option<i64> {
        None
    }
}

/// Compare two optional fields; a missing value sorts first.
fn compare_fields(a: &Option<FieldValue>, b: &Option<FieldValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

/// Query string driving the table: `?q=…&sort=…&dir=asc|desc`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub dir: Option<String>,
}

/// Current search text and sort column/direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    pub search: String,
    pub sort: Option<SortState>,
}

#[cfg(test)]
impl TableState {
    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            sort: None,
        }
    }

    pub fn sorted(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortState {
            key: key.into(),
            direction,
        });
        self
    }
}

impl From<&TableQuery> for TableState {
    fn from(query: &TableQuery) -> Self {
        let sort = query
            .sort
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| SortState {
                key: key.to_string(),
                direction: SortDirection::parse(query.dir.as_deref().unwrap_or("asc")),
            });

        Self {
            search: query.q.clone().unwrap_or_default(),
            sort,
        }
    }
}

/// Column descriptor.
pub struct Column<T> {
    pub key: &'static str,
    pub header: &'static str,
    pub sortable: bool,
    render: Option<fn(&T) -> Cell>,
}

impl<T: TableRow> Column<T> {
    pub fn new(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            sortable: false,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn render(mut self, render: fn(&T) -> Cell) -> Self {
        self.render = Some(render);
        self
    }

    fn cell(&self, row: &T) -> Cell {
        match self.render {
            Some(render) => render(row),
            None => Cell::Text(row.field(self.key).map(|v| v.to_string()).unwrap_or_default()),
        }
    }
}

type ActionRenderer<'a, T> = Box<dyn Fn(&T) -> Vec<RowAction> + Send + Sync + 'a>;

/// A configured table over rows of `T`.
pub struct DataTable<'a, T> {
    base_path: String,
    columns: Vec<Column<T>>,
    search_keys: Vec<&'static str>,
    search_placeholder: String,
    empty_message: String,
    row_href: Option<fn(&T) -> String>,
    actions: Option<ActionRenderer<'a, T>>,
    row_disabled: Option<Box<dyn Fn(&T) -> bool + Send + Sync + 'a>>,
    preserved_query: Vec<(String, String)>,
}

impl<'a, T: TableRow> DataTable<'a, T> {
    /// A table whose search form and sort links point at `base_path`.
    pub fn new(base_path: impl Into<String>, columns: Vec<Column<T>>) -> Self {
        Self {
            base_path: base_path.into(),
            columns,
            search_keys: Vec::new(),
            search_placeholder: "Search...".to_string(),
            empty_message: "No data found".to_string(),
            row_href: None,
            actions: None,
            row_disabled: None,
            preserved_query: Vec::new(),
        }
    }

    pub fn search(mut self, placeholder: impl Into<String>, keys: &[&'static str]) -> Self {
        self.search_placeholder = placeholder.into();
        self.search_keys = keys.to_vec();
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Make each row a link (the row-click handler).
    pub fn row_href(mut self, href: fn(&T) -> String) -> Self {
        self.row_href = Some(href);
        self
    }

    pub fn actions(mut self, actions: impl Fn(&T) -> Vec<RowAction> + Send + Sync + 'a) -> Self {
        self.actions = Some(Box::new(actions));
        self
    }

    /// Rows for which this returns true render with their controls disabled.
    pub fn row_disabled(mut self, disabled: impl Fn(&T) -> bool + Send + Sync + 'a) -> Self {
        self.row_disabled = Some(Box::new(disabled));
        self
    }

    /// Extra query parameters carried through search and sort links.
    pub fn preserve_query(mut self, key: &str, value: &str) -> Self {
        self.preserved_query.push((key.to_string(), value.to_string()));
        self
    }

    fn matches(&self, row: &T, needle: &str) -> bool {
        self.search_keys.iter().any(|key| {
            row.field(key)
                .map(|value| value.to_string().to_lowercase().contains(needle))
                .unwrap_or(false)
        })
    }

    fn sortable_column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.sortable && c.key == key)
    }

    /// Filter then sort `rows` for `state`.
    ///
    /// Sorting is stable on input order; descending is the reverse of ascending.
    pub fn derive<'r>(&self, rows: &'r [T], state: &TableState) -> Vec<&'r T> {
        let needle = state.search.trim().to_lowercase();
        let mut view: Vec<&T> = rows
            .iter()
            .filter(|row| needle.is_empty() || self.matches(row, &needle))
            .collect();

        if let Some(sort) = &state.sort {
            if let Some(column) = self.sortable_column(&sort.key) {
                view.sort_by(|a, b| compare_fields(&a.field(column.key), &b.field(column.key)));
                if sort.direction == SortDirection::Desc {
                    view.reverse();
                }
            }
        }

        view
    }

    /// Derive the visible rows and render them.
    pub fn view(&self, rows: &[T], state: &TableState) -> TableView {
        let derived = self.derive(rows, state);

        let headers = self
            .columns
            .iter()
            .map(|column| {
                let active = state
                    .sort
                    .as_ref()
                    .filter(|sort| sort.key == column.key && column.sortable);
                let indicator = match active.map(|s| s.direction) {
                    Some(SortDirection::Asc) => "▲",
                    Some(SortDirection::Desc) => "▼",
                    None => "",
                };
                let href = column.sortable.then(|| {
                    let direction = active
                        .map(|s| s.direction.toggled())
                        .unwrap_or(SortDirection::Asc);
                    self.link(&state.search, Some((column.key, direction)))
                });
                HeaderView {
                    label: column.header.to_string(),
                    href,
                    indicator,
                }
            })
            .collect();

        let rows = derived
            .into_iter()
            .map(|row| RowView {
                href: self.row_href.map(|href| href(row)),
                cells: self.columns.iter().map(|c| c.cell(row)).collect(),
                actions: self.actions.as_ref().map(|a| a(row)).unwrap_or_default(),
                disabled: self.row_disabled.as_ref().map(|d| d(row)).unwrap_or(false),
            })
            .collect::<Vec<_>>();

        let mut hidden = self.preserved_query.clone();
        if let Some(sort) = &state.sort {
            hidden.push(("sort".to_string(), sort.key.clone()));
            hidden.push(("dir".to_string(), sort.direction.as_str().to_string()));
        }

        TableView {
            action_path: self.base_path.clone(),
            search: state.search.clone(),
            search_placeholder: self.search_placeholder.clone(),
            hidden,
            headers,
            has_actions: self.actions.is_some(),
            empty_message: self.empty_message.clone(),
            rows,
        }
    }

    fn link(&self, search: &str, sort: Option<(&str, SortDirection)>) -> String {
        let mut pairs: Vec<(String, String)> = self.preserved_query.clone();
        if !search.is_empty() {
            pairs.push(("q".to_string(), search.to_string()));
        }
        if let Some((key, direction)) = sort {
            pairs.push(("sort".to_string(), key.to_string()));
            pairs.push(("dir".to_string(), direction.as_str().to_string()));
        }
        with_query(&self.base_path, &pairs)
    }
}

/// Append url-encoded `pairs` to `path`.
pub fn with_query(path: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

#[derive(Debug, Clone)]
pub struct HeaderView {
    pub label: String,
    pub href: Option<String>,
    pub indicator: &'static str,
}

#[derive(Debug, Clone)]
pub struct RowView {
    pub href: Option<String>,
    pub cells: Vec<Cell>,
    pub actions: Vec<RowAction>,
    pub disabled: bool,
}

/// Rendered table handed to the template.
#[derive(Debug, Clone)]
pub struct TableView {
    pub action_path: String,
    pub search: String,
    pub search_placeholder: String,
    pub hidden: Vec<(String, String)>,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub has_actions: bool,
    pub empty_message: String,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_span(&self) -> usize {
        self.headers.len() + usize::from(self.has_actions)
    }
}
