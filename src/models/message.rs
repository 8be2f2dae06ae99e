//! Contact message model matching the upstream Message resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// A message left through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Id,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Message {
    /// Parsed creation time; `None` when the server sent something unparseable.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Creation date for display, falling back to the raw value.
    pub fn created_display(&self) -> String {
        self.created()
            .map(|dt| dt.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| self.created_at.clone())
    }

    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    pub fn phone_or_empty(&self) -> &str {
        self.phone.as_deref().unwrap_or("")
    }

    pub fn body_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Sort newest first; messages with unparseable dates go last, keeping their order.
pub fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_by(|a, b| match (a.created(), b.created()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Read flag wanted by the admin: PATCH body upstream, form body from the panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadStatusUpdate {
    pub is_read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: Id, created_at: &str) -> Message {
        Message {
            id,
            full_name: format!("Sender {}", id),
            email: None,
            phone: None,
            message: None,
            is_read: false,
            created_at: created_at.to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_null_contact_fields_are_accepted() {
        let msg: Message = serde_json::from_str(
            r#"{"id": 3, "fullName": "Ana", "email": null, "phone": null, "message": "Hi", "isRead": false, "createdAt": "2025-01-02T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(msg.email_or_empty(), "");
        assert_eq!(msg.body_or_empty(), "Hi");
        assert_eq!(msg.created_display(), "Jan 2, 2025");
    }

    #[test]
    fn test_sort_newest_first() {
        let mut messages = vec![
            message(1, "2025-01-01T08:00:00Z"),
            message(2, "not a date"),
            message(3, "2025-03-01T08:00:00.000Z"),
            message(4, "2025-02-01T08:00:00+02:00"),
        ];
        sort_newest_first(&mut messages);
        let ids: Vec<Id> = messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }
}
