//! Response envelopes returned by the upstream API.

use serde::Deserialize;

/// A successful response body: either `{success, data, message}` or the raw payload.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Wrapped {
        #[serde(default)]
        success: Option<bool>,
        data: T,
        #[serde(default)]
        message: Option<String>,
    },
    Bare(T),
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload regardless of which shape the server used.
    pub fn into_data(self) -> T {
        match self {
            ApiEnvelope::Wrapped { data, .. } => data,
            ApiEnvelope::Bare(data) => data,
        }
    }

    /// False only when a wrapped response explicitly reports `success: false`.
    pub fn succeeded(&self) -> bool {
        match self {
            ApiEnvelope::Wrapped { success, .. } => success.unwrap_or(true),
            ApiEnvelope::Bare(_) => true,
        }
    }

    /// Server-provided message, only present on wrapped responses.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiEnvelope::Wrapped { message, .. } => message.as_deref(),
            ApiEnvelope::Bare(_) => None,
        }
    }
}

/// Body of a non-2xx response.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The server's explanation, preferring `message` over `error`.
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;

    #[test]
    fn test_wrapped_payload_is_unwrapped() {
        let body = r#"{"success": true, "data": [1, 2, 3], "message": "ok"}"#;
        let envelope: ApiEnvelope<Vec<i64>> = serde_json::from_str(body).unwrap();
        assert!(envelope.succeeded());
        assert_eq!(envelope.message(), Some("ok"));
        assert_eq!(envelope.into_data(), vec![1, 2, 3]);
    }

    #[test]
    fn test_bare_payload_is_accepted() {
        let body = r#"{
            "id": 4,
            "title": "Bridge",
            "description": "Steel bridge",
            "category": "commercial",
            "location": "Kigali",
            "image": "/uploads/bridge.jpg",
            "featured": true
        }"#;
        let envelope: ApiEnvelope<Project> = serde_json::from_str(body).unwrap();
        assert!(envelope.message().is_none());
        let project = envelope.into_data();
        assert_eq!(project.id, 4);
        assert!(project.featured);
    }

    #[test]
    fn test_error_body_prefers_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message": "Not allowed", "error": "FORBIDDEN"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Not allowed"));

        let body: ErrorBody = serde_json::from_str(r#"{"error": "Token expired"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Token expired"));

        let body: ErrorBody = serde_json::from_str(r#"{"message": "  "}"#).unwrap();
        assert!(body.into_message().is_none());
    }
}
