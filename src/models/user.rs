//! Admin user and login models.

use serde::{Deserialize, Serialize};

use super::Id;

/// The authenticated admin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Id,
    pub email: String,
    #[serde(default)]
    pub name: String,
}

impl User {
    /// Name for greetings, falling back to "Admin".
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Admin"
        } else {
            &self.name
        }
    }
}

/// Request body for `POST /auth/login`, also the login form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Login payload as sent by the server: flat, or with a nested user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LoginPayload {
    Nested {
        token: String,
        user: User,
    },
    Flat {
        token: String,
        id: Id,
        email: String,
        #[serde(default)]
        name: String,
    },
}

/// Token and user returned by a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

impl From<LoginPayload> for LoginResponse {
    fn from(payload: LoginPayload) -> Self {
        match payload {
            LoginPayload::Nested { token, user } => LoginResponse { token, user },
            LoginPayload::Flat {
                token,
                id,
                email,
                name,
            } => LoginResponse {
                token,
                user: User { id, email, name },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiEnvelope;

    #[test]
    fn test_flat_login_payload() {
        let body = r#"{"success": true, "data": {"token": "abc", "id": 1, "email": "a@b.c", "name": "Ana"}}"#;
        let envelope: ApiEnvelope<LoginPayload> = serde_json::from_str(body).unwrap();
        let login = LoginResponse::from(envelope.into_data());
        assert_eq!(login.token, "abc");
        assert_eq!(login.user.email, "a@b.c");
        assert_eq!(login.user.display_name(), "Ana");
    }

    #[test]
    fn test_nested_login_payload() {
        let body = r#"{"token": "xyz", "user": {"id": 2, "email": "b@c.d", "name": ""}}"#;
        let envelope: ApiEnvelope<LoginPayload> = serde_json::from_str(body).unwrap();
        let login = LoginResponse::from(envelope.into_data());
        assert_eq!(login.token, "xyz");
        assert_eq!(login.user.id, 2);
        assert_eq!(login.user.display_name(), "Admin");
    }
}
