//! Public contact form.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Raw values of the contact form, as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

/// JSON body for `POST /contact`; blank optional fields are omitted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContactForm {
    /// Check required fields and build the request body.
    pub fn validate(&self) -> Result<ContactRequest, AppError> {
        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            return Err(AppError::Validation("Full name is required".to_string()));
        }

        Ok(ContactRequest {
            full_name: full_name.to_string(),
            email: non_blank(&self.email),
            phone: non_blank(&self.phone),
            message: non_blank(&self.message),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
