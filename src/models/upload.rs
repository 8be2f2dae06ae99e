//! Image files attached to admin forms.

/// An image uploaded through an admin form, forwarded to the API as the `image` part.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
