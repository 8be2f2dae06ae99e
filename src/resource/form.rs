//! Admin form schemas and submitted form data.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::errors::AppError;
use crate::models::ImageUpload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    TextArea,
    /// Textarea whose lines become a list
    Lines,
    Checkbox,
    Select,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One input of an admin form.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
    pub required: bool,
    pub hint: Option<&'static str>,
    pub options: Vec<SelectOption>,
    /// Current image shown next to a file input
    pub preview: Option<String>,
}

impl FormField {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            value: String::new(),
            checked: false,
            required: false,
            hint: None,
            options: Vec::new(),
            preview: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text).value(value)
    }

    pub fn textarea(name: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::TextArea).value(value)
    }

    pub fn lines(name: &'static str, label: &'static str, lines: &[String]) -> Self {
        Self::new(name, label, FieldKind::Lines).value(lines.join("\n"))
    }

    pub fn number(name: &'static str, label: &'static str, value: i64) -> Self {
        Self::new(name, label, FieldKind::Number).value(value.to_string())
    }

    pub fn checkbox(name: &'static str, label: &'static str, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, label, FieldKind::Checkbox)
        }
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        options: &[(&str, &str)],
        selected: &str,
    ) -> Self {
        Self {
            options: options
                .iter()
                .map(|(value, label)| SelectOption {
                    value: value.to_string(),
                    label: label.to_string(),
                    selected: *value == selected,
                })
                .collect(),
            value: selected.to_string(),
            ..Self::new(name, label, FieldKind::Select)
        }
    }

    pub fn image(name: &'static str, label: &'static str, current: Option<&str>) -> Self {
        Self {
            preview: current.filter(|s| !s.is_empty()).map(str::to_string),
            ..Self::new(name, label, FieldKind::Image)
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn required_if(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Put back what the user submitted so a rejected form keeps its values.
    pub fn refill(&mut self, form: &SubmittedForm) {
        match self.kind {
            FieldKind::Image => {}
            FieldKind::Checkbox => self.checked = form.checked(self.name),
            FieldKind::Select => {
                let submitted = form.text(self.name);
                for option in &mut self.options {
                    option.selected = option.value == submitted;
                }
                self.value = submitted;
            }
            _ => self.value = form.text(self.name),
        }
    }

    pub fn is_textarea(&self) -> bool {
        matches!(self.kind, FieldKind::TextArea | FieldKind::Lines)
    }

    pub fn is_checkbox(&self) -> bool {
        self.kind == FieldKind::Checkbox
    }

    pub fn is_select(&self) -> bool {
        self.kind == FieldKind::Select
    }

    pub fn is_image(&self) -> bool {
        self.kind == FieldKind::Image
    }

    /// `type` attribute for plain inputs.
    pub fn input_type(&self) -> &'static str {
        match self.kind {
            FieldKind::Number => "number",
            _ => "text",
        }
    }
}

/// Fields and files posted by an admin form.
#[derive(Debug, Default)]
pub struct SubmittedForm {
    fields: HashMap<String, String>,
    files: HashMap<String, ImageUpload>,
}

impl SubmittedForm {
    /// Collect a `multipart/form-data` body. File inputs left empty are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await?;
                    if !file_name.is_empty() && !bytes.is_empty() {
                        form.files.insert(
                            name,
                            ImageUpload {
                                file_name,
                                content_type,
                                bytes: bytes.to_vec(),
                            },
                        );
                    }
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_file(mut self, name: &str, upload: ImageUpload) -> Self {
        self.files.insert(name.to_string(), upload);
        self
    }

    /// Submitted value, empty when absent.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// Trimmed value, or a validation error naming `label`.
    pub fn required(&self, name: &str, label: &str) -> Result<String, AppError> {
        let value = self.text(name).trim().to_string();
        if value.is_empty() {
            return Err(AppError::Validation(format!("{} is required", label)));
        }
        Ok(value)
    }

    /// Checkbox state: browsers only send checked boxes.
    pub fn checked(&self, name: &str) -> bool {
        matches!(
            self.fields.get(name).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("on" | "true" | "1" | "yes")
        )
    }

    /// Optional integer; blank means absent.
    pub fn number(&self, name: &str, label: &str) -> Result<Option<i64>, AppError> {
        let value = self.text(name);
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{} must be a whole number", label)))
    }

    pub fn take_file(&mut self, name: &str) -> Option<ImageUpload> {
        self.files.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_names_field() {
        let form = SubmittedForm::from_pairs(&[("title", "  Bridge  "), ("location", " ")]);
        assert_eq!(form.required("title", "Title").unwrap(), "Bridge");
        let err = form.required("location", "Location").unwrap_err();
        assert_eq!(err.message(), "Location is required");
    }

    #[test]
    fn test_checkbox_and_number_parsing() {
        let form = SubmittedForm::from_pairs(&[("featured", "on"), ("order", " 7 "), ("bad", "x")]);
        assert!(form.checked("featured"));
        assert!(!form.checked("isCEO"));
        assert_eq!(form.number("order", "Order").unwrap(), Some(7));
        assert_eq!(form.number("missing", "Order").unwrap(), None);
        assert!(form.number("bad", "Order").is_err());
    }

    #[test]
    fn test_refill_keeps_submitted_values() {
        let form = SubmittedForm::from_pairs(&[("category", "commercial"), ("title", "Mall")]);
        let mut select = FormField::select(
            "category",
            "Category",
            &[("residential", "Residential"), ("commercial", "Commercial")],
            "residential",
        );
        select.refill(&form);
        assert!(!select.options[0].selected);
        assert!(select.options[1].selected);

        let mut title = FormField::text("title", "Title", "");
        title.refill(&form);
        assert_eq!(title.value, "Mall");

        let mut featured = FormField::checkbox("featured", "Featured", true);
        featured.refill(&form);
        assert!(!featured.checked);
    }
}
