//! Cell and action views rendered by the table template.

/// Visual emphasis for badges and actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl Tone {
    pub fn class(&self) -> &'static str {
        match self {
            Tone::Neutral => "tone-neutral",
            Tone::Info => "tone-info",
            Tone::Success => "tone-success",
            Tone::Warning => "tone-warning",
            Tone::Danger => "tone-danger",
        }
    }
}

/// Rendered content of one table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Strong(String),
    Muted(String),
    Badge { label: String, tone: Tone },
    /// Emphasized text followed by a small badge
    Tagged { text: String, tag: String },
    Image { src: String, alt: String },
}

impl Cell {
    pub fn badge(label: impl Into<String>, tone: Tone) -> Self {
        Cell::Badge {
            label: label.into(),
            tone,
        }
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Cell::Image {
            src: src.into(),
            alt: alt.into(),
        }
    }

    /// Template discriminator.
    pub fn kind(&self) -> &'static str {
        match self {
            Cell::Text(_) => "text",
            Cell::Strong(_) => "strong",
            Cell::Muted(_) => "muted",
            Cell::Badge { .. } => "badge",
            Cell::Tagged { .. } => "tagged",
            Cell::Image { .. } => "image",
        }
    }

    /// Text content; the alt text for images.
    pub fn text(&self) -> &str {
        match self {
            Cell::Text(t) | Cell::Strong(t) | Cell::Muted(t) => t,
            Cell::Badge { label, .. } => label,
            Cell::Tagged { text, .. } => text,
            Cell::Image { alt, .. } => alt,
        }
    }

    /// Badge of a tagged cell, empty otherwise.
    pub fn tag(&self) -> &str {
        match self {
            Cell::Tagged { tag, .. } => tag,
            _ => "",
        }
    }

    /// Image source, empty for non-image cells.
    pub fn src(&self) -> &str {
        match self {
            Cell::Image { src, .. } => src,
            _ => "",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Cell::Badge { tone, .. } => tone.class(),
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMethod {
    Get,
    Post,
}

/// A per-row control: a link or a small POST form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub label: String,
    pub href: String,
    pub method: ActionMethod,
    pub confirm: Option<String>,
    pub tone: Tone,
    pub disabled: bool,
    /// Hidden inputs submitted with a POST action
    pub fields: Vec<(String, String)>,
}

impl RowAction {
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            method: ActionMethod::Get,
            confirm: None,
            tone: Tone::Neutral,
            disabled: false,
            fields: Vec::new(),
        }
    }

    pub fn post(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            method: ActionMethod::Post,
            ..Self::link(label, href)
        }
    }

    /// Ask the browser to confirm before submitting.
    pub fn confirm(mut self, prompt: impl Into<String>) -> Self {
        self.confirm = Some(prompt.into());
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn is_post(&self) -> bool {
        self.method == ActionMethod::Post
    }

    /// `onsubmit` handler for the confirmation prompt, empty when none.
    pub fn onsubmit(&self) -> String {
        match &self.confirm {
            Some(prompt) => format!(
                "return confirm('{}');",
                prompt.replace('\\', "\\\\").replace('\'', "\\'")
            ),
            None => String::new(),
        }
    }
}
