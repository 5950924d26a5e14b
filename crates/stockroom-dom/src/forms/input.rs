//! Input Controls
//!
//! Input type parsing and the live state a control carries beside its
//! attributes.

/// HTML input types that matter for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Search,
    Email,
    Url,
    Tel,
    Password,
    Number,
    Range,
    Date,
    Checkbox,
    Radio,
    File,
    Hidden,
    Submit,
    Reset,
    Button,
    Image,
}

impl InputType {
    /// Parse the `type` attribute; unknown values fall back to text
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Self::Search,
            "email" => Self::Email,
            "url" => Self::Url,
            "tel" => Self::Tel,
            "password" => Self::Password,
            "number" => Self::Number,
            "range" => Self::Range,
            "date" => Self::Date,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "file" => Self::File,
            "hidden" => Self::Hidden,
            "submit" => Self::Submit,
            "reset" => Self::Reset,
            "button" => Self::Button,
            "image" => Self::Image,
            _ => Self::Text,
        }
    }

    /// Whether controls of this type take part in constraint validation
    pub fn is_validatable(&self) -> bool {
        !matches!(
            self,
            Self::Hidden | Self::Submit | Self::Reset | Self::Button | Self::Image
        )
    }

    /// Whether the `pattern` attribute applies
    pub fn supports_pattern(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Search | Self::Email | Self::Url | Self::Tel | Self::Password
        )
    }

    /// Whether `minlength`/`maxlength` apply
    pub fn supports_length(&self) -> bool {
        self.supports_pattern()
    }

    pub fn is_checkable(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

/// A file picked in a file input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            mime_type: String::new(),
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }
}

/// Live control state (the `value`/`checked`/`files` properties)
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    /// Value set by the user or by script; None means "use the default"
    pub dirty_value: Option<String>,
    /// Checkedness set by the user; None means "use the attribute"
    pub dirty_checked: Option<bool>,
    /// Selected files, in selection order
    pub files: Vec<FileEntry>,
}
