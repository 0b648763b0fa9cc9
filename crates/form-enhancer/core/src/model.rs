// File: src/model.rs
// Purpose: In-memory representation of a managed form and its fields

use crate::validation::ValidationError;

/// Index of a field within its [`FormModel`], in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(pub usize);

/// Declared input type of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    File,
    Other(String),
}

impl FieldKind {
    /// Parse the `type` attribute of an input. `select` and `textarea`
    /// elements have no type and map to `Text`.
    pub fn parse(type_attr: &str) -> Self {
        let lowered = type_attr.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "" | "text" | "select" | "textarea" => FieldKind::Text,
            "email" => FieldKind::Email,
            "password" => FieldKind::Password,
            "file" => FieldKind::File,
            _ => FieldKind::Other(lowered),
        }
    }
}

/// One input, select or textarea under validation
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    /// `data-min-length`; overrides the configured password minimum
    pub min_length: Option<usize>,
    /// `data-confirm`; marks the password-confirmation field
    pub confirm: bool,
    /// `data-allowed-extensions` for file inputs, lower-cased, without dots
    pub allowed_extensions: Vec<String>,
    /// Current value; for file inputs, the selected file names one per line
    pub value: String,
    /// Visible invalid-state annotation, at most one per field
    pub error: Option<ValidationError>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            min_length: None,
            confirm: false,
            allowed_extensions: Vec::new(),
            value: String::new(),
            error: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn confirm(mut self) -> Self {
        self.confirm = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn allow_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn is_invalid(&self) -> bool {
        self.error.is_some()
    }

    /// `<input type="hidden">` carries page state (tokens, ids), not user input
    pub fn is_hidden(&self) -> bool {
        matches!(&self.kind, FieldKind::Other(kind) if kind == "hidden")
    }
}

/// A form under enhancement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormModel {
    /// `action` attribute; `None` or empty targets the current page
    pub action: Option<String>,
    /// `method` attribute; `None` means POST
    pub method: Option<String>,
    /// `data-reset-on-success`
    pub reset_on_success: bool,
    pub fields: Vec<Field>,
}

impl FormModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn reset_on_success(mut self, reset: bool) -> Self {
        self.reset_on_success = reset;
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.0)
    }

    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.get_mut(id.0)
    }

    /// Look up a field id by name
    pub fn find(&self, name: &str) -> Option<FieldId> {
        self.fields.iter().position(|f| f.name == name).map(FieldId)
    }

    /// Request URL and upper-cased method for a submission from `page_url`
    pub fn target(&self, page_url: &str) -> (String, String) {
        let url = self
            .action
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(page_url)
            .to_string();

        let method = self
            .method
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_ascii_uppercase)
            .unwrap_or_else(|| "POST".to_string());

        (url, method)
    }

    /// Named non-file fields in document order
    pub fn payload(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter(|f| !f.name.is_empty() && f.kind != FieldKind::File)
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Fields currently annotated invalid
    pub fn invalid_fields(&self) -> impl Iterator<Item = (FieldId, &Field)> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_invalid())
            .map(|(i, f)| (FieldId(i), f))
    }

    /// Clear every value and annotation
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            if !field.is_hidden() {
                field.value.clear();
            }
            field.error = None;
        }
    }
}
