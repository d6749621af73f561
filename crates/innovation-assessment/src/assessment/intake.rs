use super::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeFieldKind {
    Text,
    Email,
    Notes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeField {
    pub name: String,
    pub kind: IntakeFieldKind,
}

impl IntakeField {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: IntakeFieldKind::Text,
        }
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: IntakeFieldKind::Email,
        }
    }

    pub fn notes(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: IntakeFieldKind::Notes,
        }
    }

    pub fn is_required(&self) -> bool {
        self.kind != IntakeFieldKind::Notes
    }
}

/// Ordered list of organisation fields collected before the questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeSchema {
    fields: Vec<IntakeField>,
}

impl IntakeSchema {
    pub fn new(fields: Vec<IntakeField>) -> Result<Self, IntakeSchemaError> {
        for (position, field) in fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(IntakeSchemaError::BlankName);
            }
            if fields[..position]
                .iter()
                .any(|earlier| earlier.name.eq_ignore_ascii_case(&field.name))
            {
                return Err(IntakeSchemaError::DuplicateField(field.name.clone()));
            }
        }

        let email_fields = fields
            .iter()
            .filter(|field| field.kind == IntakeFieldKind::Email)
            .count();
        if email_fields != 1 {
            return Err(IntakeSchemaError::EmailFieldCount(email_fields));
        }

        Ok(Self { fields })
    }

    /// Build a schema from field names: "Email" is format-checked, "Notes" is
    /// optional, everything else is required free text.
    pub fn from_names<I, S>(names: I) -> Result<Self, IntakeSchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                if name.trim().eq_ignore_ascii_case("email") {
                    IntakeField::email(name)
                } else if name.trim().eq_ignore_ascii_case("notes") {
                    IntakeField::notes(name)
                } else {
                    IntakeField::text(name)
                }
            })
            .collect();
        Self::new(fields)
    }

    pub fn organisation() -> Self {
        Self {
            fields: vec![
                IntakeField::text("Organisation"),
                IntakeField::email("Email"),
                IntakeField::text("Experience Years"),
                IntakeField::text("Number of Employees"),
                IntakeField::text("Location"),
                IntakeField::notes("Notes"),
            ],
        }
    }

    pub fn fields(&self) -> &[IntakeField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&IntakeField> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &IntakeField> {
        self.fields.iter().filter(|field| field.is_required())
    }
}

impl Default for IntakeSchema {
    fn default() -> Self {
        Self::organisation()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeSchemaError {
    #[error("intake field names must not be blank")]
    BlankName,
    #[error("intake field '{0}' is declared more than once")]
    DuplicateField(String),
    #[error("intake schema needs exactly one email field, found {0}")]
    EmailFieldCount(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intake field '{0}'")]
pub struct UnknownFieldError(pub String);

/// Field values entered against an [`IntakeSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeForm {
    schema: IntakeSchema,
    values: BTreeMap<String, String>,
}

impl IntakeForm {
    pub fn new(schema: IntakeSchema) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &IntakeSchema {
        &self.schema
    }

    /// Store a value, returning the kind of the field it was written to.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<IntakeFieldKind, UnknownFieldError> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| UnknownFieldError(name.to_owned()))?;
        let kind = field.kind;
        self.values.insert(field.name.clone(), value.into());
        Ok(kind)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        let field = self.schema.field(name)?;
        self.values.get(&field.name).map(String::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.value_of_kind(IntakeFieldKind::Email)
    }

    pub fn notes(&self) -> Option<&str> {
        self.value_of_kind(IntakeFieldKind::Notes)
    }

    /// The first text field's value, which names the respondent in logs.
    pub fn display_name(&self) -> Option<&str> {
        self.value_of_kind(IntakeFieldKind::Text)
            .filter(|value| !value.trim().is_empty())
    }

    fn value_of_kind(&self, kind: IntakeFieldKind) -> Option<&str> {
        self.schema
            .fields()
            .iter()
            .find(|field| field.kind == kind)
            .and_then(|field| self.values.get(&field.name))
            .map(String::as_str)
    }

    /// Drop every notes value, keeping organisation details.
    pub fn clear_notes(&mut self) {
        for field in &self.schema.fields {
            if field.kind == IntakeFieldKind::Notes {
                self.values.remove(&field.name);
            }
        }
    }

    fn is_filled(&self, field: &IntakeField) -> bool {
        self.values
            .get(&field.name)
            .is_some_and(|value| !value.trim().is_empty())
    }

    /// Required fields left blank, in schema order.
    pub fn missing_required(&self) -> Vec<String> {
        self.schema
            .required_fields()
            .filter(|field| !self.is_filled(field))
            .map(|field| field.name.clone())
            .collect()
    }

    /// (filled, total) over required fields.
    pub fn required_progress(&self) -> (usize, usize) {
        let total = self.schema.required_fields().count();
        let filled = self
            .schema
            .required_fields()
            .filter(|field| self.is_filled(field))
            .count();
        (filled, total)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(ValidationError::MissingRequiredFields { fields: missing });
        }

        let email = self.email().unwrap_or_default();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(())
    }
}

/// Accepts `local@domain.tld`: no whitespace or `@` in either part, and a dot
/// inside the domain with characters on both sides.
pub fn is_valid_email(raw: &str) -> bool {
    let candidate = raw.trim();
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };

    let part_ok = |part: &str| {
        !part.is_empty() && !part.chars().any(|ch| ch == '@' || ch.is_whitespace())
    };
    if !part_ok(local) || !part_ok(domain) {
        return false;
    }

    domain
        .char_indices()
        .any(|(position, ch)| ch == '.' && position > 0 && position + 1 < domain.len())
}
