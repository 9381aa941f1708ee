use crate::domain::submission::NewSubmission;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const NAME_MIN_LEN: usize = 3;
pub const DEFAULT_MESSAGE_MIN_LEN: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Raw contact-form input as it arrives from the client.
///
/// Fields that were not sent at all, or were sent as `null`, are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
}

pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

/// A broken rule. Each variant belongs to exactly one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    NameTooShort { min: usize },
    EmailInvalid,
    MessageTooShort { min: usize },
}

impl Violation {
    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            Self::NameTooShort { .. } => Field::Name,
            Self::EmailInvalid => Field::Email,
            Self::MessageTooShort { .. } => Field::Message,
        }
    }

    /// The message shown under the field.
    #[must_use]
    pub fn describe(self) -> String {
        match self {
            Self::NameTooShort { min } => format!("Nama harus lebih dari {} karakter.", min.saturating_sub(1)),
            Self::EmailInvalid => "Format email tidak valid.".to_string(),
            Self::MessageTooShort { min } => format!("Pesan harus lebih dari {min} karakter."),
        }
    }
}

/// Per-field error messages, in the order the rules were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&[String]> {
        self.0.get(&field).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<Violation> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        let mut errors = Self::new();
        for violation in iter {
            errors.push(violation.field(), violation.describe());
        }
        errors
    }
}

/// Constraints a contact submission must meet before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    message_min_len: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_MIN_LEN)
    }
}

impl ValidationRules {
    #[must_use]
    pub const fn new(message_min_len: usize) -> Self {
        Self { message_min_len }
    }

    #[must_use]
    pub const fn message_min_len(&self) -> usize {
        self.message_min_len
    }

    /// Lists every rule the form breaks. An empty list means the form is valid.
    #[must_use]
    pub fn violations(&self, form: &ContactForm) -> Vec<Violation> {
        let mut found = Vec::new();

        if form.name.chars().count() < NAME_MIN_LEN {
            found.push(Violation::NameTooShort { min: NAME_MIN_LEN });
        }
        if !EMAIL_PATTERN.is_match(&form.email) {
            found.push(Violation::EmailInvalid);
        }
        if form.message.chars().count() < self.message_min_len {
            found.push(Violation::MessageTooShort { min: self.message_min_len });
        }

        found
    }

    /// Checks all fields and either hands back a storable submission or every
    /// failing field with its messages.
    ///
    /// # Errors
    /// Returns the collected [`FieldErrors`] when any rule fails.
    pub fn validate(&self, form: ContactForm) -> Result<NewSubmission, FieldErrors> {
        let violations = self.violations(&form);
        if !violations.is_empty() {
            return Err(violations.into_iter().collect());
        }

        Ok(NewSubmission { name: form.name, email: form.email, message: form.message })
    }
}
