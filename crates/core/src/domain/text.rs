use super::DomainError;

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn bounded(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<String, DomainError> {
    let trimmed = value.trim();
    let len = char_len(trimmed);

    if len < min || len > max {
        return Err(DomainError::InvalidLength {
            field,
            min,
            max,
            actual: len,
        });
    }

    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseName(String);

impl CourseName {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 100;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        bounded("name", &value.into(), Self::MIN_LEN, Self::MAX_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseDescription(String);

impl CourseDescription {
    pub const MIN_LEN: usize = 10;
    pub const MAX_LEN: usize = 500;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        bounded("description", &value.into(), Self::MIN_LEN, Self::MAX_LEN).map(Self)
    }

    /// Blank input means the description was left out.
    pub fn optional(value: Option<String>) -> Result<Option<Self>, DomainError> {
        match value {
            Some(value) if !value.trim().is_empty() => Self::new(value).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Non-blank free text, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequiredText(String);

impl RequiredText {
    pub fn new(field: &'static str, value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(DomainError::EmptyField(field));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub const MAX_LEN: usize = 255;

    /// Structural check only: one `@`, a non-empty local part and a dotted domain.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.len() > Self::MAX_LEN || trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidEmail);
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(DomainError::InvalidEmail);
        };

        let domain_ok = !domain.contains('@')
            && domain.contains('.')
            && domain.split('.').all(|label| !label.is_empty());

        if local.is_empty() || !domain_ok {
            return Err(DomainError::InvalidEmail);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpUrl(String);

impl HttpUrl {
    pub fn new(field: &'static str, value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or(DomainError::InvalidUrl(field))?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidUrl(field));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Blank input means the URL was left out.
    pub fn optional(field: &'static str, value: Option<String>) -> Result<Option<Self>, DomainError> {
        match value {
            Some(value) if !value.trim().is_empty() => Self::new(field, value).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
