use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("In use: {0}")]
    InUse(String),

    #[error("Observer '{observer}' failed: {message}")]
    Observer {
        observer: &'static str,
        message: String,
    },
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, msg)
                })
            })
            .collect();
        // HashMap order is unstable; keep messages deterministic
        field_errors.sort();

        if field_errors.is_empty() {
            Self::Validation("validation failed".to_string())
        } else {
            Self::Validation(field_errors.join("; "))
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(range(min = 1))]
        count: u32,
    }

    #[test]
    fn not_found_formats_entity_and_key() {
        let err = DomainError::not_found("Station", "id", 7);
        assert_eq!(err.to_string(), "Not found: Station with id=7");
    }

    #[test]
    fn validation_errors_are_joined_deterministically() {
        let sample = Sample {
            name: String::new(),
            count: 0,
        };
        let err = DomainError::from(sample.validate().unwrap_err());
        match err {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "count: range; name: must not be empty");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
