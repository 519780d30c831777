//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: HostConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::HostConfig;
use crate::format::Charset;

/// A single semantic problem with a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &HostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("not a socket address: {}", config.listener.bind_address),
        });
    }
    if let Err(message) = config.response.default_charset.parse::<Charset>() {
        errors.push(ValidationError {
            field: "response.default_charset",
            message,
        });
    }
    if config.limits.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "limits.request_timeout_secs",
            message: "must be greater than zero".into(),
        });
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError {
            field: "limits.max_body_bytes",
            message: "must be greater than zero".into(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&HostConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = HostConfig::default();
        config.listener.bind_address = "localhost".into();
        config.response.default_charset = "ebcdic".into();
        config.limits.request_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "response.default_charset",
                "limits.request_timeout_secs"
            ]
        );
        assert_eq!(
            errors[1].to_string(),
            "response.default_charset: unsupported charset: ebcdic"
        );
    }
}
