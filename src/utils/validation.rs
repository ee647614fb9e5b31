use crate::utils::error::{Result, SolrEtlError};
use regex::Regex;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SolrEtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SolrEtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SolrEtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_core_name(field_name: &str, core_name: &str) -> Result<()> {
    let re = Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();

    if !re.is_match(core_name) {
        return Err(SolrEtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: core_name.to_string(),
            reason: "Core name may only contain letters, numbers, or underscores".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SolrEtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SolrEtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("hostname", "https://example.com").is_ok());
        assert!(validate_url("hostname", "http://localhost").is_ok());
        assert!(validate_url("hostname", "").is_err());
        assert!(validate_url("hostname", "localhost").is_err());
        assert!(validate_url("hostname", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_core_name() {
        assert!(validate_core_name("core", "mycore").is_ok());
        assert!(validate_core_name("core", "core_2").is_ok());
        assert!(validate_core_name("core", "my-core").is_err());
        assert!(validate_core_name("core", "my core").is_err());
        assert!(validate_core_name("core", "").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("port", 8983u16, 1, 65535).is_ok());
        assert!(validate_range("port", 0u16, 1, 65535).is_err());
        assert!(validate_range("timeout_seconds", 0u64, 1, 300).is_err());
    }
}
