use crate::domain::model::Credentials;
use crate::domain::ports::ConnectionProvider;
use crate::utils::error::{Result, SolrEtlError};
use crate::utils::validation::{
    validate_core_name, validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub connection: ConnectionConfig,
    pub indexing: Option<IndexingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub hostname: String,
    pub port: Option<u16>,
    pub core: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingConfig {
    pub redact: Option<Vec<String>>,
    pub output_path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SolrEtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SolrEtlError::InvalidConfigValueError {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SOLR_PASSWORD})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn redact(&self) -> Option<&[String]> {
        self.indexing.as_ref()?.redact.as_deref()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.indexing.as_ref()?.output_path.as_deref()
    }
}

impl ConnectionProvider for TomlConfig {
    fn hostname(&self) -> &str {
        &self.connection.hostname
    }

    fn port(&self) -> u16 {
        self.connection.port.unwrap_or(8983)
    }

    fn core_name(&self) -> &str {
        &self.connection.core
    }

    fn credentials(&self) -> Option<Credentials> {
        match (&self.connection.username, &self.connection.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Credentials {
                    username: username.clone(),
                    password: password.clone(),
                })
            }
            _ => None,
        }
    }

    fn timeout_seconds(&self) -> u64 {
        self.connection.timeout_seconds.unwrap_or(5)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("connection.hostname", &self.connection.hostname)?;
        validate_range("connection.port", self.port(), 1, 65535)?;
        validate_core_name("connection.core", &self.connection.core)?;
        validate_range("connection.timeout_seconds", self.timeout_seconds(), 1, 300)?;

        if let Some(redact) = self.redact() {
            for name in redact {
                validate_non_empty_string("indexing.redact", name)?;
            }
        }
        match (&self.connection.username, &self.connection.password) {
            (Some(_), None) => {
                return Err(SolrEtlError::MissingConfigError {
                    field: "connection.password".to_string(),
                })
            }
            (None, Some(_)) => {
                return Err(SolrEtlError::MissingConfigError {
                    field: "connection.username".to_string(),
                })
            }
            _ => {}
        }
        Ok(())
    }
}
