pub mod toml_config;

use crate::domain::model::Credentials;
use crate::domain::ports::ConnectionProvider;
use crate::utils::error::{Result, SolrEtlError};
use crate::utils::validation::{
    validate_core_name, validate_non_empty_string, validate_range, validate_url, Validate,
};
use clap::{Parser, Subcommand};

pub use toml_config::TomlConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "solr-etl")]
#[command(about = "Flattens nested JSON and bulk-indexes it into Apache Solr")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost")]
    pub hostname: String,

    #[arg(long, default_value = "8983")]
    pub port: u16,

    #[arg(long, default_value = "mycore")]
    pub core: String,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long, default_value = "5")]
    pub timeout_seconds: u64,

    #[arg(long, value_delimiter = ',', default_value = "sensitive_data")]
    pub redact: Vec<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Load connection settings from a TOML file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch core metadata and sample documents, then write the snapshot file
    Describe {
        #[arg(long, default_value = "10")]
        sample_size: usize,
    },
    /// Flatten a nested JSON file and submit it to the index
    Index {
        file: String,

        #[arg(long, help = "Submit the payload as-is without flattening")]
        raw: bool,

        #[arg(long, help = "Skip the immediate commit")]
        no_commit: bool,
    },
    /// Flatten a nested JSON file and save the result without submitting
    Transform {
        file: String,

        #[arg(long, default_value = "solr_fixed.json")]
        output: String,
    },
}

impl ConnectionProvider for CliConfig {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn core_name(&self) -> &str {
        &self.core
    }

    fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
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
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("hostname", &self.hostname)?;
        validate_range("port", self.port, 1, 65535)?;
        validate_core_name("core", &self.core)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        for name in &self.redact {
            validate_non_empty_string("redact", name)?;
        }
        match (&self.username, &self.password) {
            (Some(_), None) => {
                return Err(SolrEtlError::MissingConfigError {
                    field: "password".to_string(),
                })
            }
            (None, Some(_)) => {
                return Err(SolrEtlError::MissingConfigError {
                    field: "username".to_string(),
                })
            }
            _ => {}
        }
        Ok(())
    }
}
