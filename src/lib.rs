pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{solr::SolrClient, storage::LocalStorage};
pub use config::{CliConfig, TomlConfig};
pub use crate::core::engine::IndexingEngine;
pub use domain::model::{
    BatchResult, CoreDescriptor, FlatDocument, IndexOutcome, RedactionSet, RejectionReason,
};
pub use utils::error::{Result, SolrEtlError};
