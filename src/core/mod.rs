pub mod engine;
pub mod flatten;
pub mod normalize;
pub mod transform;

pub use crate::domain::model::{
    BatchResult, FieldValue, FlatDocument, IndexOutcome, RedactionSet, Rejection, RejectionReason,
};
pub use crate::domain::ports::{ConnectionProvider, SearchIndex, Storage};
pub use crate::utils::error::Result;
