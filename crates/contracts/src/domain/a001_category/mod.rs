pub mod aggregate;

pub use aggregate::{CategoryNode, CategoryTreeData, CategoryTreeResponse, CategoryUpsertRequest};
