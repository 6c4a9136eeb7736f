pub mod aggregate;

pub use aggregate::{ProductDraft, ProductResponse};
