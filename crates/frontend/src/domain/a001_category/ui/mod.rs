pub mod cascade;
pub mod details;
pub mod list;
