pub mod api;
pub mod cascade;
pub mod ui;
