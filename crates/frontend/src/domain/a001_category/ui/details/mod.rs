//! Карточка категории.
//!
//! - view.rs: компонент формы (имя плюс выбор родителя каскадом)

mod view;

pub use view::CategoryDetails;
