//! Карточка товара: основные поля плюс каскадный выбор категории.

mod view;

pub use view::ProductDetails;
