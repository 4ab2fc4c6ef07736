pub mod entity;
pub mod repository;

pub use entity::{Category, CategoryItem, CategoryUpdate, NewCategory};
pub use repository::CategoryRepository;
