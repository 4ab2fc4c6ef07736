pub mod entity;
pub mod repository;

pub use entity::{Author, AuthorItem, AuthorUpdate, NewAuthor};
pub use repository::AuthorRepository;
