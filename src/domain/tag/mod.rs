pub mod entity;
pub mod repository;

pub use entity::{NewTag, Tag, TagItem, TagUpdate};
pub use repository::TagRepository;
