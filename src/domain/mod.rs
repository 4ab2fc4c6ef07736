pub mod author;
pub mod category;
pub mod errors;
pub mod pagination;
pub mod post;
pub mod tag;
pub mod value_objects;
