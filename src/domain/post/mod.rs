pub mod entity;
pub mod ordering;
pub mod query;
pub mod repository;

pub use entity::{
    AuthorRef, CategoryRef, MonthlyPostCount, NewPost, Post, PostUpdate, PublishState, TagLabel,
    TagRef,
};
pub use ordering::{PostOrdering, PostSortKey};
pub use query::{PostFilter, PostQuery};
pub use repository::{PostReadRepository, PostWriteRepository};
