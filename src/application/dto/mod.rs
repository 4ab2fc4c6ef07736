pub mod authors;
pub mod categories;
pub mod pagination;
pub mod posts;
pub mod tags;

pub use authors::AuthorDto;
pub use categories::CategoryDto;
pub use pagination::PagedResponse;
pub use posts::{ArchiveEntryDto, EntityRefDto, PostDto, PublishStateDto};
pub use tags::TagDto;
