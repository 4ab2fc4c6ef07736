// src/application/ports/mod.rs
pub mod cache;
pub mod media;
pub mod time;
pub mod util;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type ClockPort = dyn time::Clock;
pub type SlugGeneratorPort = dyn util::SlugGenerator;
pub type LookupCachePort = dyn cache::LookupCache;
pub type MediaStorePort = dyn media::MediaStore;
