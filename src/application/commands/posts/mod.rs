// src/application/commands/posts/mod.rs
mod create;
mod delete;
mod image;
mod publish;
mod service;
mod tags;
mod update;
mod views;

pub use create::CreatePostCommand;
pub use service::{PostCommandPorts, PostCommandService};
pub use update::UpdatePostCommand;
