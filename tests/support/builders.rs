// tests/support/builders.rs
use quill_core::application::commands::{
    authors::AuthorCommand, categories::CategoryCommand, posts::CreatePostCommand,
    tags::TagCommand,
};

pub struct PostBuilder {
    command: CreatePostCommand,
}

impl PostBuilder {
    pub fn new(title: impl Into<String>, author_id: i64) -> Self {
        Self {
            command: CreatePostCommand {
                title: title.into(),
                short_description: "A short summary".into(),
                description: "The full body of the post".into(),
                author_id,
                ..Default::default()
            },
        }
    }

    pub fn published(mut self) -> Self {
        self.command.published = true;
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.command.slug = Some(slug.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.command.description = description.into();
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.command.category_id = Some(category_id);
        self
    }

    pub fn tag(mut self, name: impl Into<String>) -> Self {
        self.command.tags.push(name.into());
        self
    }

    pub fn build(self) -> CreatePostCommand {
        self.command
    }
}

pub fn author_command(full_name: &str) -> AuthorCommand {
    let local = full_name.to_ascii_lowercase().replace(' ', ".");
    AuthorCommand {
        full_name: full_name.into(),
        email: format!("{local}@example.com"),
        ..Default::default()
    }
}

pub fn category_command(name: &str) -> CategoryCommand {
    CategoryCommand {
        name: name.into(),
        slug: None,
        description: None,
        show_on_menu: true,
    }
}

pub fn tag_command(name: &str) -> TagCommand {
    TagCommand {
        name: name.into(),
        slug: None,
        description: None,
    }
}
