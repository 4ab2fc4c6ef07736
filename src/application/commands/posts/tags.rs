use super::PostCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        post::TagLabel,
        tag::entity::MAX_NAME_LEN,
        value_objects::{Slug, required_text},
    },
};

impl PostCommandService {
    /// Turns free-form tag names into labels, dropping blanks and repeated slugs.
    pub(super) fn tag_labels(&self, names: Vec<String>) -> ApplicationResult<Vec<TagLabel>> {
        let mut labels: Vec<TagLabel> = Vec::with_capacity(names.len());
        for name in names {
            if name.trim().is_empty() {
                continue;
            }
            let name = required_text("tag name", name, MAX_NAME_LEN)?;
            let slug = Slug::new(self.slugger.slugify(&name)).map_err(|_| {
                ApplicationError::validation(format!("tag '{name}' has no usable characters"))
            })?;
            if labels.iter().any(|label| label.slug == slug) {
                continue;
            }
            labels.push(TagLabel { name, slug });
        }
        Ok(labels)
    }
}
