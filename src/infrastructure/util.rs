use crate::application::ports::util::SlugGenerator;
use slug::slugify;

#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Slug;

    #[test]
    fn output_is_a_valid_slug() {
        let generated = DefaultSlugGenerator.slugify("Ownership & Borrowing, Explained!");
        assert_eq!(generated, "ownership-borrowing-explained");
        assert!(Slug::new(generated).is_ok());
    }
}
