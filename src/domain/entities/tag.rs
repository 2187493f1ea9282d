//! Tag entity used to categorize recipes.

/// Maximum length of a tag name and slug.
pub const TAG_MAX_LENGTH: u64 = 32;

/// A recipe category such as "Breakfast".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Input data for creating a tag.
#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub slug: String,
}

/// Returns true if `slug` is non-empty and consists of ASCII letters,
/// digits, hyphens and underscores.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(is_valid_slug("breakfast"));
        assert!(is_valid_slug("late-night_snack2"));
    }

    #[test]
    fn test_invalid_slugs() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("ужин"));
    }
}
