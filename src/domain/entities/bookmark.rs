//! Per-user recipe collections: favorites and the shopping cart.

use std::fmt;

/// Collection a user can put a recipe into.
///
/// Both collections are plain (user, recipe) join rows with a uniqueness
/// constraint; they differ only in what they are used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookmarkKind {
    Favorite,
    ShoppingCart,
}

impl BookmarkKind {
    /// Human-readable collection name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            BookmarkKind::Favorite => "favorites",
            BookmarkKind::ShoppingCart => "shopping cart",
        }
    }
}

impl fmt::Display for BookmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
