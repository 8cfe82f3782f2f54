//! Shared helpers

pub mod paths;

pub use paths::{is_within, normalize_lexically, CanonicalResolver, PathResolver, RootRestriction};
