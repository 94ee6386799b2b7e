//! Product-name normalization: cleaning, the canonical catalog, and the
//! exact-then-fuzzy matcher that maps raw labels onto it.

pub mod canonical;
pub mod cleaner;
pub mod matcher;

pub use canonical::CANONICAL_PRODUCTS;
pub use cleaner::{clean, display_clean};
pub use matcher::{ProductMatcher, MATCH_THRESHOLD, RENTAL_PRODUCT};
