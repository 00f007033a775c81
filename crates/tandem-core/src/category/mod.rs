//! Transaction categories.
//!
//! A category is a plain label with no independent lifecycle: the usable
//! set is the fixed defaults merged with whatever labels the remote
//! collection already carries.

pub mod repository;

pub use repository::CategoryRepository;

/// Default category labels offered before any custom label exists.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Clothing",
    "Education",
    "Gifts",
    "Groceries",
    "Health",
    "Housing",
    "Investments",
    "Leisure",
    "Other",
    "Transport",
];
