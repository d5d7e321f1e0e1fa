//! Asset providers backed by platform storage.
//!
//! - [`SiteResourceProvider`]: reads assets relative to the site's base directory
//!
//! The in-memory provider from `ogcard-traits` is re-exported for hosts that
//! already hold asset bytes.

mod filesystem;

pub use filesystem::SiteResourceProvider;

pub use ogcard_traits::InMemoryResourceProvider;
