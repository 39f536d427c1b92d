//! Saved component library.

pub mod record;
pub mod store;

pub use record::{NewComponent, SavedComponent};
pub use store::{ComponentLibrary, DEFAULT_LIBRARY_FILE};
