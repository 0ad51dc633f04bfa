//! Text sources the engine can be fed from.
//!
//! Where text comes from (bundled samples, files on disk, a chunked book store)
//! is the caller's concern. The engine only ever sees a plain string.

mod static_library;

use alloc::string::String;

pub use static_library::{BUNDLED_LIBRARY, LibraryEntry, StaticLibrary, bundled_library};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LibraryError {
    InvalidTextIndex,
}

/// Read-only catalog of texts, addressed by catalog index.
pub trait TextLibrary {
    type Error;

    fn title_count(&self) -> u16;
    fn title_at(&self, index: u16) -> Option<&str>;

    /// Load the full text of entry `index`.
    fn load_text(&mut self, index: u16) -> Result<String, Self::Error>;
}
