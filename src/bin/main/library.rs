use std::{
    fs, io,
    path::{Path, PathBuf},
};

use flashread_core::content::TextLibrary;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(super) enum FileLibraryError {
    InvalidTextIndex,
    Io(io::ErrorKind),
}

impl From<io::Error> for FileLibraryError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.kind())
    }
}

/// Plain-text files given on the command line, titled by file stem.
#[derive(Debug, Default)]
pub(super) struct FileLibrary {
    entries: Vec<(String, PathBuf)>,
}

impl FileLibrary {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn push(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.entries.push((title_for(&path), path));
    }
}

impl TextLibrary for FileLibrary {
    type Error = FileLibraryError;

    fn title_count(&self) -> u16 {
        self.entries.len().min(u16::MAX as usize) as u16
    }

    fn title_at(&self, index: u16) -> Option<&str> {
        self.entries
            .get(index as usize)
            .map(|(title, _)| title.as_str())
    }

    fn load_text(&mut self, index: u16) -> Result<String, Self::Error> {
        let (_, path) = self
            .entries
            .get(index as usize)
            .ok_or(FileLibraryError::InvalidTextIndex)?;
        Ok(fs::read_to_string(path)?)
    }
}

fn title_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
