use alloc::string::String;

use super::{LibraryError, TextLibrary};

/// A titled text stored as paragraphs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LibraryEntry<'a> {
    pub title: &'a str,
    pub paragraphs: &'a [&'a str],
}

const FIXATIONS_PARAGRAPHS: [&str; 3] = [
    "Your eyes do not glide across a line of print. They jump, stop, and jump again. \
Each stop is a fixation, a quarter of a second or so in which the eye is still and the \
brain takes in a handful of letters around the point of focus. The jumps between them, \
called saccades, are fast and nearly blind.",
    "Most of the time spent reading is spent in fixations, and most readers make far more \
of them than they need. They land on short words that could have been read from the \
corner of the eye, and they jump back to words already seen. Every regression costs a \
fixation and breaks the rhythm of the sentence.",
    "Presenting one word at a time in a fixed place removes the jumps altogether. Grouping \
two or three words into a single glance reduces the number of stops. Bolding the first \
letters of a word gives the eye an anchor to land on. None of these tricks replace \
attention, but each of them removes a small amount of friction between the page and the \
reader.",
];

const PACING_PARAGRAPHS: [&str; 2] = [
    "A steady pace is easier to follow than a fast one. Start slow enough that every word \
registers, then raise the speed in small steps once the current rate feels comfortable.",
    "When attention drifts, step back a word or two instead of starting over. The goal is \
to keep moving forward at a rate the mind can actually keep up with.",
];

pub const BUNDLED_LIBRARY: [LibraryEntry<'static>; 2] = [
    LibraryEntry {
        title: "On Fixations",
        paragraphs: &FIXATIONS_PARAGRAPHS,
    },
    LibraryEntry {
        title: "Finding Your Pace",
        paragraphs: &PACING_PARAGRAPHS,
    },
];

pub fn bundled_library() -> StaticLibrary<'static> {
    StaticLibrary::new(&BUNDLED_LIBRARY)
}

/// In-memory library over borrowed entries.
#[derive(Debug, Clone, Copy)]
pub struct StaticLibrary<'a> {
    entries: &'a [LibraryEntry<'a>],
}

impl<'a> StaticLibrary<'a> {
    pub const fn new(entries: &'a [LibraryEntry<'a>]) -> Self {
        Self { entries }
    }
}

impl TextLibrary for StaticLibrary<'_> {
    type Error = LibraryError;

    fn title_count(&self) -> u16 {
        self.entries.len().min(u16::MAX as usize) as u16
    }

    fn title_at(&self, index: u16) -> Option<&str> {
        self.entries.get(index as usize).map(|entry| entry.title)
    }

    fn load_text(&mut self, index: u16) -> Result<String, Self::Error> {
        let entry = self
            .entries
            .get(index as usize)
            .ok_or(LibraryError::InvalidTextIndex)?;
        Ok(entry.paragraphs.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::split_words;

    #[test]
    fn loads_entries_by_index() {
        let mut library = bundled_library();
        assert_eq!(library.title_count(), 2);
        assert_eq!(library.title_at(1), Some("Finding Your Pace"));

        let text = library.load_text(0).unwrap();
        assert!(text.starts_with("Your eyes do not glide"));
        assert!(text.contains("\n\nMost of the time"));
        assert!(split_words(&text).len() > 100);
    }

    #[test]
    fn rejects_unknown_index() {
        let mut library = bundled_library();
        assert_eq!(library.title_at(7), None);
        assert_eq!(library.load_text(7), Err(LibraryError::InvalidTextIndex));
    }

    #[test]
    fn empty_paragraphs_load_as_empty_text() {
        let entries = [LibraryEntry {
            title: "Blank",
            paragraphs: &[],
        }];
        let mut library = StaticLibrary::new(&entries);
        assert_eq!(library.load_text(0).as_deref(), Ok(""));
    }
}
