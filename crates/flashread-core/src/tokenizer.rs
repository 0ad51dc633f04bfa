//! Splits source text into words and groups them into presentation units.
//!
//! Words are contiguous runs of non-whitespace characters. Every reading mode
//! is laid over the same word sequence: word modes show one word per unit,
//! chunk mode shows `chunk_size` consecutive words per unit, and bionic mode
//! shows one word with its fixation prefix split out.

use alloc::vec::Vec;
use core::ops::Range;

pub const DEFAULT_CHUNK_SIZE: usize = 3;
pub const MIN_CHUNK_SIZE: usize = 2;
pub const MAX_CHUNK_SIZE: usize = 5;

/// Share of each word's characters rendered bold in bionic mode.
pub const DEFAULT_BIONIC_PERCENT: u8 = 40;

/// Presentation strategy for a reading session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ReadingMode {
    #[default]
    Rsvp,
    Bionic,
    Chunk,
    Guided,
    DualColumn,
}

impl ReadingMode {
    pub const ALL: [Self; 5] = [
        Self::Rsvp,
        Self::Bionic,
        Self::Chunk,
        Self::Guided,
        Self::DualColumn,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Rsvp => "rsvp",
            Self::Bionic => "bionic",
            Self::Chunk => "chunk",
            Self::Guided => "guided",
            Self::DualColumn => "dual-column",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Next mode in display order, wrapping around.
    pub fn next(self) -> Self {
        let position = Self::ALL
            .iter()
            .position(|mode| *mode == self)
            .unwrap_or(0);
        Self::ALL[(position + 1) % Self::ALL.len()]
    }

    /// Words consumed by one presentation unit.
    pub const fn words_per_unit(self, chunk_size: usize) -> usize {
        match self {
            Self::Chunk => {
                if chunk_size == 0 {
                    1
                } else {
                    chunk_size
                }
            }
            Self::Rsvp | Self::Bionic | Self::Guided | Self::DualColumn => 1,
        }
    }
}

/// A word split at its fixation point.
///
/// `bold` and `normal` always concatenate back to `original`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BionicWord<'a> {
    pub bold: &'a str,
    pub normal: &'a str,
    pub original: &'a str,
}

/// One presentation unit borrowed from a [`Tokens`] sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Unit<'a> {
    Word(&'a str),
    Chunk(&'a [&'a str]),
    Bionic(BionicWord<'a>),
}

/// Tokenized text for one mode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tokens<'a> {
    words: Vec<&'a str>,
    mode: ReadingMode,
    chunk_size: usize,
    bionic_percent: u8,
}

impl<'a> Tokens<'a> {
    pub fn words(&self) -> &[&'a str] {
        &self.words
    }

    pub const fn mode(&self) -> ReadingMode {
        self.mode
    }

    pub fn total_items(&self) -> usize {
        unit_count(self.mode, self.words.len(), self.chunk_size)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn unit(&self, index: usize) -> Option<Unit<'_>> {
        if index >= self.total_items() {
            return None;
        }

        let bounds = unit_bounds(self.mode, index, self.words.len(), self.chunk_size);
        Some(match self.mode {
            ReadingMode::Chunk => Unit::Chunk(&self.words[bounds]),
            ReadingMode::Bionic => {
                Unit::Bionic(bionic_split(self.words[bounds.start], self.bionic_percent))
            }
            ReadingMode::Rsvp | ReadingMode::Guided | ReadingMode::DualColumn => {
                Unit::Word(self.words[bounds.start])
            }
        })
    }

    pub fn units(&self) -> impl Iterator<Item = Unit<'_>> + '_ {
        (0..self.total_items()).filter_map(|index| self.unit(index))
    }
}

/// Tokenizes `text` for `mode` with the default bionic ratio.
pub fn tokenize(text: &str, mode: ReadingMode, chunk_size: usize) -> Tokens<'_> {
    tokenize_with(text, mode, chunk_size, DEFAULT_BIONIC_PERCENT)
}

pub fn tokenize_with(
    text: &str,
    mode: ReadingMode,
    chunk_size: usize,
    bionic_percent: u8,
) -> Tokens<'_> {
    Tokens {
        words: split_words(text),
        mode,
        chunk_size: chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE),
        bionic_percent,
    }
}

/// Byte spans of every word in `text`, in order.
pub fn word_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut cursor = 0usize;

    while let Some((span, next_cursor)) = next_word_at(text, cursor) {
        spans.push(span);
        cursor = next_cursor;
    }

    spans
}

pub fn split_words(text: &str) -> Vec<&str> {
    word_spans(text)
        .into_iter()
        .map(|span| &text[span])
        .collect()
}

/// Finds the first word starting at or after byte offset `cursor`.
///
/// Returns the word span and the offset to continue scanning from.
pub(crate) fn next_word_at(text: &str, cursor: usize) -> Option<(Range<usize>, usize)> {
    let rest = text.get(cursor..)?;
    let mut chars = rest.char_indices();

    let start = loop {
        match chars.next() {
            Some((_, ch)) if ch.is_whitespace() => {}
            Some((offset, _)) => break cursor + offset,
            None => return None,
        }
    };

    let end = chars
        .find(|(_, ch)| ch.is_whitespace())
        .map(|(offset, _)| cursor + offset)
        .unwrap_or(text.len());

    Some((start..end, end))
}

/// Number of presentation units `word_count` words produce in `mode`.
pub fn unit_count(mode: ReadingMode, word_count: usize, chunk_size: usize) -> usize {
    word_count.div_ceil(mode.words_per_unit(chunk_size))
}

/// Word index range covered by unit `index`. Empty past the end.
pub fn unit_bounds(
    mode: ReadingMode,
    index: usize,
    word_count: usize,
    chunk_size: usize,
) -> Range<usize> {
    let per_unit = mode.words_per_unit(chunk_size);
    let start = index.saturating_mul(per_unit).min(word_count);
    let end = start.saturating_add(per_unit).min(word_count);
    start..end
}

/// Bold prefix length in characters: `percent` of the word, rounded half up,
/// never less than one character for a non-empty word.
pub fn bionic_prefix_chars(char_count: usize, percent: u8) -> usize {
    if char_count == 0 {
        return 0;
    }

    let scaled = (char_count * percent as usize + 50) / 100;
    scaled.clamp(1, char_count)
}

pub fn bionic_split(word: &str, percent: u8) -> BionicWord<'_> {
    let bold_chars = bionic_prefix_chars(word.chars().count(), percent);
    let split = word
        .char_indices()
        .nth(bold_chars)
        .map(|(offset, _)| offset)
        .unwrap_or(word.len());

    BionicWord {
        bold: &word[..split],
        normal: &word[split..],
        original: word,
    }
}
