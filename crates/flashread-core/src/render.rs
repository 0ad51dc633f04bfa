//! View models handed to renderers.

use heapless::Vec;

use crate::{
    engine::PlaybackState,
    tokenizer::{BionicWord, MAX_CHUNK_SIZE, ReadingMode},
};

/// Most words shown on each side of the focus word in guided mode.
pub const MAX_GUIDED_CONTEXT: usize = 4;
pub const DEFAULT_GUIDED_CONTEXT: usize = 3;
pub const GUIDED_WINDOW_WORDS: usize = MAX_GUIDED_CONTEXT * 2 + 1;

pub type ChunkWords<'a> = Vec<&'a str, MAX_CHUNK_SIZE>;
pub type GuidedWindow<'a> = Vec<&'a str, GUIDED_WINDOW_WORDS>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Column {
    Left,
    Right,
}

/// The unit currently on screen, shaped for its mode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UnitView<'a> {
    Word(&'a str),
    Bionic(BionicWord<'a>),
    Chunk(ChunkWords<'a>),
    Guided {
        window: GuidedWindow<'a>,
        /// Index of the current word inside `window`.
        focus: usize,
    },
    DualColumn {
        left: &'a str,
        right: Option<&'a str>,
        active: Column,
    },
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadingScreen<'a> {
    pub mode: ReadingMode,
    pub wpm: u16,
    pub playback: PlaybackState,
    pub index: usize,
    pub total: usize,
    /// 0.0..=100.0
    pub progress: f32,
    pub paused_elapsed_ms: u32,
    pub unit: Option<UnitView<'a>>,
}
