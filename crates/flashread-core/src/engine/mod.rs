//! Reading engine: playback state machine over tokenized text.
//!
//! The engine owns the source text, its word spans, and a [`PacingClock`].
//! Hosts call the action methods on user input and [`ReadingEngine::tick`]
//! with the current time; everything else is derived from the current index.

use alloc::{boxed::Box, string::String, vec::Vec};
use core::ops::Range;

use log::{debug, trace};

use crate::{
    input::{InputEvent, InputProvider},
    pacing::{DEFAULT_WPM, PacingClock, WPM_STEP, clamp_wpm, mode_delay_ms},
    render::{
        ChunkWords, Column, DEFAULT_GUIDED_CONTEXT, GuidedWindow, MAX_GUIDED_CONTEXT,
        ReadingScreen, UnitView,
    },
    settings::PersistedSettings,
    tokenizer::{
        BionicWord, DEFAULT_BIONIC_PERCENT, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE,
        ReadingMode, bionic_split, unit_bounds, unit_count, word_spans,
    },
};

mod remap;

pub use remap::{remap_between, remap_index, unit_to_word, word_to_unit};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Complete,
}

impl PlaybackState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Complete => "complete",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    pub mode: ReadingMode,
    pub wpm: u16,
    pub chunk_size: usize,
    /// Bold share of each word in bionic mode, 0..=100.
    pub bionic_percent: u8,
    /// Words shown on each side of the focus word in guided mode.
    pub guided_context: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: ReadingMode::Rsvp,
            wpm: DEFAULT_WPM,
            chunk_size: DEFAULT_CHUNK_SIZE,
            bionic_percent: DEFAULT_BIONIC_PERCENT,
            guided_context: DEFAULT_GUIDED_CONTEXT,
        }
    }
}

impl EngineConfig {
    pub fn normalized(self) -> Self {
        Self {
            mode: self.mode,
            wpm: clamp_wpm(self.wpm),
            chunk_size: self.chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE),
            bionic_percent: self.bionic_percent.min(100),
            guided_context: self.guided_context.min(MAX_GUIDED_CONTEXT),
        }
    }
}

/// Snapshot of the observable session state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReadingEngineState {
    pub mode: ReadingMode,
    pub wpm: u16,
    pub is_paused: bool,
    pub is_playing: bool,
    pub is_complete: bool,
    pub progress: f32,
    pub current_index: usize,
    pub total_items: usize,
}

pub type CompleteCallback = Box<dyn FnMut()>;
pub type ProgressCallback = Box<dyn FnMut(f32)>;

pub struct ReadingEngine {
    text: String,
    words: Vec<Range<usize>>,
    config: EngineConfig,
    playback: PlaybackState,
    index: usize,
    total: usize,
    clock: PacingClock,
    on_complete: Option<CompleteCallback>,
    on_progress: Option<ProgressCallback>,
    completion_notified: bool,
    disposed: bool,
    pending_redraw: bool,
    words_since_drain: u32,
    paused_since_ms: Option<u64>,
}

impl core::fmt::Debug for ReadingEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReadingEngine")
            .field("words", &self.words.len())
            .field("config", &self.config)
            .field("playback", &self.playback)
            .field("index", &self.index)
            .field("total", &self.total)
            .field("clock", &self.clock)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

include!("actions.rs");
include!("runtime.rs");
include!("view.rs");
include!("input.rs");
