#![cfg_attr(not(test), no_std)]

//! Platform-independent speed-reading engine.
//!
//! Text is split into words once, then presented one unit at a time in one of
//! several reading modes. Pacing is driven by the host through
//! [`ReadingEngine::tick`], so the same engine runs under an async executor,
//! a frame loop, or a simulated clock.

extern crate alloc;

pub mod content;
pub mod engine;
pub mod input;
pub mod pacing;
pub mod render;
pub mod settings;
pub mod tokenizer;

pub use engine::{
    EngineConfig, PlaybackState, ReadingEngine, ReadingEngineState, TickResult, remap_index,
};
pub use pacing::{MAX_WPM, MIN_WPM, PacingClock};
pub use tokenizer::{ReadingMode, Tokens, tokenize};
