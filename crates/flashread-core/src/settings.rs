//! Persisted user settings abstraction.

use crate::{
    engine::EngineConfig,
    pacing::{DEFAULT_WPM, clamp_wpm},
    tokenizer::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE, ReadingMode},
};

/// User-tunable settings that should survive restarts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PersistedSettings {
    pub wpm: u16,
    pub mode: ReadingMode,
    pub chunk_size: u8,
}

impl PersistedSettings {
    pub const fn new(wpm: u16, mode: ReadingMode, chunk_size: u8) -> Self {
        Self {
            wpm,
            mode,
            chunk_size,
        }
    }

    /// Overlays these settings on `config`, clamping out-of-range values.
    pub fn apply_to(self, config: EngineConfig) -> EngineConfig {
        EngineConfig {
            mode: self.mode,
            wpm: clamp_wpm(self.wpm),
            chunk_size: (self.chunk_size as usize).clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE),
            ..config
        }
    }
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self::new(DEFAULT_WPM, ReadingMode::Rsvp, DEFAULT_CHUNK_SIZE as u8)
    }
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}

/// Volatile store, for hosts without storage and for tests.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MemorySettingsStore {
    saved: Option<PersistedSettings>,
    saves: u32,
}

impl MemorySettingsStore {
    pub const fn new() -> Self {
        Self {
            saved: None,
            saves: 0,
        }
    }

    pub const fn save_count(&self) -> u32 {
        self.saves
    }
}

impl SettingsStore for MemorySettingsStore {
    type Error = core::convert::Infallible;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        Ok(self.saved)
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        self.saved = Some(*settings);
        self.saves = self.saves.saturating_add(1);
        Ok(())
    }
}
