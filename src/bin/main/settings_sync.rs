use core::fmt::Debug;

use flashread_core::settings::{PersistedSettings, SettingsStore};
use log::{debug, warn};

use super::SETTINGS_SAVE_DEBOUNCE_MS;

/// Debounces settings writes so rapid speed changes produce one save.
pub(super) struct SettingsSyncState {
    last_saved: PersistedSettings,
    pending: Option<(PersistedSettings, u64)>,
}

impl SettingsSyncState {
    pub(super) fn new(initial: PersistedSettings) -> Self {
        Self {
            last_saved: initial,
            pending: None,
        }
    }

    pub(super) fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub(super) fn track_current(&mut self, current: PersistedSettings, now_ms: u64) {
        if current == self.last_saved {
            self.pending = None;
            return;
        }

        match self.pending.as_mut() {
            Some((pending, changed_at_ms)) => {
                if *pending != current {
                    *pending = current;
                    *changed_at_ms = now_ms;
                }
            }
            None => {
                self.pending = Some((current, now_ms));
            }
        }
    }

    pub(super) fn flush_if_due<S>(&mut self, store: Option<&mut S>, now_ms: u64)
    where
        S: SettingsStore,
        S::Error: Debug,
    {
        let Some((_, changed_at_ms)) = self.pending else {
            return;
        };

        if now_ms.saturating_sub(changed_at_ms) < SETTINGS_SAVE_DEBOUNCE_MS {
            return;
        }

        self.flush(store, now_ms);
    }

    /// Saves any pending change regardless of the debounce window.
    pub(super) fn flush_now<S>(&mut self, store: Option<&mut S>, now_ms: u64)
    where
        S: SettingsStore,
        S::Error: Debug,
    {
        if self.pending.is_some() {
            self.flush(store, now_ms);
        }
    }

    fn flush<S>(&mut self, store: Option<&mut S>, now_ms: u64)
    where
        S: SettingsStore,
        S::Error: Debug,
    {
        let Some((candidate, _)) = self.pending else {
            return;
        };

        match store {
            Some(store) => match store.save(&candidate) {
                Ok(()) => {
                    debug!(
                        "settings-save: flushed wpm={} mode={} chunk_size={}",
                        candidate.wpm,
                        candidate.mode.label(),
                        candidate.chunk_size
                    );
                    self.last_saved = candidate;
                    self.pending = None;
                }
                Err(err) => {
                    // Keep pending changes and retry after another debounce window.
                    warn!("settings-save: failed err={:?}", err);
                    self.pending = Some((candidate, now_ms));
                }
            },
            None => {
                self.last_saved = candidate;
                self.pending = None;
            }
        }
    }
}
