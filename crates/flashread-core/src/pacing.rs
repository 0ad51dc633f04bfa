//! Word-rate pacing and the single-shot advancement timer.
//!
//! The clock never sleeps on its own. It records when the next unit is due and
//! the owner polls it with the current time, so hosts can drive it from a
//! frame loop, an async timer, or a simulated clock in tests.

use crate::tokenizer::ReadingMode;

pub const MIN_WPM: u16 = 100;
pub const MAX_WPM: u16 = 800;
pub const DEFAULT_WPM: u16 = 300;
pub const WPM_STEP: u16 = 25;

pub fn clamp_wpm(wpm: u16) -> u16 {
    wpm.clamp(MIN_WPM, MAX_WPM)
}

/// Milliseconds one unit stays on screen: the time `words_per_unit` words take
/// at `wpm`, so every mode reads at the same per-word rate.
pub fn unit_delay_ms(wpm: u16, words_per_unit: usize) -> u32 {
    let wpm = wpm.max(1) as u64;
    let words = words_per_unit.max(1) as u64;
    (60_000 * words / wpm).min(u32::MAX as u64) as u32
}

pub fn mode_delay_ms(wpm: u16, mode: ReadingMode, chunk_size: usize) -> u32 {
    unit_delay_ms(wpm, mode.words_per_unit(chunk_size))
}

/// Identifies one arming of a [`PacingClock`]. Re-arming or cancelling
/// invalidates every earlier handle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerHandle(u32);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PendingTick {
    handle: TimerHandle,
    due_ms: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PacingClock {
    delay_ms: u32,
    generation: u32,
    pending: Option<PendingTick>,
}

impl PacingClock {
    pub const fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms: if delay_ms == 0 { 1 } else { delay_ms },
            generation: 0,
            pending: None,
        }
    }

    pub fn for_rate(wpm: u16, mode: ReadingMode, chunk_size: usize) -> Self {
        Self::new(mode_delay_ms(wpm, mode, chunk_size))
    }

    pub const fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Changes the delay used by the next [`schedule_next`](Self::schedule_next).
    /// A tick that is already pending keeps its deadline.
    pub fn reconfigure(&mut self, delay_ms: u32) {
        self.delay_ms = delay_ms.max(1);
    }

    /// Arms a single-shot tick `delay_ms` after `now_ms`, replacing any pending one.
    pub fn schedule_next(&mut self, now_ms: u64) -> TimerHandle {
        self.generation = self.generation.wrapping_add(1);
        let handle = TimerHandle(self.generation);
        self.pending = Some(PendingTick {
            handle,
            due_ms: now_ms.saturating_add(self.delay_ms as u64),
        });
        handle
    }

    /// Drops the pending tick. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.pending.map(|pending| pending.due_ms)
    }

    /// Fires the pending tick if it is due, disarming the clock.
    pub fn poll(&mut self, now_ms: u64) -> Option<TimerHandle> {
        match self.pending {
            Some(pending) if now_ms >= pending.due_ms => {
                self.pending = None;
                Some(pending.handle)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_word_rate_equivalent() {
        assert_eq!(unit_delay_ms(300, 1), 200);
        assert_eq!(unit_delay_ms(300, 3), 600);
        assert_eq!(mode_delay_ms(600, ReadingMode::Rsvp, 3), 100);
        assert_eq!(mode_delay_ms(600, ReadingMode::Chunk, 3), 300);
        assert_eq!(mode_delay_ms(600, ReadingMode::Bionic, 5), 100);
    }

    #[test]
    fn chunk_delay_rounds_once() {
        // 60000 / 700 = 85.7 per word; three words should not lose 2ms to truncation.
        assert_eq!(unit_delay_ms(700, 1), 85);
        assert_eq!(unit_delay_ms(700, 3), 257);
    }

    #[test]
    fn wpm_clamps_to_bounds() {
        assert_eq!(clamp_wpm(50), MIN_WPM);
        assert_eq!(clamp_wpm(1_000), MAX_WPM);
        assert_eq!(clamp_wpm(425), 425);
    }

    #[test]
    fn fires_once_when_due() {
        let mut clock = PacingClock::new(200);
        let handle = clock.schedule_next(1_000);

        assert_eq!(clock.next_deadline_ms(), Some(1_200));
        assert_eq!(clock.poll(1_199), None);
        assert_eq!(clock.poll(1_200), Some(handle));
        assert_eq!(clock.poll(5_000), None);
        assert!(!clock.is_pending());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut clock = PacingClock::new(200);
        assert!(!clock.cancel());

        clock.schedule_next(0);
        assert!(clock.cancel());
        assert!(!clock.cancel());
        assert_eq!(clock.poll(10_000), None);
    }

    #[test]
    fn rearming_invalidates_previous_handle() {
        let mut clock = PacingClock::new(100);
        let first = clock.schedule_next(0);
        let second = clock.schedule_next(50);

        assert_ne!(first, second);
        assert_eq!(clock.poll(100), None);
        assert_eq!(clock.poll(150), Some(second));
        assert_eq!(clock.poll(10_000), None);
    }

    #[test]
    fn reconfigure_applies_to_next_arm_only() {
        let mut clock = PacingClock::new(200);
        clock.schedule_next(0);
        clock.reconfigure(100);

        assert_eq!(clock.next_deadline_ms(), Some(200));
        assert!(clock.poll(200).is_some());

        clock.schedule_next(200);
        assert_eq!(clock.next_deadline_ms(), Some(300));
    }

    #[test]
    fn zero_delay_is_bumped() {
        let mut clock = PacingClock::new(0);
        clock.reconfigure(0);
        assert_eq!(clock.delay_ms(), 1);
    }
}
