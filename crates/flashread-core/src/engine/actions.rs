impl ReadingEngine {
    pub fn new(text: impl Into<String>, config: EngineConfig) -> Self {
        let config = config.normalized();
        let text = text.into();
        let words = word_spans(&text);
        let total = unit_count(config.mode, words.len(), config.chunk_size);
        let playback = if total == 0 {
            PlaybackState::Complete
        } else {
            PlaybackState::Idle
        };

        debug!(
            "engine: new words={} mode={} total_items={} wpm={} chunk_size={}",
            words.len(),
            config.mode.label(),
            total,
            config.wpm,
            config.chunk_size
        );

        Self {
            text,
            words,
            config,
            playback,
            index: 0,
            total,
            clock: PacingClock::for_rate(config.wpm, config.mode, config.chunk_size),
            on_complete: None,
            on_progress: None,
            completion_notified: false,
            disposed: false,
            pending_redraw: true,
            words_since_drain: 0,
            paused_since_ms: None,
        }
    }

    /// Called once when the session reaches its last unit.
    pub fn with_on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Called after every tick with the new progress percentage.
    pub fn with_on_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f32) + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.disposed {
            return;
        }

        match self.playback {
            PlaybackState::Playing | PlaybackState::Complete => return,
            PlaybackState::Paused => {
                self.resume(now_ms);
                return;
            }
            PlaybackState::Idle => {}
        }

        self.playback = PlaybackState::Playing;
        self.paused_since_ms = None;
        self.clock.schedule_next(now_ms);
        self.pending_redraw = true;
        debug!(
            "engine: start index={}/{} delay_ms={}",
            self.index,
            self.total,
            self.clock.delay_ms()
        );
    }

    pub fn pause(&mut self, now_ms: u64) {
        if self.disposed || self.playback != PlaybackState::Playing {
            return;
        }

        self.clock.cancel();
        self.playback = PlaybackState::Paused;
        self.paused_since_ms = Some(now_ms);
        self.pending_redraw = true;
        debug!("engine: pause index={}/{}", self.index, self.total);
    }

    /// Restarts the full inter-unit delay from `now_ms`.
    pub fn resume(&mut self, now_ms: u64) {
        if self.disposed || self.playback != PlaybackState::Paused {
            return;
        }

        self.playback = PlaybackState::Playing;
        self.paused_since_ms = None;
        self.clock.schedule_next(now_ms);
        self.pending_redraw = true;
        debug!("engine: resume index={}/{}", self.index, self.total);
    }

    pub fn toggle_pause(&mut self, now_ms: u64) {
        if self.is_paused() {
            self.resume(now_ms);
        } else {
            self.pause(now_ms);
        }
    }

    /// Back to the first unit, stopped. Word spans are reused.
    pub fn reset(&mut self) {
        if self.disposed {
            return;
        }

        self.clock.cancel();
        self.index = 0;
        self.total = unit_count(self.config.mode, self.words.len(), self.config.chunk_size);
        self.playback = if self.total == 0 {
            PlaybackState::Complete
        } else {
            PlaybackState::Idle
        };
        self.completion_notified = false;
        self.paused_since_ms = None;
        self.pending_redraw = true;
        debug!("engine: reset total_items={}", self.total);
    }

    /// Replaces the source text and resets. Unchanged text keeps its spans.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.disposed {
            return;
        }

        let text = text.into();
        if text != self.text {
            self.words = word_spans(&text);
            self.text = text;
            debug!("engine: text replaced words={}", self.words.len());
        }
        self.reset();
    }

    /// Clamped to the supported range. A pending tick keeps its deadline.
    pub fn set_wpm(&mut self, wpm: u16) {
        if self.disposed {
            return;
        }

        let wpm = clamp_wpm(wpm);
        if wpm == self.config.wpm {
            return;
        }

        self.config.wpm = wpm;
        self.reconfigure_clock();
        self.pending_redraw = true;
        debug!("engine: wpm={} delay_ms={}", wpm, self.clock.delay_ms());
    }

    pub fn speed_up(&mut self) {
        self.set_wpm(self.config.wpm.saturating_add(WPM_STEP));
    }

    pub fn slow_down(&mut self) {
        self.set_wpm(self.config.wpm.saturating_sub(WPM_STEP));
    }

    /// Switches mode, keeping the reader on the same word.
    pub fn set_mode(&mut self, mode: ReadingMode) {
        if self.disposed || mode == self.config.mode {
            return;
        }

        self.relayout(mode, self.config.chunk_size);
    }

    /// Clamped to `MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE`, keeping the reader on the same word.
    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        if self.disposed {
            return;
        }

        let chunk_size = chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE);
        if chunk_size == self.config.chunk_size {
            return;
        }

        self.relayout(self.config.mode, chunk_size);
    }

    /// Steps back one unit. Leaves any pending tick alone.
    pub fn undo(&mut self) {
        if self.disposed || self.index == 0 {
            return;
        }

        self.index -= 1;
        if self.playback == PlaybackState::Complete {
            self.playback = PlaybackState::Paused;
            self.paused_since_ms = None;
        }
        self.pending_redraw = true;
        debug!("engine: undo index={}/{}", self.index, self.total);
    }

    /// Cancels the clock for good. Later actions and ticks are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        self.clock.cancel();
        self.disposed = true;
        self.on_complete = None;
        self.on_progress = None;
        debug!("engine: disposed index={}/{}", self.index, self.total);
    }

    pub fn apply_persisted_settings(&mut self, settings: PersistedSettings) {
        let config = settings.apply_to(self.config);
        self.set_wpm(config.wpm);
        if self.disposed {
            return;
        }
        if config.mode != self.config.mode || config.chunk_size != self.config.chunk_size {
            self.relayout(config.mode, config.chunk_size);
        }
    }

    fn relayout(&mut self, mode: ReadingMode, chunk_size: usize) {
        let word_count = self.words.len();
        let from_mode = self.config.mode;
        let from_index = self.index;
        let index = remap_between(
            from_mode,
            self.config.chunk_size,
            from_index,
            mode,
            chunk_size,
            word_count,
        );

        self.config.mode = mode;
        self.config.chunk_size = chunk_size;
        self.total = unit_count(mode, word_count, chunk_size);
        self.index = index.min(self.total);

        if self.playback == PlaybackState::Complete && self.index < self.total {
            self.playback = PlaybackState::Idle;
        }

        self.reconfigure_clock();
        self.pending_redraw = true;
        debug!(
            "engine: relayout {}[{}] -> {}[{}] chunk_size={} total_items={} delay_ms={}",
            from_mode.label(),
            from_index,
            mode.label(),
            self.index,
            chunk_size,
            self.total,
            self.clock.delay_ms()
        );
    }

    fn reconfigure_clock(&mut self) {
        self.clock.reconfigure(mode_delay_ms(
            self.config.wpm,
            self.config.mode,
            self.config.chunk_size,
        ));
    }
}
