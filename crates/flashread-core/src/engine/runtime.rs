impl ReadingEngine {
    /// Advances playback if the pending tick is due.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        if self.disposed {
            return TickResult::NoRender;
        }

        if self.playback == PlaybackState::Playing && self.clock.poll(now_ms).is_some() {
            self.advance(now_ms);
            self.pending_redraw = false;
            return TickResult::RenderRequested;
        }

        if self.pending_redraw {
            self.pending_redraw = false;
            return TickResult::RenderRequested;
        }

        TickResult::NoRender
    }

    /// When the host should call [`tick`](Self::tick) next, if anything is scheduled.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        if self.disposed {
            return None;
        }
        self.clock.next_deadline_ms()
    }

    /// Words moved past since the previous drain.
    pub fn drain_word_updates(&mut self) -> u32 {
        let count = self.words_since_drain;
        self.words_since_drain = 0;
        count
    }

    fn advance(&mut self, now_ms: u64) {
        let passed_words = self.current_word_range().len();
        self.words_since_drain = self
            .words_since_drain
            .saturating_add(passed_words.min(u32::MAX as usize) as u32);
        self.index = (self.index + 1).min(self.total);

        let progress = self.progress();
        trace!(
            "engine: tick index={}/{} progress={:.2}",
            self.index, self.total, progress
        );
        if let Some(on_progress) = self.on_progress.as_mut() {
            on_progress(progress);
        }

        if self.index < self.total {
            self.clock.schedule_next(now_ms);
            return;
        }

        self.playback = PlaybackState::Complete;
        self.clock.cancel();
        debug!("engine: complete total_items={}", self.total);
        if !self.completion_notified {
            self.completion_notified = true;
            if let Some(on_complete) = self.on_complete.as_mut() {
                on_complete();
            }
        }
    }
}
