impl ReadingEngine {
    /// Applies every queued event from `input`. Returns how many were applied.
    pub fn process_inputs<IN>(&mut self, input: &mut IN, now_ms: u64) -> Result<u16, IN::Error>
    where
        IN: InputProvider,
    {
        let mut applied = 0u16;
        while let Some(event) = input.poll_event()? {
            self.apply_input(event, now_ms);
            applied = applied.saturating_add(1);
        }
        Ok(applied)
    }

    pub fn apply_input(&mut self, event: InputEvent, now_ms: u64) {
        debug!(
            "engine: input {:?} playback={} index={}/{}",
            event,
            self.playback.label(),
            self.index,
            self.total
        );

        match event {
            InputEvent::Start => self.start(now_ms),
            InputEvent::TogglePause => match self.playback {
                PlaybackState::Idle => self.start(now_ms),
                _ => self.toggle_pause(now_ms),
            },
            InputEvent::SpeedUp => self.speed_up(),
            InputEvent::SlowDown => self.slow_down(),
            InputEvent::Undo => self.undo(),
            InputEvent::Reset => self.reset(),
            InputEvent::NextMode => self.set_mode(self.config.mode.next()),
        }
    }
}
