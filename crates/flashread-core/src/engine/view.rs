impl ReadingEngine {
    pub fn state(&self) -> ReadingEngineState {
        ReadingEngineState {
            mode: self.config.mode,
            wpm: self.config.wpm,
            is_paused: self.is_paused(),
            is_playing: self.is_playing(),
            is_complete: self.is_complete(),
            progress: self.progress(),
            current_index: self.index,
            total_items: self.total,
        }
    }

    pub const fn config(&self) -> EngineConfig {
        self.config
    }

    pub const fn mode(&self) -> ReadingMode {
        self.config.mode
    }

    pub const fn wpm(&self) -> u16 {
        self.config.wpm
    }

    pub const fn chunk_size(&self) -> usize {
        self.config.chunk_size
    }

    pub const fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub const fn current_index(&self) -> usize {
        self.index
    }

    pub const fn total_items(&self) -> usize {
        self.total
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// True while a session is under way, paused or not.
    pub const fn is_playing(&self) -> bool {
        matches!(self.playback, PlaybackState::Playing | PlaybackState::Paused)
    }

    pub const fn is_paused(&self) -> bool {
        matches!(self.playback, PlaybackState::Paused)
    }

    pub const fn is_complete(&self) -> bool {
        self.index >= self.total
    }

    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Percentage of units passed. Empty text counts as fully read.
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        self.index as f32 / self.total as f32 * 100.0
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(|span| &self.text[span.clone()])
    }

    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(|span| &self.text[span.clone()])
    }

    /// Word position of the current unit's first word.
    pub fn current_word_index(&self) -> Option<usize> {
        let range = self.current_word_range();
        (!range.is_empty()).then_some(range.start)
    }

    /// Current word in the single-word modes.
    pub fn current_word(&self) -> Option<&str> {
        if self.config.mode == ReadingMode::Chunk {
            return None;
        }
        self.current_word_index().and_then(|index| self.word(index))
    }

    /// Current word group in chunk mode.
    pub fn current_chunk(&self) -> Option<ChunkWords<'_>> {
        if self.config.mode != ReadingMode::Chunk {
            return None;
        }

        let range = self.current_word_range();
        if range.is_empty() {
            return None;
        }

        let mut chunk = ChunkWords::new();
        for index in range {
            if let Some(word) = self.word(index) {
                let pushed = chunk.push(word);
                debug_assert!(pushed.is_ok(), "chunk wider than MAX_CHUNK_SIZE");
            }
        }
        Some(chunk)
    }

    /// Current word split at its fixation point, in bionic mode.
    pub fn bionic_text(&self) -> Option<BionicWord<'_>> {
        if self.config.mode != ReadingMode::Bionic {
            return None;
        }
        self.current_word()
            .map(|word| bionic_split(word, self.config.bionic_percent))
    }

    pub fn current_unit(&self) -> Option<UnitView<'_>> {
        match self.config.mode {
            ReadingMode::Rsvp => self.current_word().map(UnitView::Word),
            ReadingMode::Bionic => self.bionic_text().map(UnitView::Bionic),
            ReadingMode::Chunk => self.current_chunk().map(UnitView::Chunk),
            ReadingMode::Guided => self.guided_view(),
            ReadingMode::DualColumn => self.dual_column_view(),
        }
    }

    pub fn with_screen<F>(&self, now_ms: u64, f: F)
    where
        F: FnOnce(ReadingScreen<'_>),
    {
        let paused_elapsed_ms = match (self.playback, self.paused_since_ms) {
            (PlaybackState::Paused, Some(since)) => {
                now_ms.saturating_sub(since).min(u32::MAX as u64) as u32
            }
            _ => 0,
        };

        f(ReadingScreen {
            mode: self.config.mode,
            wpm: self.config.wpm,
            playback: self.playback,
            index: self.index,
            total: self.total,
            progress: self.progress(),
            paused_elapsed_ms,
            unit: self.current_unit(),
        });
    }

    pub fn persisted_settings(&self) -> PersistedSettings {
        PersistedSettings::new(
            self.config.wpm,
            self.config.mode,
            self.config.chunk_size.min(u8::MAX as usize) as u8,
        )
    }

    fn current_word_range(&self) -> Range<usize> {
        unit_bounds(
            self.config.mode,
            self.index,
            self.words.len(),
            self.config.chunk_size,
        )
    }

    fn guided_view(&self) -> Option<UnitView<'_>> {
        let focus_word = self.current_word_index()?;
        let context = self.config.guided_context;
        let start = focus_word.saturating_sub(context);
        let end = focus_word
            .saturating_add(context)
            .saturating_add(1)
            .min(self.words.len());

        let mut window = GuidedWindow::new();
        for index in start..end {
            if let Some(word) = self.word(index) {
                let pushed = window.push(word);
                debug_assert!(pushed.is_ok(), "guided window wider than GUIDED_WINDOW_WORDS");
            }
        }

        Some(UnitView::Guided {
            window,
            focus: focus_word - start,
        })
    }

    fn dual_column_view(&self) -> Option<UnitView<'_>> {
        let focus_word = self.current_word_index()?;
        let pair_start = focus_word - focus_word % 2;
        let left = self.word(pair_start)?;

        Some(UnitView::DualColumn {
            left,
            right: self.word(pair_start + 1),
            active: if focus_word % 2 == 0 {
                Column::Left
            } else {
                Column::Right
            },
        })
    }
}
