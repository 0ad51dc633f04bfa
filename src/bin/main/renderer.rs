use core::fmt::Write as _;
use std::io::{self, Write};

use flashread_core::{
    PlaybackState,
    render::{Column, ReadingScreen, UnitView},
};

const STATUS_LINE_BYTES: usize = 96;
const DUAL_COLUMN_WIDTH: usize = 18;

const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_CLEAR_LINE: &str = "\r\x1b[2K";

pub(super) type StatusLine = heapless::String<STATUS_LINE_BYTES>;

/// Single-line terminal renderer.
///
/// With ANSI enabled the line is redrawn in place; plain mode prints one line
/// per frame so output stays readable when piped.
pub(super) struct TerminalRenderer<W: Write> {
    out: W,
    ansi: bool,
    frames: u64,
}

impl<W: Write> TerminalRenderer<W> {
    pub(super) fn new(out: W, ansi: bool) -> Self {
        Self {
            out,
            ansi,
            frames: 0,
        }
    }

    pub(super) fn frames(&self) -> u64 {
        self.frames
    }

    pub(super) fn render(&mut self, screen: &ReadingScreen<'_>) -> io::Result<()> {
        let unit = format_unit(screen.unit.as_ref(), self.ansi);
        let status = status_line(screen);

        if self.ansi {
            write!(self.out, "{ANSI_CLEAR_LINE}{unit:<40} {status}")?;
        } else {
            writeln!(self.out, "{unit:<40} {status}")?;
        }
        self.out.flush()?;
        self.frames = self.frames.saturating_add(1);
        Ok(())
    }

    /// Leaves the cursor on a fresh line.
    pub(super) fn finish(&mut self) -> io::Result<()> {
        if self.ansi {
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

pub(super) fn format_unit(unit: Option<&UnitView<'_>>, ansi: bool) -> String {
    let Some(unit) = unit else {
        return String::new();
    };

    let mut line = String::new();
    match unit {
        UnitView::Word(word) => line.push_str(word),
        UnitView::Bionic(bionic) => {
            push_emphasized(&mut line, bionic.bold, ansi);
            line.push_str(bionic.normal);
        }
        UnitView::Chunk(words) => line.push_str(&words.join(" ")),
        UnitView::Guided { window, focus } => {
            for (index, word) in window.iter().enumerate() {
                if index > 0 {
                    line.push(' ');
                }
                if index == *focus {
                    push_focus(&mut line, word, ansi);
                } else {
                    line.push_str(word);
                }
            }
        }
        UnitView::DualColumn {
            left,
            right,
            active,
        } => {
            let right = right.unwrap_or("");
            let (left_cell, right_cell) = match active {
                Column::Left => (focus_cell(left, ansi), plain_cell(right)),
                Column::Right => (plain_cell(left), focus_cell(right, ansi)),
            };
            let _ = write!(line, "{left_cell} | {right_cell}");
        }
    }
    line
}

pub(super) fn status_line(screen: &ReadingScreen<'_>) -> StatusLine {
    let mut line = StatusLine::new();
    let _ = write!(
        line,
        "[{} {}wpm] {}/{} {:.1}%",
        screen.mode.label(),
        screen.wpm,
        screen.index,
        screen.total,
        screen.progress
    );

    let _ = match screen.playback {
        PlaybackState::Idle => write!(line, " ready (s to start)"),
        PlaybackState::Playing => Ok(()),
        PlaybackState::Paused => write!(line, " paused {}s", screen.paused_elapsed_ms / 1_000),
        PlaybackState::Complete => write!(line, " done"),
    };
    line
}

fn push_emphasized(line: &mut String, text: &str, ansi: bool) {
    if ansi {
        line.push_str(ANSI_BOLD);
        line.push_str(text);
        line.push_str(ANSI_RESET);
    } else {
        line.push('*');
        line.push_str(text);
        line.push('*');
    }
}

fn push_focus(line: &mut String, word: &str, ansi: bool) {
    line.push('[');
    if ansi {
        push_emphasized(line, word, true);
    } else {
        line.push_str(word);
    }
    line.push(']');
}

fn plain_cell(word: &str) -> String {
    format!("{:^width$}", word, width = DUAL_COLUMN_WIDTH)
}

fn focus_cell(word: &str, ansi: bool) -> String {
    let padded = format!("{:^width$}", format!("[{word}]"), width = DUAL_COLUMN_WIDTH);
    if ansi {
        format!("{ANSI_BOLD}{padded}{ANSI_RESET}")
    } else {
        padded
    }
}

#[cfg(test)]
mod tests {
    use flashread_core::{
        ReadingMode,
        render::{ChunkWords, GuidedWindow},
        tokenizer::bionic_split,
    };

    use super::*;

    fn screen(unit: Option<UnitView<'_>>, playback: PlaybackState) -> ReadingScreen<'_> {
        ReadingScreen {
            mode: ReadingMode::Rsvp,
            wpm: 300,
            playback,
            index: 3,
            total: 12,
            progress: 25.0,
            paused_elapsed_ms: 4_200,
            unit,
        }
    }

    #[test]
    fn bionic_prefix_is_emphasized() {
        let unit = UnitView::Bionic(bionic_split("hello", 40));
        assert_eq!(format_unit(Some(&unit), false), "*he*llo");
        assert_eq!(format_unit(Some(&unit), true), "\x1b[1mhe\x1b[0mllo");
    }

    #[test]
    fn chunk_words_are_space_joined() {
        let mut words = ChunkWords::new();
        let _ = words.push("five");
        let _ = words.push("six");
        assert_eq!(format_unit(Some(&UnitView::Chunk(words)), false), "five six");
    }

    #[test]
    fn guided_focus_is_bracketed() {
        let mut window = GuidedWindow::new();
        for word in ["a", "b", "c"] {
            let _ = window.push(word);
        }
        let unit = UnitView::Guided { window, focus: 1 };
        assert_eq!(format_unit(Some(&unit), false), "a [b] c");
    }

    #[test]
    fn dual_column_marks_active_side() {
        let unit = UnitView::DualColumn {
            left: "left",
            right: None,
            active: Column::Left,
        };
        let line = format_unit(Some(&unit), false);
        assert!(line.contains("[left]"));
        assert!(line.contains(" | "));
    }

    #[test]
    fn status_line_reports_pause() {
        let paused = status_line(&screen(None, PlaybackState::Paused));
        assert_eq!(paused.as_str(), "[rsvp 300wpm] 3/12 25.0% paused 4s");

        let playing = status_line(&screen(None, PlaybackState::Playing));
        assert_eq!(playing.as_str(), "[rsvp 300wpm] 3/12 25.0%");
    }

    #[test]
    fn plain_frames_are_one_line_each() {
        let mut renderer = TerminalRenderer::new(Vec::new(), false);
        let frame = screen(Some(UnitView::Word("three")), PlaybackState::Playing);
        renderer.render(&frame).expect("render");
        renderer.render(&frame).expect("render");
        assert_eq!(renderer.frames(), 2);

        let output = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert_eq!(output.lines().count(), 2);
        assert!(output.starts_with("three"));
    }
}
