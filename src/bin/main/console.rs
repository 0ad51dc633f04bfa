use core::convert::Infallible;
use std::{
    io::{self, BufRead},
    thread,
};

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use flashread_core::input::{InputEvent, InputProvider};
use log::{debug, warn};

pub(super) const INPUT_QUEUE_DEPTH: usize = 16;

pub(super) type CommandChannel = Channel<CriticalSectionRawMutex, ConsoleCommand, INPUT_QUEUE_DEPTH>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum ConsoleCommand {
    Input(InputEvent),
    Quit,
}

pub(super) fn map_key(key: char) -> Option<ConsoleCommand> {
    let event = match key.to_ascii_lowercase() {
        ' ' | 'p' => InputEvent::TogglePause,
        '+' | '=' => InputEvent::SpeedUp,
        '-' | '_' => InputEvent::SlowDown,
        'u' => InputEvent::Undo,
        'r' => InputEvent::Reset,
        'm' => InputEvent::NextMode,
        's' => InputEvent::Start,
        'q' => return Some(ConsoleCommand::Quit),
        _ => return None,
    };
    Some(ConsoleCommand::Input(event))
}

/// Commands typed on one terminal line. A bare Enter toggles pause.
pub(super) fn parse_line(line: &str) -> impl Iterator<Item = ConsoleCommand> + '_ {
    let bare_enter = line.is_empty().then_some(ConsoleCommand::Input(InputEvent::TogglePause));
    bare_enter
        .into_iter()
        .chain(line.chars().filter_map(map_key))
}

/// Forwards stdin commands into `channel` from a plain thread.
///
/// The terminal stays in line mode, so keys arrive when Enter is pressed.
pub(super) fn spawn_stdin_reader(channel: &'static CommandChannel) -> io::Result<()> {
    thread::Builder::new()
        .name("stdin-input".into())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        warn!("input: stdin read failed err={:?}", err);
                        break;
                    }
                };

                for command in parse_line(line.trim_end_matches('\r')) {
                    if channel.try_send(command).is_err() {
                        warn!("input: queue full, dropped {:?}", command);
                    }
                }
            }
            debug!("input: stdin closed");
        })?;
    Ok(())
}

/// [`InputProvider`] over the console command channel.
///
/// The event loop may already have taken a command off the channel while
/// waiting; it hands that one back through [`stash`](Self::stash).
pub(super) struct ChannelInput<'a> {
    channel: &'a CommandChannel,
    stashed: Option<ConsoleCommand>,
    quit_requested: bool,
}

impl<'a> ChannelInput<'a> {
    pub(super) const fn new(channel: &'a CommandChannel) -> Self {
        Self {
            channel,
            stashed: None,
            quit_requested: false,
        }
    }

    pub(super) fn stash(&mut self, command: ConsoleCommand) {
        self.stashed = Some(command);
    }

    pub(super) const fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn next_command(&mut self) -> Option<ConsoleCommand> {
        self.stashed
            .take()
            .or_else(|| self.channel.try_receive().ok())
    }
}

impl InputProvider for ChannelInput<'_> {
    type Error = Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        while let Some(command) = self.next_command() {
            match command {
                ConsoleCommand::Input(event) => return Ok(Some(event)),
                ConsoleCommand::Quit => self.quit_requested = true,
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_reader_actions() {
        assert_eq!(
            map_key(' '),
            Some(ConsoleCommand::Input(InputEvent::TogglePause))
        );
        assert_eq!(map_key('+'), Some(ConsoleCommand::Input(InputEvent::SpeedUp)));
        assert_eq!(map_key('-'), Some(ConsoleCommand::Input(InputEvent::SlowDown)));
        assert_eq!(map_key('U'), Some(ConsoleCommand::Input(InputEvent::Undo)));
        assert_eq!(map_key('m'), Some(ConsoleCommand::Input(InputEvent::NextMode)));
        assert_eq!(map_key('q'), Some(ConsoleCommand::Quit));
        assert_eq!(map_key('x'), None);
    }

    #[test]
    fn line_may_carry_several_commands() {
        let commands: Vec<_> = parse_line("++x-").collect();
        assert_eq!(
            commands,
            [
                ConsoleCommand::Input(InputEvent::SpeedUp),
                ConsoleCommand::Input(InputEvent::SpeedUp),
                ConsoleCommand::Input(InputEvent::SlowDown),
            ]
        );

        let commands: Vec<_> = parse_line("").collect();
        assert_eq!(commands, [ConsoleCommand::Input(InputEvent::TogglePause)]);
    }

    #[test]
    fn stashed_command_comes_first() {
        let channel = CommandChannel::new();
        let _ = channel.try_send(ConsoleCommand::Input(InputEvent::Undo));

        let mut input = ChannelInput::new(&channel);
        input.stash(ConsoleCommand::Input(InputEvent::Reset));

        assert_eq!(input.poll_event(), Ok(Some(InputEvent::Reset)));
        assert_eq!(input.poll_event(), Ok(Some(InputEvent::Undo)));
        assert_eq!(input.poll_event(), Ok(None));
    }

    #[test]
    fn quit_is_flagged_not_forwarded() {
        let channel = CommandChannel::new();
        let _ = channel.try_send(ConsoleCommand::Quit);
        let _ = channel.try_send(ConsoleCommand::Input(InputEvent::SpeedUp));

        let mut input = ChannelInput::new(&channel);
        assert!(!input.quit_requested());
        assert_eq!(input.poll_event(), Ok(Some(InputEvent::SpeedUp)));
        assert!(input.quit_requested());
    }
}
