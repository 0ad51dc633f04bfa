//! Input abstraction layer.

mod mock;

pub use mock::ScriptedInput;

/// Logical reader actions, independent of the physical control that produced them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    Start,
    TogglePause,
    SpeedUp,
    SlowDown,
    Undo,
    Reset,
    NextMode,
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
