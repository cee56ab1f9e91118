//! Joystick axes as a secondary direction source.

use crate::error::GamepadError;
use crate::input::{Axis, InputEvent};

/// Rounds a raw stick value in `-1.0..=1.0` to -1, 0 or 1.
pub fn round_axis(value: f32) -> i8 {
    value.clamp(-1.0, 1.0).round() as i8
}

/// Emits `AxisMove` events for axes whose rounded value changed.
fn diff(last: &mut (i8, i8), now: (i8, i8)) -> Vec<InputEvent> {
    let mut out = Vec::new();
    if now.0 != last.0 {
        out.push(InputEvent::AxisMove(Axis::X, now.0));
    }
    if now.1 != last.1 {
        out.push(InputEvent::AxisMove(Axis::Y, now.1));
    }
    *last = now;
    out
}

pub struct Gamepads {
    #[cfg(feature = "gamepad")]
    gilrs: gilrs::Gilrs,
    last: (i8, i8),
}

impl Gamepads {
    #[cfg(feature = "gamepad")]
    pub fn open() -> Result<Self, GamepadError> {
        let gilrs = gilrs::Gilrs::new().map_err(|e| GamepadError::Backend(e.to_string()))?;
        let count = gilrs.gamepads().count();
        tracing::info!(count, "gamepad backend ready");
        Ok(Self { gilrs, last: (0, 0) })
    }

    #[cfg(not(feature = "gamepad"))]
    pub fn open() -> Result<Self, GamepadError> {
        Err(GamepadError::Unsupported)
    }

    /// Drains backend events and reports axis changes on the first pad.
    #[cfg(feature = "gamepad")]
    pub fn poll(&mut self) -> Vec<InputEvent> {
        while self.gilrs.next_event().is_some() {}
        let now = match self.gilrs.gamepads().next() {
            // gilrs reports up as positive; the board's y grows downwards.
            Some((_, pad)) => (
                round_axis(pad.value(gilrs::Axis::LeftStickX)),
                -round_axis(pad.value(gilrs::Axis::LeftStickY)),
            ),
            None => (0, 0),
        };
        diff(&mut self.last, now)
    }

    #[cfg(not(feature = "gamepad"))]
    pub fn poll(&mut self) -> Vec<InputEvent> {
        diff(&mut self.last, (0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(round_axis(0.2), 0);
        assert_eq!(round_axis(-0.49), 0);
        assert_eq!(round_axis(0.7), 1);
        assert_eq!(round_axis(-0.9), -1);
        assert_eq!(round_axis(3.0), 1);
    }

    #[test]
    fn only_changes_are_reported() {
        let mut last = (0, 0);
        assert_eq!(diff(&mut last, (1, 0)), vec![InputEvent::AxisMove(Axis::X, 1)]);
        assert!(diff(&mut last, (1, 0)).is_empty());
        assert_eq!(
            diff(&mut last, (0, -1)),
            vec![InputEvent::AxisMove(Axis::X, 0), InputEvent::AxisMove(Axis::Y, -1)]
        );
    }
}
