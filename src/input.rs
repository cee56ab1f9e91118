//! Input events and the per-frame direction resolver.
//!
//! Keyboard is consulted first, then the joystick axes. Auto-play replaces
//! both and steers straight at the food.

use crate::pos::{Pos, Velocity};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Restart,
    Quit,
    Pause,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close request.
    Quit,
    KeyPress(Key),
    /// Joystick axis rounded to -1, 0 or 1.
    AxisMove(Axis, i8),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    fn set(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Up => self.up = true,
            Key::Down => self.down = true,
            _ => {}
        }
    }
}

/// What the input devices look like at the start of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub held: HeldKeys,
    /// Directional presses seen since the last frame, so a tap shorter than
    /// one frame still counts.
    pub tapped: HeldKeys,
    pub axis_x: i8,
    pub axis_y: i8,
}

impl InputSnapshot {
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyPress(key) => self.tapped.set(key),
            InputEvent::AxisMove(Axis::X, v) => self.axis_x = v.signum(),
            InputEvent::AxisMove(Axis::Y, v) => self.axis_y = v.signum(),
            InputEvent::Quit => {}
        }
    }

    /// Drops per-frame taps; held keys and axis positions persist.
    pub fn end_frame(&mut self) {
        self.tapped = HeldKeys::default();
    }

    fn left(&self) -> bool {
        self.held.left || self.tapped.left
    }
    fn right(&self) -> bool {
        self.held.right || self.tapped.right
    }
    fn up(&self) -> bool {
        self.held.up || self.tapped.up
    }
    fn down(&self) -> bool {
        self.held.down || self.tapped.down
    }
}

/// Picks the velocity for this frame from keyboard then joystick. An axis
/// change is only accepted while the snake is not already moving on that
/// axis, so a direct reversal is impossible.
pub fn resolve(current: Velocity, input: &InputSnapshot) -> Velocity {
    if let Some(v) = from_keyboard(current, input) {
        return v;
    }
    from_joystick(current, input).unwrap_or(current)
}

fn from_keyboard(current: Velocity, input: &InputSnapshot) -> Option<Velocity> {
    let horizontal_free = !current.moving_horizontally();
    let vertical_free = !current.moving_vertically();
    if input.left() && horizontal_free {
        Some(Velocity::LEFT)
    } else if input.right() && horizontal_free {
        Some(Velocity::RIGHT)
    } else if input.up() && vertical_free {
        Some(Velocity::UP)
    } else if input.down() && vertical_free {
        Some(Velocity::DOWN)
    } else {
        None
    }
}

fn from_joystick(current: Velocity, input: &InputSnapshot) -> Option<Velocity> {
    if input.axis_x != 0 && !current.moving_horizontally() {
        Some(Velocity { dx: input.axis_x, dy: 0 })
    } else if input.axis_y != 0 && !current.moving_vertically() {
        Some(Velocity { dx: 0, dy: input.axis_y })
    } else {
        None
    }
}

/// Greedy auto-play: move along the axis with the larger gap to the food,
/// zeroing the other axis. Horizontal wins only on a strictly larger gap.
/// This ignores the no-reverse rule.
pub fn steer_towards(head: Pos, food: Pos) -> Velocity {
    let gap_x = food.x - head.x;
    let gap_y = food.y - head.y;
    if gap_x.abs() > gap_y.abs() {
        Velocity { dx: gap_x.signum() as i8, dy: 0 }
    } else if gap_y > 0 {
        Velocity::DOWN
    } else {
        Velocity::UP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(keys: &[Key]) -> InputSnapshot {
        let mut s = InputSnapshot::default();
        for &k in keys {
            s.held.set(k);
        }
        s
    }

    #[test]
    fn idle_accepts_any_direction() {
        assert_eq!(resolve(Velocity::IDLE, &holding(&[Key::Up])), Velocity::UP);
        assert_eq!(resolve(Velocity::IDLE, &holding(&[Key::Right])), Velocity::RIGHT);
    }

    #[test]
    fn no_reversal_on_current_axis() {
        assert_eq!(resolve(Velocity::RIGHT, &holding(&[Key::Left])), Velocity::RIGHT);
        assert_eq!(resolve(Velocity::UP, &holding(&[Key::Down])), Velocity::UP);
    }

    #[test]
    fn rejected_key_falls_through_to_next() {
        // Left is blocked while moving right, so Up is taken.
        assert_eq!(resolve(Velocity::RIGHT, &holding(&[Key::Left, Key::Up])), Velocity::UP);
    }

    #[test]
    fn keyboard_precedes_joystick() {
        let mut s = holding(&[Key::Down]);
        s.axis_x = 1;
        assert_eq!(resolve(Velocity::LEFT, &s), Velocity::DOWN);
    }

    #[test]
    fn joystick_used_without_keys() {
        let mut s = InputSnapshot::default();
        s.apply(&InputEvent::AxisMove(Axis::Y, 1));
        assert_eq!(resolve(Velocity::RIGHT, &s), Velocity::DOWN);
        // Axis on the current axis is ignored.
        s.apply(&InputEvent::AxisMove(Axis::Y, -1));
        assert_eq!(resolve(Velocity::DOWN, &s), Velocity::DOWN);
    }

    #[test]
    fn taps_last_one_frame() {
        let mut s = InputSnapshot::default();
        s.apply(&InputEvent::KeyPress(Key::Left));
        assert_eq!(resolve(Velocity::UP, &s), Velocity::LEFT);
        s.end_frame();
        assert_eq!(resolve(Velocity::UP, &s), Velocity::UP);
    }

    #[test]
    fn autoplay_follows_larger_gap() {
        let head = Pos::new(10, 10);
        assert_eq!(steer_towards(head, Pos::new(2, 8)), Velocity::LEFT);
        assert_eq!(steer_towards(head, Pos::new(11, 20)), Velocity::DOWN);
        assert_eq!(steer_towards(head, Pos::new(13, 7)), Velocity::UP);
    }

    #[test]
    fn autoplay_may_reverse() {
        // Moving right with food directly behind: auto-play turns around.
        let v = steer_towards(Pos::new(10, 10), Pos::new(0, 10));
        assert_eq!(v, Velocity::LEFT);
    }
}
