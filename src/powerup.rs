//! Timed pickups. A power-up either waits on the board until its lifetime
//! runs out, or has been eaten and its effect counts down.

use crate::pos::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Runs the game at the maximum frame rate.
    Boost,
    /// Doubles food points.
    Multiplier,
}

impl PowerUpKind {
    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Boost => "BOOST",
            PowerUpKind::Multiplier => "X2",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUp {
    OnBoard { kind: PowerUpKind, pos: Pos, ttl: u32 },
    Active { kind: PowerUpKind, remaining: u32 },
}

impl PowerUp {
    pub fn spawn(kind: PowerUpKind, pos: Pos, lifetime: u32) -> Self {
        PowerUp::OnBoard { kind, pos, ttl: lifetime.max(1) }
    }

    pub fn kind(&self) -> PowerUpKind {
        match *self {
            PowerUp::OnBoard { kind, .. } | PowerUp::Active { kind, .. } => kind,
        }
    }

    /// Board position while waiting to be eaten.
    pub fn position(&self) -> Option<Pos> {
        match *self {
            PowerUp::OnBoard { pos, .. } => Some(pos),
            PowerUp::Active { .. } => None,
        }
    }

    /// Kind of the running effect, if any.
    pub fn effect(&self) -> Option<PowerUpKind> {
        match *self {
            PowerUp::Active { kind, .. } => Some(kind),
            PowerUp::OnBoard { .. } => None,
        }
    }

    /// Frames left on whichever timer is running.
    pub fn remaining(&self) -> u32 {
        match *self {
            PowerUp::OnBoard { ttl, .. } => ttl,
            PowerUp::Active { remaining, .. } => remaining,
        }
    }

    /// Takes the pickup off the board and starts its effect.
    pub fn activate(self, duration: u32) -> Self {
        PowerUp::Active { kind: self.kind(), remaining: duration.max(1) }
    }

    /// Counts one frame down. Returns `None` once the timer hits zero, which
    /// either despawns the pickup or ends the effect.
    pub fn tick(self) -> Option<Self> {
        match self {
            PowerUp::OnBoard { ttl, .. } if ttl <= 1 => None,
            PowerUp::OnBoard { kind, pos, ttl } => Some(PowerUp::OnBoard { kind, pos, ttl: ttl - 1 }),
            PowerUp::Active { remaining, .. } if remaining <= 1 => None,
            PowerUp::Active { kind, remaining } => Some(PowerUp::Active { kind, remaining: remaining - 1 }),
        }
    }
}
