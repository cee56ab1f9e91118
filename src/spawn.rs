//! Random placement of food and power-ups.
//!
//! Cells are drawn uniformly over the whole board. Occupied snake cells are
//! not excluded, so food can occasionally appear under the body.

use rand::Rng;

use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::pos::Pos;
use crate::powerup::PowerUpKind;

pub fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Pos {
    Pos::new(rng.gen_range(0..GRID_WIDTH as i32), rng.gen_range(0..GRID_HEIGHT as i32))
}

/// Rolls for a power-up after a food pickup. The kind is picked uniformly.
pub fn roll_power_up<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> Option<PowerUpKind> {
    if !rng.gen_bool(chance) {
        return None;
    }
    Some(if rng.gen_bool(0.5) { PowerUpKind::Boost } else { PowerUpKind::Multiplier })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn cells_stay_on_board_and_cover_edges() {
        let mut rng = SmallRng::seed_from_u64(7);
        let (mut saw_min_x, mut saw_max_x) = (false, false);
        for _ in 0..20_000 {
            let p = random_cell(&mut rng);
            assert!(p.in_bounds(), "{p:?}");
            saw_min_x |= p.x == 0;
            saw_max_x |= p.x == GRID_WIDTH as i32 - 1;
        }
        assert!(saw_min_x && saw_max_x);
    }

    #[test]
    fn chance_bounds() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!((0..100).all(|_| roll_power_up(&mut rng, 0.0).is_none()));
        assert!((0..100).all(|_| roll_power_up(&mut rng, 1.0).is_some()));
    }

    #[test]
    fn both_kinds_appear() {
        let mut rng = SmallRng::seed_from_u64(3);
        let kinds: Vec<_> = (0..200).filter_map(|_| roll_power_up(&mut rng, 1.0)).collect();
        assert!(kinds.contains(&PowerUpKind::Boost));
        assert!(kinds.contains(&PowerUpKind::Multiplier));
    }

    #[test]
    fn roughly_thirty_percent() {
        let mut rng = SmallRng::seed_from_u64(11);
        let hits = (0..10_000).filter(|_| roll_power_up(&mut rng, 0.3).is_some()).count();
        assert!((2_600..3_400).contains(&hits), "{hits}");
    }
}
