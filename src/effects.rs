//! Cosmetic effects: particle bursts and snake color cycling.

use rand::Rng;

use crate::canvas::Color;

const BURST_COLORS: [Color; 3] = [
    Color::rgb(0, 204, 255),
    Color::rgb(0, 255, 128),
    Color::rgb(255, 255, 255),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Pixel position.
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    /// Frames left.
    pub life: u32,
    max_life: u32,
    pub color: Color,
}

impl Particle {
    fn new<R: Rng + ?Sized>(x: f32, y: f32, rng: &mut R) -> Self {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(1.5f32..5.0);
        let life = rng.gen_range(10..=25);
        Self {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            life,
            max_life: life,
            color: BURST_COLORS[rng.gen_range(0..BURST_COLORS.len())],
        }
    }

    /// Color with alpha fading out over the particle's life.
    pub fn faded(&self) -> Color {
        self.color.with_alpha((255 * self.life / self.max_life.max(1)) as u8)
    }
}

#[derive(Debug, Default)]
pub struct Particles {
    items: Vec<Particle>,
}

impl Particles {
    pub fn burst<R: Rng + ?Sized>(&mut self, x: f32, y: f32, count: usize, rng: &mut R) {
        self.items.extend((0..count).map(|_| Particle::new(x, y, rng)));
    }

    /// Moves every particle one frame and drops the expired ones in a
    /// single compaction pass.
    pub fn update(&mut self) {
        for p in &mut self.items {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += 0.15;
            p.life = p.life.saturating_sub(1);
        }
        self.items.retain(|p| p.life > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Snake body color for a frame; cycles through the hue wheel, with the
/// tail trailing the head.
pub fn cycle_color(frame: u64, segment: usize) -> Color {
    let hue = (frame * 6 + segment as u64 * 12) % 360;
    Color::from_hue(hue as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn particles_expire() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut ps = Particles::default();
        ps.burst(100.0, 100.0, 12, &mut rng);
        assert_eq!(ps.len(), 12);
        for _ in 0..25 {
            ps.update();
        }
        assert!(ps.is_empty());
    }

    #[test]
    fn particles_move_away_from_origin() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut ps = Particles::default();
        ps.burst(50.0, 50.0, 4, &mut rng);
        ps.update();
        assert!(ps.iter().all(|p| (p.x, p.y) != (50.0, 50.0)));
    }

    #[test]
    fn fade_tracks_life() {
        let mut rng = SmallRng::seed_from_u64(2);
        let p = Particle::new(0.0, 0.0, &mut rng);
        assert_eq!(p.faded().a, 255);
    }

    #[test]
    fn color_cycles() {
        assert_ne!(cycle_color(0, 0), cycle_color(10, 0));
        assert_eq!(cycle_color(0, 0), cycle_color(60, 0));
    }
}
