use crate::config::{FOOD_POINTS, GRID_SIZE, Settings};
use crate::effects::Particles;
use crate::pos::{Pos, Velocity};
use crate::powerup::{PowerUp, PowerUpKind};
use crate::spawn;
use rand::Rng;
use std::collections::VecDeque;
use tracing::debug;

/// The subset of settings that drives the per-frame update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rules {
    pub particles: bool,
    pub particle_count: usize,
    pub power_ups: bool,
    pub power_up_chance: f64,
    pub power_up_lifetime: u32,
    pub power_up_duration: u32,
    pub dynamic_speed: bool,
    pub fps: u32,
    pub base_fps: u32,
    pub max_fps: u32,
}

impl From<&Settings> for Rules {
    fn from(s: &Settings) -> Self {
        Self {
            particles: s.particles,
            particle_count: s.particle_count,
            power_ups: s.power_ups,
            power_up_chance: s.power_up_chance,
            power_up_lifetime: s.power_up_lifetime,
            power_up_duration: s.power_up_duration,
            dynamic_speed: s.dynamic_speed,
            fps: s.fps,
            base_fps: s.base_fps,
            max_fps: s.max_fps,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cause {
    Wall,
    SelfCollision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Moved { ate: bool, power_up: Option<PowerUpKind> },
    Died(Cause),
}

pub struct Game {
    pub rules: Rules,
    /// Body cells, tail at the front and head at the back.
    pub snake: VecDeque<Pos>,
    pub target_len: usize,
    pub velocity: Velocity,
    pub food: Pos,
    pub power_up: Option<PowerUp>,
    pub particles: Particles,
    pub score: u32,
    /// Frames stepped since the session began.
    pub frame: u64,
}

impl Game {
    pub fn new<R: Rng + ?Sized>(rules: Rules, rng: &mut R) -> Self {
        let mut snake = VecDeque::new();
        snake.push_back(Pos::center());
        Self {
            rules,
            snake,
            target_len: 1,
            velocity: Velocity::IDLE,
            food: spawn::random_cell(rng),
            power_up: None,
            particles: Particles::default(),
            score: 0,
            frame: 0,
        }
    }

    pub fn head(&self) -> Pos {
        // The body is never empty: it starts with one cell and only the
        // oldest cell is dropped after a new head is pushed.
        self.snake.back().copied().unwrap_or_else(Pos::center)
    }

    pub fn multiplier(&self) -> u32 {
        match self.power_up.and_then(|p| p.effect()) {
            Some(PowerUpKind::Multiplier) => 2,
            _ => 1,
        }
    }

    pub fn boosted(&self) -> bool {
        self.power_up.and_then(|p| p.effect()) == Some(PowerUpKind::Boost)
    }

    /// Frames per second for the current score and boost state.
    pub fn frame_rate(&self) -> u32 {
        if self.boosted() {
            return self.rules.max_fps;
        }
        if !self.rules.dynamic_speed {
            return self.rules.fps;
        }
        frame_rate(self.rules.base_fps, self.rules.max_fps, self.score, false)
    }

    /// Advances one frame: move, collide, grow, then pick up.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Step {
        self.frame += 1;
        let new_head = self.head().offset(self.velocity);

        if !new_head.in_bounds() {
            return Step::Died(Cause::Wall);
        }

        // The oldest cell leaves this frame unless the snake is still growing,
        // so the head may move into it.
        let vacated = usize::from(self.snake.len() + 1 > self.target_len);
        if self.snake.iter().skip(vacated).any(|&s| s == new_head) {
            return Step::Died(Cause::SelfCollision);
        }

        self.snake.push_back(new_head);
        if self.snake.len() > self.target_len {
            self.snake.pop_front();
        }

        self.power_up = self.power_up.and_then(PowerUp::tick);
        // Decided before food is handled so a power-up spawned by this
        // frame's pickup cannot be eaten in the same frame.
        let power_up_hit = self.power_up.and_then(|p| p.position()) == Some(new_head);

        let ate = new_head == self.food;
        if ate {
            self.eat(rng);
        }

        let mut picked = None;
        if power_up_hit {
            if let Some(p) = self.power_up {
                debug!(kind = ?p.kind(), "power-up picked up");
                picked = Some(p.kind());
                self.power_up = Some(p.activate(self.rules.power_up_duration));
            }
        }

        if self.rules.particles {
            self.particles.update();
        }

        Step::Moved { ate, power_up: picked }
    }

    fn eat<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let eaten = self.food;
        self.target_len += 1;
        self.score += FOOD_POINTS * self.multiplier();
        self.food = spawn::random_cell(rng);

        if self.rules.particles {
            let (px, py) = eaten.to_pixel();
            let half = GRID_SIZE as f32 / 2.0;
            self.particles.burst(px as f32 + half, py as f32 + half, self.rules.particle_count, rng);
        }

        if self.rules.power_ups && self.power_up.is_none() {
            if let Some(kind) = spawn::roll_power_up(rng, self.rules.power_up_chance) {
                let pos = spawn::random_cell(rng);
                debug!(?kind, x = pos.x, y = pos.y, "power-up spawned");
                self.power_up = Some(PowerUp::spawn(kind, pos, self.rules.power_up_lifetime));
            }
        }
    }
}

/// `base + min(score / 20, max - base)`, or `max` outright while boosted.
pub fn frame_rate(base: u32, max: u32, score: u32, boosted: bool) -> u32 {
    if boosted {
        return max;
    }
    base + (score / 20).min(max.saturating_sub(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rules() -> Rules {
        Rules::from(&Settings::neon())
    }

    fn quiet_rules() -> Rules {
        Rules { power_ups: false, particles: false, ..rules() }
    }

    fn game_at(head: Pos, rules: Rules) -> (Game, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut g = Game::new(rules, &mut rng);
        g.snake.clear();
        g.snake.push_back(head);
        g.food = Pos::new(0, 0);
        (g, rng)
    }

    #[test]
    fn starts_idle_in_center() {
        let mut rng = SmallRng::seed_from_u64(0);
        let g = Game::new(rules(), &mut rng);
        assert_eq!(g.head(), Pos::center());
        assert_eq!(g.velocity, Velocity::IDLE);
        assert_eq!(g.target_len, 1);
        assert!(g.food.in_bounds());
    }

    #[test]
    fn idle_frames_are_harmless() {
        let (mut g, mut rng) = game_at(Pos::new(10, 10), quiet_rules());
        for _ in 0..5 {
            assert_eq!(g.step(&mut rng), Step::Moved { ate: false, power_up: None });
        }
        assert_eq!(g.snake.len(), 1);
    }

    #[test]
    fn wall_is_terminal_before_mutation() {
        let (mut g, mut rng) = game_at(Pos::new(0, 5), quiet_rules());
        g.velocity = Velocity::LEFT;
        assert_eq!(g.step(&mut rng), Step::Died(Cause::Wall));
        assert_eq!(g.snake.back(), Some(&Pos::new(0, 5)));

        let (mut g, mut rng) = game_at(Pos::new(39, 29), quiet_rules());
        g.velocity = Velocity::DOWN;
        assert_eq!(g.step(&mut rng), Step::Died(Cause::Wall));
    }

    #[test]
    fn eating_grows_and_scores() {
        let (mut g, mut rng) = game_at(Pos::new(5, 5), quiet_rules());
        g.food = Pos::new(6, 5);
        g.velocity = Velocity::RIGHT;
        assert_eq!(g.step(&mut rng), Step::Moved { ate: true, power_up: None });
        assert_eq!(g.score, 10);
        assert_eq!(g.target_len, 2);
        // Growth shows on the next frame: body was truncated to 1 this frame.
        assert_eq!(g.snake.len(), 1);
        g.food = Pos::new(0, 0);
        g.step(&mut rng);
        assert_eq!(g.snake.len(), 2);
        assert_eq!(g.head(), Pos::new(7, 5));
    }

    #[test]
    fn head_may_enter_vacated_tail_cell() {
        let (mut g, mut rng) = game_at(Pos::new(5, 5), quiet_rules());
        // Tail at (5,6) leaves as the head at (6,6) moves into it.
        g.snake = VecDeque::from(vec![Pos::new(5, 6), Pos::new(5, 5), Pos::new(6, 5), Pos::new(6, 6)]);
        g.target_len = 4;
        g.velocity = Velocity::LEFT;
        assert!(matches!(g.step(&mut rng), Step::Moved { .. }));
        assert_eq!(g.head(), Pos::new(5, 6));
    }

    #[test]
    fn biting_the_body_is_terminal() {
        let (mut g, mut rng) = game_at(Pos::new(5, 5), quiet_rules());
        g.snake = VecDeque::from(vec![
            Pos::new(4, 6), Pos::new(5, 6), Pos::new(5, 5), Pos::new(6, 5), Pos::new(6, 6),
        ]);
        g.target_len = 5;
        g.velocity = Velocity::LEFT;
        assert_eq!(g.step(&mut rng), Step::Died(Cause::SelfCollision));
    }

    #[test]
    fn growing_snake_keeps_tail() {
        let (mut g, mut rng) = game_at(Pos::new(5, 5), quiet_rules());
        g.snake = VecDeque::from(vec![Pos::new(5, 6), Pos::new(5, 5), Pos::new(6, 5), Pos::new(6, 6)]);
        g.target_len = 5;
        g.velocity = Velocity::LEFT;
        assert_eq!(g.step(&mut rng), Step::Died(Cause::SelfCollision));
    }

    #[test]
    fn multiplier_doubles_points() {
        let (mut g, mut rng) = game_at(Pos::new(5, 5), quiet_rules());
        g.power_up = Some(PowerUp::Active { kind: PowerUpKind::Multiplier, remaining: 10 });
        g.food = Pos::new(5, 4);
        g.velocity = Velocity::UP;
        g.step(&mut rng);
        assert_eq!(g.score, 20);
    }

    #[test]
    fn power_up_pickup_starts_effect() {
        let (mut g, mut rng) = game_at(Pos::new(5, 5), quiet_rules());
        g.power_up = Some(PowerUp::spawn(PowerUpKind::Boost, Pos::new(5, 6), 50));
        g.velocity = Velocity::DOWN;
        assert_eq!(g.step(&mut rng), Step::Moved { ate: false, power_up: Some(PowerUpKind::Boost) });
        assert!(g.boosted());
        assert_eq!(g.power_up.and_then(|p| p.position()), None);
        assert_eq!(g.frame_rate(), g.rules.max_fps);
    }

    #[test]
    fn effect_reverts_on_expiry_frame() {
        let (mut g, mut rng) = game_at(Pos::new(5, 5), quiet_rules());
        g.power_up = Some(PowerUp::Active { kind: PowerUpKind::Multiplier, remaining: 2 });
        g.velocity = Velocity::RIGHT;
        g.step(&mut rng);
        assert_eq!(g.multiplier(), 2);
        g.step(&mut rng);
        assert_eq!(g.multiplier(), 1);
        assert!(!g.boosted());
        assert!(g.power_up.is_none());
    }

    #[test]
    fn food_pickup_spawns_particles_and_power_up() {
        let r = Rules { power_up_chance: 1.0, ..rules() };
        let (mut g, mut rng) = game_at(Pos::new(5, 5), r);
        g.food = Pos::new(6, 5);
        g.velocity = Velocity::RIGHT;
        g.step(&mut rng);
        assert_eq!(g.particles.len(), r.particle_count);
        assert!(matches!(g.power_up, Some(PowerUp::OnBoard { .. })));
    }

    #[test]
    fn food_and_power_up_on_one_cell_score_once() {
        let (mut g, mut rng) = game_at(Pos::new(5, 5), quiet_rules());
        g.food = Pos::new(5, 6);
        g.power_up = Some(PowerUp::spawn(PowerUpKind::Multiplier, Pos::new(5, 6), 50));
        g.velocity = Velocity::DOWN;
        assert_eq!(g.step(&mut rng), Step::Moved { ate: true, power_up: Some(PowerUpKind::Multiplier) });
        // The multiplier starts after the food is counted.
        assert_eq!(g.score, 10);
        assert_eq!(g.target_len, 2);
        assert_eq!(g.multiplier(), 2);
    }

    #[test]
    fn power_up_spawned_by_pickup_waits_a_frame() {
        let r = Rules { power_ups: true, power_up_chance: 1.0, ..quiet_rules() };
        let (mut g, mut rng) = game_at(Pos::new(5, 5), r);
        g.food = Pos::new(6, 5);
        g.velocity = Velocity::RIGHT;
        assert_eq!(g.step(&mut rng), Step::Moved { ate: true, power_up: None });
        assert_eq!(g.score, 10);
        match g.power_up {
            Some(PowerUp::OnBoard { ttl, .. }) => assert_eq!(ttl, r.power_up_lifetime),
            other => panic!("expected an on-board power-up, got {other:?}"),
        }
    }

    #[test]
    fn boost_applies_at_fixed_speed() {
        let r = Rules { power_ups: true, ..Rules::from(&Settings::classic()) };
        let (mut g, _) = game_at(Pos::new(5, 5), r);
        g.power_up = Some(PowerUp::Active { kind: PowerUpKind::Boost, remaining: 10 });
        assert_eq!(g.frame_rate(), r.max_fps);
        g.power_up = None;
        assert_eq!(g.frame_rate(), r.fps);
    }

    #[test]
    fn classic_rate_is_fixed() {
        let r = Rules::from(&Settings::classic());
        let (mut g, _) = game_at(Pos::new(5, 5), r);
        g.score = 1_000;
        assert_eq!(g.frame_rate(), 15);
    }

    #[test]
    fn difficulty_curve() {
        assert_eq!(frame_rate(8, 25, 300, false), 23);
        assert_eq!(frame_rate(8, 25, 0, false), 8);
        assert_eq!(frame_rate(8, 25, 10_000, false), 25);
        assert_eq!(frame_rate(8, 25, 0, true), 25);
    }
}
