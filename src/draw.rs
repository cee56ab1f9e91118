use crate::canvas::{Align, Canvas, Color, Rect};
use crate::config::{GRID_SIZE, HEIGHT, WIDTH};
use crate::effects::cycle_color;
use crate::game::Game;
use crate::pos::Pos;
use crate::powerup::PowerUpKind;

pub const BLACK: Color = Color::rgb(10, 10, 10);
pub const GRID_LINE: Color = Color::rgb(20, 20, 20);
pub const NEON_GREEN: Color = Color::rgb(0, 255, 128);
pub const NEON_BLUE: Color = Color::rgb(0, 204, 255);
pub const RED: Color = Color::rgb(255, 50, 50);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const YELLOW: Color = Color::rgb(255, 220, 0);
pub const MAGENTA: Color = Color::rgb(255, 0, 200);
const DIM: Color = Color::rgb(150, 150, 150);

const CORNER_RADIUS: u32 = 5;

/// Options that change how a playing frame looks but not how it plays.
#[derive(Clone, Copy, Debug, Default)]
pub struct Look {
    pub color_cycle: bool,
    pub show_speed: bool,
    pub paused: bool,
    pub autoplay: bool,
}

/// Draws one playing frame: grid, snake, food, power-up, particles, HUD.
pub fn render_playing(canvas: &mut impl Canvas, game: &Game, look: Look) {
    canvas.clear(BLACK);
    draw_grid(canvas);

    let len = game.snake.len();
    for (i, &cell) in game.snake.iter().enumerate() {
        // Segment index counted from the head.
        let from_head = len - 1 - i;
        let color = if look.color_cycle { cycle_color(game.frame, from_head) } else { NEON_GREEN };
        draw_segment(canvas, cell, color);
    }

    canvas.fill_rounded_rect(cell_rect(game.food), CORNER_RADIUS, NEON_BLUE);

    if let Some(pos) = game.power_up.and_then(|p| p.position()) {
        let color = game.power_up.map(|p| power_up_color(p.kind())).unwrap_or(WHITE);
        let r = cell_rect(pos);
        canvas.fill_rounded_rect(r, GRID_SIZE / 2, color);
        canvas.fill_rect(Rect::new(r.x + 7, r.y + 7, 6, 6), WHITE);
    }

    for p in game.particles.iter() {
        canvas.fill_rect(Rect::new(p.x as i32 - 2, p.y as i32 - 2, 4, 4), p.faded());
    }

    draw_hud(canvas, game, look);
}

/// Game-over screen with the final score and the saved high scores.
pub fn render_game_over(canvas: &mut impl Canvas, score: u32, high_scores: &[u32]) {
    let (cx, cy) = ((WIDTH / 2) as i32, (HEIGHT / 2) as i32);
    canvas.clear(BLACK);
    canvas.text("Game Over", cx, cy - 40, RED, Align::Center);
    canvas.text(&format!("Your Score: {score}"), cx, cy, WHITE, Align::Center);
    canvas.text("Press R to Restart or Q to Quit", cx, cy + 50, NEON_BLUE, Align::Center);

    if !high_scores.is_empty() {
        canvas.text("High Scores", cx, cy + 110, NEON_GREEN, Align::Center);
        for (i, s) in high_scores.iter().enumerate() {
            canvas.text(&format!("{}. {s}", i + 1), cx, cy + 140 + 26 * i as i32, WHITE, Align::Center);
        }
    }
}

fn draw_grid(canvas: &mut impl Canvas) {
    for x in (0..WIDTH).step_by(GRID_SIZE as usize) {
        canvas.line((x as i32, 0), (x as i32, HEIGHT as i32), GRID_LINE);
    }
    for y in (0..HEIGHT).step_by(GRID_SIZE as usize) {
        canvas.line((0, y as i32), (WIDTH as i32, y as i32), GRID_LINE);
    }
}

fn draw_segment(canvas: &mut impl Canvas, cell: Pos, color: Color) {
    let r = cell_rect(cell);
    canvas.fill_rounded_rect(r, CORNER_RADIUS, color);
    canvas.fill_rect(Rect::new(r.x + 4, r.y + 4, 4, 4), WHITE);
}

fn draw_hud(canvas: &mut impl Canvas, game: &Game, look: Look) {
    canvas.text(&format!("Score: {}", game.score), 10, 10, NEON_BLUE, Align::TopLeft);

    let mut y = 40;
    if let Some(kind) = game.power_up.and_then(|p| p.effect()) {
        let left = game.power_up.map(|p| p.remaining()).unwrap_or(0);
        canvas.text(&format!("{} {left}", kind.label()), 10, y, power_up_color(kind), Align::TopLeft);
        y += 30;
    }
    if look.show_speed {
        canvas.text(&format!("Speed: {}", game.frame_rate()), 10, y, DIM, Align::TopLeft);
    }
    if look.autoplay {
        canvas.text("Auto", (WIDTH - 90) as i32, 10, YELLOW, Align::TopLeft);
    }
    if look.paused {
        canvas.text("Paused", (WIDTH / 2) as i32, (HEIGHT / 2) as i32, WHITE, Align::Center);
    }
}

fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Boost => YELLOW,
        PowerUpKind::Multiplier => MAGENTA,
    }
}

fn cell_rect(cell: Pos) -> Rect {
    let (x, y) = cell.to_pixel();
    Rect::new(x, y, GRID_SIZE, GRID_SIZE)
}
