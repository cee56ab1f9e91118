use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use pixels::{Pixels, SurfaceTexture};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use neon_snake::audio::Music;
use neon_snake::canvas::FrameCanvas;
use neon_snake::config::{HEIGHT, Settings, Variant, WIDTH};
use neon_snake::gamepad::Gamepads;
use neon_snake::input::{HeldKeys, InputEvent, Key};
use neon_snake::session::Session;

/// Grid snake with auto-play, power-ups and particles.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON settings file
    #[arg(long, default_value = "snake.json")]
    config: PathBuf,
    /// Play the plain fixed-speed variant
    #[arg(long)]
    classic: bool,
    /// Let the greedy auto-player steer
    #[arg(long)]
    autoplay: bool,
    /// Seed for reproducible food placement
    #[arg(long)]
    seed: Option<u64>,
    /// High-score file
    #[arg(long = "high-scores")]
    high_scores: Option<PathBuf>,
    /// Start the background music
    #[arg(long)]
    music: bool,
}

impl Args {
    fn apply(&self, mut s: Settings) -> Settings {
        if self.classic && s.variant != Variant::Classic {
            s = Settings { autoplay: s.autoplay, seed: s.seed, high_score_path: s.high_score_path, ..Settings::classic() };
        }
        s.autoplay |= self.autoplay;
        s.play_music |= self.music;
        if self.seed.is_some() {
            s.seed = self.seed;
        }
        if let Some(path) = &self.high_scores {
            s.high_score_path = path.clone();
        }
        s
    }
}

const KEYMAP: &[(VirtualKeyCode, Key)] = &[
    (VirtualKeyCode::Left, Key::Left),
    (VirtualKeyCode::A, Key::Left),
    (VirtualKeyCode::Right, Key::Right),
    (VirtualKeyCode::D, Key::Right),
    (VirtualKeyCode::Up, Key::Up),
    (VirtualKeyCode::W, Key::Up),
    (VirtualKeyCode::Down, Key::Down),
    (VirtualKeyCode::S, Key::Down),
    (VirtualKeyCode::R, Key::Restart),
    (VirtualKeyCode::Q, Key::Quit),
    (VirtualKeyCode::Escape, Key::Quit),
    (VirtualKeyCode::P, Key::Pause),
];

fn held_keys(input: &WinitInputHelper) -> HeldKeys {
    let held = |a, b| input.key_held(a) || input.key_held(b);
    HeldKeys {
        left: held(VirtualKeyCode::Left, VirtualKeyCode::A),
        right: held(VirtualKeyCode::Right, VirtualKeyCode::D),
        up: held(VirtualKeyCode::Up, VirtualKeyCode::W),
        down: held(VirtualKeyCode::Down, VirtualKeyCode::S),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "neon_snake=info".into()))
        .init();

    let args = Args::parse();
    let settings = Settings::load(&args.config)
        .with_context(|| format!("loading settings from {}", args.config.display()))?;
    let settings = args.apply(settings);
    settings.validate()?;
    info!(variant = ?settings.variant, autoplay = settings.autoplay, "starting");

    let music = match Music::load(&settings.music_path, settings.music_volume) {
        Ok(m) => {
            if settings.play_music {
                m.play();
            }
            Some(m)
        }
        Err(e) => {
            warn!("continuing without music: {e}");
            None
        }
    };

    let mut gamepads = match Gamepads::open() {
        Ok(g) => Some(g),
        Err(e) => {
            info!("joystick input disabled: {e}");
            None
        }
    };

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    let window = WindowBuilder::new()
        .with_title("Neon Snake")
        .with_inner_size(LogicalSize::new(WIDTH, HEIGHT))
        .with_resizable(false)
        .build(&event_loop)
        .context("creating window")?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(WIDTH, HEIGHT, surface_texture).context("creating pixel surface")?
    };

    let mut session = Session::new(settings);
    let mut last_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        // Keeps the output stream alive for as long as the loop runs.
        let _music = &music;

        if let Event::RedrawRequested(_) = event {
            let mut canvas = FrameCanvas::new(pixels.frame_mut(), WIDTH, HEIGHT);
            session.render(&mut canvas);
            if let Err(err) = pixels.render() {
                error!("render failed: {err}");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            let was_playing = session.is_playing();

            if input.close_requested() || input.destroyed() {
                session.handle_event(InputEvent::Quit);
            }
            for &(code, key) in KEYMAP {
                if input.key_pressed(code) {
                    session.handle_event(InputEvent::KeyPress(key));
                }
            }
            session.set_held(held_keys(&input));
            if let Some(pads) = gamepads.as_mut() {
                for ev in pads.poll() {
                    session.handle_event(ev);
                }
            }

            if session.is_terminated() {
                *control_flow = ControlFlow::Exit;
                return;
            }

            let mut redraw = was_playing != session.is_playing();
            if session.is_playing() && last_frame.elapsed() >= session.frame_interval() {
                redraw |= session.frame();
                last_frame = Instant::now();
            }
            if input.key_pressed(VirtualKeyCode::P) {
                redraw = true;
            }
            if redraw {
                window.request_redraw();
            }

            *control_flow = if session.is_playing() && !session.is_paused() {
                ControlFlow::WaitUntil(last_frame + session.frame_interval())
            } else {
                // Game over and pause block on the next input event.
                ControlFlow::Wait
            };
        }
    });
}
