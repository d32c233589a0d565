//! Windowed raycaster demo.
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- --downscale 2 --show-map
//! ```
//!
//! Arrows turn and walk, PageUp/E widen the view, PageDown/Q narrow it.

use std::{path::PathBuf, time::Instant};

use anyhow::Context;
use clap::Parser;
use minifb::{Key, ScaleMode, Window, WindowOptions};

use segcast::{
    Game, RaycastGame, Settings,
    renderer::Framebuffer,
    sim::{FixedStep, HeldKeys},
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Window width in pixels.
    #[arg(long, default_value_t = 640)]
    width: usize,

    /// Window height in pixels.
    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Render at 1/N of the window resolution (1..=6).
    #[arg(long, default_value_t = 2)]
    downscale: usize,

    /// JSON settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overlay the top-down map.
    #[arg(long)]
    show_map: bool,
}

/// Keyboard state → logical keys.
fn held_keys(win: &Window) -> HeldKeys {
    const BINDINGS: [(Key, HeldKeys); 8] = [
        (Key::Left, HeldKeys::TURN_LEFT),
        (Key::Right, HeldKeys::TURN_RIGHT),
        (Key::Up, HeldKeys::MOVE_FORWARD),
        (Key::Down, HeldKeys::MOVE_BACKWARD),
        (Key::PageUp, HeldKeys::WIDEN_FOV),
        (Key::E, HeldKeys::WIDEN_FOV),
        (Key::PageDown, HeldKeys::NARROW_FOV),
        (Key::Q, HeldKeys::NARROW_FOV),
    ];

    BINDINGS
        .iter()
        .filter(|(key, _)| win.is_key_down(*key))
        .fold(HeldKeys::empty(), |acc, (_, bit)| acc | *bit)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    // ─────────── settings ────────────
    let mut settings = match &args.config {
        Some(path) => Settings::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::default(),
    };
    settings.show_map |= args.show_map;

    let downscale = args.downscale.clamp(1, 6);
    let (w, h) = ((args.width / downscale).max(1), (args.height / downscale).max(1));
    log::info!("window {}x{}, rendering {w}x{h}", args.width, args.height);

    // ─────────── game ────────────
    let mut game = RaycastGame::new(settings)?;
    game.setup()?;

    let mut fb = Framebuffer::new(w, h);
    let mut win = Window::new(
        "segcast",
        args.width,
        args.height,
        WindowOptions {
            resize: true,
            scale_mode: ScaleMode::Stretch,
            ..WindowOptions::default()
        },
    )?;

    let mut step = FixedStep::new();
    let mut last = Instant::now();
    let mut first = true;

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let now = Instant::now();
        let updates = step.advance(now - last);
        last = now;

        let keys = held_keys(&win);
        for _ in 0..updates {
            game.update(&keys, step.dt());
        }

        if updates > 0 || first {
            first = false;
            game.draw(&mut fb);
            win.set_title(fb.status());
            fb.end_frame(|buf, w, h| win.update_with_buffer(buf, w, h))?;
        } else {
            // keep the event queue moving between fixed steps
            win.update();
        }
    }
    Ok(())
}
