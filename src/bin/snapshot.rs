//! Render the demo scene without a window and save it as a binary PPM.
//!
//! ```bash
//! cargo run --bin snapshot -- out.ppm --width 320 --height 240 --steps 30
//! ```

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;

use segcast::{
    Game, RaycastGame, Settings,
    renderer::{Framebuffer, unpack_rgb},
    sim::{FixedStep, HeldKeys},
};

#[derive(Parser, Debug)]
#[command(about = "Headless frame dump")]
struct Args {
    /// Output file (PPM, P6).
    output: PathBuf,

    #[arg(long, default_value_t = 320)]
    width: usize,

    #[arg(long, default_value_t = 240)]
    height: usize,

    /// Fixed updates to walk forward before the frame is taken.
    #[arg(long, default_value_t = 0)]
    steps: u32,

    /// JSON settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    show_map: bool,
}

fn write_ppm(path: &Path, fb: &Framebuffer) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    fb.end_frame(|buf, w, h| -> anyhow::Result<()> {
        write!(out, "P6\n{w} {h}\n255\n")?;
        for &px in buf {
            out.write_all(&unpack_rgb(px))?;
        }
        Ok(())
    })?;
    out.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::default(),
    };
    settings.show_map |= args.show_map;

    let mut game = RaycastGame::new(settings)?;
    game.setup()?;

    let step = FixedStep::new();
    for _ in 0..args.steps {
        game.update(&HeldKeys::MOVE_FORWARD, step.dt());
    }

    let mut fb = Framebuffer::new(args.width.max(1), args.height.max(1));
    game.draw(&mut fb);
    write_ppm(&args.output, &fb)?;

    log::info!("{} -> {}", fb.status(), args.output.display());
    Ok(())
}
