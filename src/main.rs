// Allow unused code for designed-but-not-yet-used APIs
// Remove these as the codebase matures
#![allow(dead_code)]

mod color;
mod config;
mod display;
mod engine;
mod mapping;
mod util;
mod view;

use color::Palette;
use config::Config;
use display::{Display, InputEvent, MouseButtonKind, PixelBuffer, RenderTarget};
use engine::{FractalEngine, MandelbrotEngine};
use sdl2::keyboard::Keycode;
use util::FrameLimiter;
use view::{ViewState, ZoomController};

const TARGET_FPS: u32 = 60;
const DEFAULT_CONFIG_PATH: &str = "viewer.json";

/// Paint the engine's field into the frame buffer, one pixel at a time.
/// Grid dimensions are validated against the buffer every frame; a mismatch
/// would silently corrupt the output, so it is fatal instead.
fn paint(
    buffer: &mut PixelBuffer,
    engine: &dyn FractalEngine,
    palette: &Palette,
    budget: u32,
) -> Result<(), String> {
    let width = buffer.width();
    let height = buffer.height();
    if engine.width() != width || engine.height() != height {
        return Err(format!(
            "field grid is {}x{} but the frame buffer is {}x{}",
            engine.width(),
            engine.height(),
            width,
            height
        ));
    }
    let counts = engine.counts();
    let hues = engine.hues();
    if counts.len() != (width * height) as usize || hues.len() != counts.len() {
        return Err(format!("field grids are misallocated for {}x{}", width, height));
    }

    let mut idx = 0;
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let (r, g, b) = palette.shade(counts[idx], hues[idx], budget);
            buffer.set_pixel(x, y, r, g, b);
            idx += 1;
        }
    }
    Ok(())
}

/// Parse command line arguments and return (width, height, config path) overrides
fn parse_args() -> (Option<u32>, Option<u32>, String) {
    let args: Vec<String> = std::env::args().collect();
    let mut width = None;
    let mut height = None;
    let mut config_path = DEFAULT_CONFIG_PATH.to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        width = Some(w);
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        height = Some(h);
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 1000x1000)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                            width = Some(w);
                            height = Some(h);
                        }
                    }
                    i += 1;
                }
            },
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = args[i + 1].clone();
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: mandelzoom [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --width W, -w W           Override window width");
                println!("  --height H, -h H          Override window height");
                println!("  --resolution WxH, -r WxH  Override resolution (e.g., 1000x1000)");
                println!(
                    "  --config PATH, -c PATH    Config file (default: {})",
                    DEFAULT_CONFIG_PATH
                );
                println!("  --help                    Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    (width, height, config_path)
}

fn main() -> Result<(), String> {
    let (width_override, height_override, config_path) = parse_args();

    println!("Starting");

    // Load config or fall back to defaults
    let mut config = Config::load(&config_path).unwrap_or_else(|_| Config::default());
    if let Some(w) = width_override {
        config.width = w;
    }
    if let Some(h) = height_override {
        config.height = h;
    }
    config.validate()?;

    println!("=== {} ===", config.title);
    println!("Resolution: {}x{}", config.width, config.height);
    println!("Controls:");
    println!("  Left click - Re-center and zoom in {}x", config.zoom_factor);
    println!("  Escape     - Quit");

    println!("Creating window");
    let (mut display, texture_creator) = Display::new(&config.title, config.width, config.height)?;
    let mut target = RenderTarget::with_size(&texture_creator, config.width, config.height)?;
    let mut buffer = PixelBuffer::with_size(config.width, config.height);

    let mut engine =
        MandelbrotEngine::new(config.width, config.height, (config.center_re, config.center_im))?;
    engine.set_max_iterations(config.iterations);
    println!("Generating initial view...");
    engine.generate();
    println!("Done!");

    let mut controller = ZoomController::new(
        ViewState {
            center: (config.center_re, config.center_im),
            zoom: 1.0,
            iterations: config.iterations,
        },
        config.zoom_factor,
        config.iteration_step,
    )?;
    let mut limiter = FrameLimiter::new(TARGET_FPS);

    let mut running = true;
    while running {
        limiter.begin();

        // Drain all pending input this tick
        for event in display.poll_events() {
            match event {
                InputEvent::Quit => running = false,
                InputEvent::KeyDown(Keycode::Escape) => running = false,
                InputEvent::KeyDown(_) => {},
                InputEvent::MouseDown {
                    x,
                    y,
                    button: MouseButtonKind::Left,
                } => {
                    controller.press(x, y);
                },
                InputEvent::MouseDown { .. } => {},
            }
        }

        // Quit ends the tick before any further regeneration or rendering
        if !running {
            break;
        }

        // A pending click regenerates synchronously before this frame renders
        if controller.has_pending() {
            println!("Regenerating...");
        }
        if let Some(report) = controller.tick(&mut engine)? {
            println!("Done! {}", report.describe());
        }

        paint(&mut buffer, &engine, &config.palette, controller.view().iterations)?;
        display.present(&mut target, &buffer)?;

        limiter.wait();
    }

    println!("Quit");
    Ok(())
}
