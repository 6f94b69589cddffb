// What you SEE now:
// • A white board. Hold Left Mouse to paint smooth strokes.
// • [ / ] shrink / grow the brush, 1-8 pick a color, B cycles the blur look.
// • U undoes the last stroke, C clears the board, S saves Paint<timestamp>.png.
// • ESC quits.

mod board;
mod config;
mod draw;
mod error;
mod export;
mod path;
mod raster;
mod recorder;
mod render;
mod types;

use board::Board;
use config::PaintConfig;
use draw::{draw_crosshair, draw_text_5x7, Drawer, PointerTracker};
use error::Error;
use minifb::Key;
use render::Surface;
use tracing::info;
use tracing_subscriber::EnvFilter;
use types::{BlurStyle, Color, FrameBuffer};

const MIN_BRUSH_WIDTH: f32 = 1.0;
const MAX_BRUSH_WIDTH: f32 = 100.0;
const BRUSH_STEP: f32 = 2.0;

/// Number keys 1..8, in order.
const PALETTE: [(Key, Color); 8] = [
    (Key::Key1, Color::GRAY),
    (Key::Key2, Color::BLACK),
    (Key::Key3, Color::from_argb(0xFF, 0xE5, 0x39, 0x35)), // red
    (Key::Key4, Color::from_argb(0xFF, 0xFB, 0x8C, 0x00)), // orange
    (Key::Key5, Color::from_argb(0xFF, 0xFD, 0xD8, 0x35)), // yellow
    (Key::Key6, Color::from_argb(0xFF, 0x43, 0xA0, 0x47)), // green
    (Key::Key7, Color::from_argb(0xFF, 0x1E, 0x88, 0xE5)), // blue
    (Key::Key8, Color::from_argb(0xFF, 0x8E, 0x24, 0xAA)), // purple
];

/// None → Normal → Solid → Outer → Inner → None
fn next_blur(current: Option<BlurStyle>) -> Option<BlurStyle> {
    match current {
        None => Some(BlurStyle::Normal),
        Some(BlurStyle::Normal) => Some(BlurStyle::Solid),
        Some(BlurStyle::Solid) => Some(BlurStyle::Outer),
        Some(BlurStyle::Outer) => Some(BlurStyle::Inner),
        Some(BlurStyle::Inner) => None,
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = PaintConfig::from_env()?;
    info!(width = cfg.width, height = cfg.height, output = %cfg.output_dir.display(), timing = ?cfg.timing, "starting paint board");

    /* --- Window + board setup ---
       Visual: an empty board in the background color. */
    let mut drawer = Drawer::new("Paint Board", cfg.width, cfg.height)?;
    let mut board = Board::new(cfg.brush, cfg.timing);
    let mut pointer = PointerTracker::default();

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(cfg.width, cfg.height, cfg.background);
    let hud_color = if cfg.background.rgb() > 0x00_80_80_80 { 0x00_20_20_20 } else { 0x00_F0_F0_F0 };
    let mut last_save = String::new();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Pointer → gesture events. */
        if let Some(event) = pointer.update(drawer.left_mouse_down(), drawer.mouse_pos()) {
            board.handle(event);
        }

        /* 2) Brush + history keys */
        if drawer.pressed_once(Key::LeftBracket) {
            board.set_brush_width((board.brush().width - BRUSH_STEP).max(MIN_BRUSH_WIDTH));
        }
        if drawer.pressed_once(Key::RightBracket) {
            board.set_brush_width((board.brush().width + BRUSH_STEP).min(MAX_BRUSH_WIDTH));
        }
        for (key, color) in PALETTE {
            if drawer.pressed_once(key) {
                board.set_brush_color(color);
            }
        }
        if drawer.pressed_once(Key::B) {
            let next = next_blur(board.brush().blur.map(|b| b.style));
            board.set_brush_blur(next);
        }
        if drawer.pressed_once(Key::U) {
            board.undo();
        }
        if drawer.pressed_once(Key::C) {
            board.clear();
            last_save.clear();
        }
        if drawer.pressed_once(Key::S) {
            // A finished stroke still waiting for the next touch belongs in the file.
            board.commit_pending();
            let image = board.flatten_to_image(cfg.width, cfg.height, cfg.background);
            let outcome = export::save_png(&image, &cfg.output_dir, &export::file_timestamp(chrono::Local::now()));
            last_save = if outcome.saved {
                let name = outcome.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                format!("SAVED {name}")
            } else {
                String::from("SAVE FAILED")
            };
        }

        /* 3) Repaint: background, history, stroke in progress. */
        screen.fill(cfg.background);
        board.render(&mut screen);
        board.render_preview(&mut screen);

        /* 4) Crosshair + HUD on top */
        if let Some((mx, my)) = drawer.mouse_pos() {
            draw_crosshair(&mut screen, mx as i32, my as i32, 10, hud_color);
        }
        let brush = board.brush();
        let blur = brush.blur.map(|b| b.style.label()).unwrap_or("NONE");
        let hud = format!(
            "W:{:.0} | BLUR:{} | STROKES:{} {}",
            brush.width,
            blur,
            board.strokes().len(),
            last_save
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, hud_color);

        /* 5) Present to the window. */
        drawer.present(&screen)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_cycle_returns_to_none() {
        let mut b = None;
        let mut seen = Vec::new();
        for _ in 0..5 {
            b = next_blur(b);
            seen.push(b);
        }
        assert_eq!(
            seen,
            vec![
                Some(BlurStyle::Normal),
                Some(BlurStyle::Solid),
                Some(BlurStyle::Outer),
                Some(BlurStyle::Inner),
                None
            ]
        );
    }
}
