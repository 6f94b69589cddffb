// Saving the flattened painting as `Paint<timestamp>.png`.
// Visual: nothing changes on screen; a new lossless PNG appears in the output folder.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use tracing::{error, info, warn};

use crate::error::Error;
use crate::types::FrameBuffer;

pub const FILE_NAME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Where the image went and whether it actually made it to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub path: PathBuf,
    pub saved: bool,
}

pub fn file_timestamp(now: DateTime<Local>) -> String {
    now.format(FILE_NAME_FORMAT).to_string()
}

pub fn paint_file_name(timestamp: &str) -> String {
    format!("Paint{timestamp}.png")
}

/// Encode `fb` into `dir/Paint<timestamp>.png`, creating `dir` if needed. Failures are
/// logged and folded into `saved = false`; a half-written file is removed.
pub fn save_png(fb: &FrameBuffer, dir: &Path, timestamp: &str) -> SaveOutcome {
    let path = dir.join(paint_file_name(timestamp));
    match write_png(fb, &path) {
        Ok(()) => {
            info!(path = %path.display(), width = fb.width, height = fb.height, "painting saved");
            SaveOutcome { path, saved: true }
        }
        Err(e) => {
            error!(path = %path.display(), "saving painting failed: {e}");
            if path.exists() {
                if let Err(rm) = fs::remove_file(&path) {
                    warn!(path = %path.display(), "could not remove partial file: {rm}");
                }
            }
            SaveOutcome { path, saved: false }
        }
    }
}

fn write_png(fb: &FrameBuffer, path: &Path) -> Result<(), Error> {
    let (w, h) = (fb.width as u32, fb.height as u32);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive)
        .write_image(&fb.to_rgb8(), w, h, ExtendedColorType::Rgb8)?;
    out.flush()?;
    Ok(())
}
