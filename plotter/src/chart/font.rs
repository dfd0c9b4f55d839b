use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};

use super::RenderError;

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<PathBuf> = OnceLock::new();

/// The configured font if given, otherwise the first system font that exists.
pub fn find_font(configured: Option<&Path>) -> Option<PathBuf> {
    match configured {
        Some(path) => Some(path.to_path_buf()),
        None => FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.is_file()),
    }
}

/// Registers the font as `sans-serif`, which every label on the chart uses.
///
/// Fonts are registered once per process; later calls return the first font.
pub fn ensure_font(configured: Option<&Path>) -> Result<&'static Path, RenderError> {
    if let Some(path) = REGISTERED.get() {
        return Ok(path.as_path());
    }

    let path = find_font(configured).ok_or(RenderError::FontUnavailable)?;
    let bytes = std::fs::read(&path).map_err(|err| RenderError::FontIo(path.clone(), err))?;

    // The backend keeps a 'static reference to the font data
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font("sans-serif", FontStyle::Normal, bytes).map_err(|_| RenderError::InvalidFont(path.clone()))?;
    debug!("Registered font {}", path.display());

    Ok(REGISTERED.get_or_init(|| path).as_path())
}
