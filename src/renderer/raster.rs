//! Rasterization of rendered SVG to PNG

use std::path::Path;
use std::sync::OnceLock;

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};

use crate::error::{Error, Result};

/// System fonts are loaded once per process
fn font_database() -> &'static std::sync::Arc<fontdb::Database> {
    static FONTS: OnceLock<std::sync::Arc<fontdb::Database>> = OnceLock::new();
    FONTS.get_or_init(|| {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        std::sync::Arc::new(db)
    })
}

/// Pixel dimensions of a `width_in × height_in` inch figure at `dpi`
pub fn pixel_size(width_in: f64, height_in: f64, dpi: u32) -> (u32, u32) {
    let px = |inches: f64| ((inches * dpi as f64).round() as u32).max(1);
    (px(width_in), px(height_in))
}

/// Rasterize an SVG document to a PNG image of exactly `width × height` pixels
pub fn svg_to_png(svg: &str, width: u32, height: u32, output: &Path) -> Result<()> {
    let options = usvg::Options {
        fontdb: font_database().clone(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options)?;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::png(output, format!("cannot allocate {}x{} pixmap", width, height)))?;
    let size = tree.size();
    let transform = Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(output)
        .map_err(|e| Error::png(output, e))?;
    Ok(())
}

/// Read the pixel dimensions from a PNG file header
pub fn png_dimensions(path: &Path) -> Result<(u32, u32)> {
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let decoder = png::Decoder::new(std::io::BufReader::new(file));
    let reader = decoder.read_info().map_err(|e| Error::png(path, e))?;
    let info = reader.info();
    Ok((info.width, info.height))
}
