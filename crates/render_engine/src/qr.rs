//! QR code drawing on PDF layers
//!
//! The QR payload carries the document number, date, amount and currency so
//! a scanned copy can be checked against the system of record. Modules are
//! drawn as filled polygons; no raster image is embedded.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{Color, Greyscale, Mm, PdfLayerReference, Point, Polygon};
use qrcode::{Color as ModuleColor, QrCode};

use crate::error::RenderError;

/// Draws a QR code with its lower-left corner at (`left_mm`, `bottom_mm`)
pub(crate) fn draw(
    layer: &PdfLayerReference,
    payload: &str,
    left_mm: f32,
    bottom_mm: f32,
    size_mm: f32,
) -> Result<(), RenderError> {
    let code = QrCode::new(payload.as_bytes()).map_err(|e| RenderError::Qr(e.to_string()))?;
    let modules = code.width();
    let cell = size_mm / modules as f32;
    let colors = code.to_colors();

    layer.set_fill_color(Color::Greyscale(Greyscale::new(0.0, None)));
    for (index, color) in colors.iter().enumerate() {
        if *color != ModuleColor::Dark {
            continue;
        }
        let col = index % modules;
        let row = index / modules;
        let x = left_mm + col as f32 * cell;
        // QR rows count from the top, PDF y from the bottom
        let y = bottom_mm + size_mm - (row as f32 + 1.0) * cell;
        layer.add_polygon(Polygon {
            rings: vec![vec![
                (Point::new(Mm(x), Mm(y)), false),
                (Point::new(Mm(x + cell), Mm(y)), false),
                (Point::new(Mm(x + cell), Mm(y + cell)), false),
                (Point::new(Mm(x), Mm(y + cell)), false),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }
    Ok(())
}
