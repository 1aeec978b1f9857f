//! Pixel-addressable drawing surface boundary and its Cairo implementation.

use super::color::{Rgb, WHITE};
use crate::error::{CanvasError, CanvasResult};
use log::warn;

/// Square, pixel-addressable area the canvas paints into.
///
/// Hosts that render elsewhere (a browser canvas, a toolkit widget) implement
/// this with their own fill and read primitives. Coordinates are absolute
/// pixels from the top-left corner.
pub trait Surface {
    /// Side length in pixels.
    fn size(&self) -> u32;

    /// Fills the rectangle with a solid color. Parts outside the surface are clipped.
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb);

    /// Reads the color of a single pixel.
    fn pixel(&mut self, x: u32, y: u32) -> CanvasResult<Rgb>;
}

/// In-memory surface backed by a Cairo RGB24 image.
pub struct CairoSurface {
    image: cairo::ImageSurface,
    size: u32,
}

impl CairoSurface {
    /// Creates a `size × size` surface filled with white.
    pub fn new(size: u32) -> CanvasResult<Self> {
        let side = i32::try_from(size)
            .map_err(|_| CanvasError::Surface(format!("surface size {size} is too large")))?;
        let image = cairo::ImageSurface::create(cairo::Format::Rgb24, side, side)
            .map_err(|err| CanvasError::Surface(format!("failed to create image surface: {err}")))?;

        let mut surface = Self { image, size };
        surface.fill_rect(0, 0, size, size, WHITE);
        Ok(surface)
    }

    /// The backing image, for hosts that blit it to screen.
    pub fn image(&self) -> &cairo::ImageSurface {
        &self.image
    }
}

impl Surface for CairoSurface {
    fn size(&self) -> u32 {
        self.size
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
        let ctx = match cairo::Context::new(&self.image) {
            Ok(ctx) => ctx,
            Err(err) => {
                warn!("Failed to create drawing context: {}", err);
                return;
            }
        };
        let (r, g, b) = color.to_unit();
        ctx.set_antialias(cairo::Antialias::None);
        ctx.set_source_rgb(r, g, b);
        ctx.rectangle(x as f64, y as f64, width as f64, height as f64);
        let _ = ctx.fill(); // A failed fill leaves the previous pixels in place
    }

    fn pixel(&mut self, x: u32, y: u32) -> CanvasResult<Rgb> {
        if x >= self.size || y >= self.size {
            return Err(CanvasError::Surface(format!(
                "pixel ({x}, {y}) is outside the {0}x{0} surface",
                self.size
            )));
        }

        self.image.flush();
        let stride = self.image.stride() as usize;
        let data = self
            .image
            .data()
            .map_err(|err| CanvasError::Surface(format!("failed to borrow pixel data: {err}")))?;

        // RGB24 stores each pixel as a native-endian u32 laid out 0x00RRGGBB.
        let offset = y as usize * stride + x as usize * 4;
        let bytes = [
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ];
        let value = u32::from_ne_bytes(bytes);
        Ok(Rgb::new(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ))
    }
}
