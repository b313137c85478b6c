//! RGBA8 raster buffer.

use crate::blend::Rgba;

/// Integer pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when either axis has zero extent.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// A 2D RGBA8 bitmap with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (RGBA, row-major, 4 bytes per pixel).
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Create a fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Create a bitmap filled with one pixel value.
    pub fn filled(width: u32, height: u32, fill: [u8; 4]) -> Self {
        let size = width as usize * height as usize;
        let mut data = Vec::with_capacity(size * 4);
        for _ in 0..size {
            data.extend_from_slice(&fill);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap existing RGBA8 bytes. Returns `None` on a length mismatch.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        (data.len() == width as usize * height as usize * 4).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&pixel);
    }

    /// Get a pixel with wrapping coordinates (for tiling).
    #[inline]
    pub fn get_wrapped(&self, x: i64, y: i64) -> [u8; 4] {
        let wx = x.rem_euclid(self.width as i64) as u32;
        let wy = y.rem_euclid(self.height as i64) as u32;
        self.get(wx, wy)
    }

    /// Composite `src` over the pixel at `(x, y)` with extra `coverage`.
    ///
    /// Out-of-bounds coordinates are ignored.
    pub fn blend_over(&mut self, x: i64, y: i64, src: Rgba, coverage: f64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let dst = Rgba::from_rgba8(self.get(x, y));
        let src = Rgba {
            a: src.a * coverage.clamp(0.0, 1.0),
            ..src
        };
        self.set(x, y, dst.source_over(&src).to_rgba8());
    }

    /// Copy a region verbatim from `src` to this bitmap.
    ///
    /// Both rectangles must have the same size and lie inside their bitmaps.
    pub fn copy_region(&mut self, src: &Bitmap, from: Rect, to: Rect) {
        debug_assert_eq!((from.width, from.height), (to.width, to.height));
        let row_bytes = from.width as usize * 4;
        for row in 0..from.height {
            let s = src.index(from.x, from.y + row);
            let d = self.index(to.x, to.y + row);
            self.data[d..d + row_bytes].copy_from_slice(&src.data[s..s + row_bytes]);
        }
    }

    /// Bilinear sample confined to `region`.
    ///
    /// `(sx, sy)` are continuous pixel coordinates relative to the region
    /// origin; samples never read outside the region. Interpolation happens
    /// on premultiplied values so transparent texels do not darken edges.
    pub fn sample_region(&self, region: Rect, sx: f64, sy: f64) -> Rgba {
        let max_x = (region.width - 1) as f64;
        let max_y = (region.height - 1) as f64;
        let x = sx.clamp(0.0, max_x);
        let y = sy.clamp(0.0, max_y);

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(region.width - 1);
        let y1 = (y0 + 1).min(region.height - 1);
        let fx = x - x.floor();
        let fy = y - y.floor();

        let texel = |tx: u32, ty: u32| {
            Rgba::from_rgba8(self.get(region.x + tx, region.y + ty)).premultiplied()
        };

        let top = texel(x0, y0).lerp(&texel(x1, y0), fx);
        let bottom = texel(x0, y1).lerp(&texel(x1, y1), fx);
        top.lerp(&bottom, fy).unpremultiplied()
    }

    /// Borrow the raw RGBA8 bytes.
    pub fn as_rgba8(&self) -> &[u8] {
        &self.data
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}
