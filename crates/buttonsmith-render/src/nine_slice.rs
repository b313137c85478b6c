//! Nine-slice compositing.
//!
//! The source is cut along its slice insets into four corners, four edges and
//! a center. Corners keep their size, edges stretch along one axis and the
//! center stretches along both.

use buttonsmith_spec::SliceInsets;
use tracing::{debug, warn};

use crate::bitmap::{Bitmap, Rect};

/// One of the nine regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceRegion {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl SliceRegion {
    /// All regions in row-major order.
    pub const ALL: [SliceRegion; 9] = [
        SliceRegion::TopLeft,
        SliceRegion::Top,
        SliceRegion::TopRight,
        SliceRegion::Left,
        SliceRegion::Center,
        SliceRegion::Right,
        SliceRegion::BottomLeft,
        SliceRegion::Bottom,
        SliceRegion::BottomRight,
    ];

    fn column(&self) -> usize {
        match self {
            SliceRegion::TopLeft | SliceRegion::Left | SliceRegion::BottomLeft => 0,
            SliceRegion::Top | SliceRegion::Center | SliceRegion::Bottom => 1,
            SliceRegion::TopRight | SliceRegion::Right | SliceRegion::BottomRight => 2,
        }
    }

    fn row(&self) -> usize {
        match self {
            SliceRegion::TopLeft | SliceRegion::Top | SliceRegion::TopRight => 0,
            SliceRegion::Left | SliceRegion::Center | SliceRegion::Right => 1,
            SliceRegion::BottomLeft | SliceRegion::Bottom | SliceRegion::BottomRight => 2,
        }
    }
}

/// Source and destination rectangles of one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlicePlacement {
    pub region: SliceRegion,
    pub src: Rect,
    pub dst: Rect,
}

impl SlicePlacement {
    /// Degenerate placements are skipped when drawing.
    pub fn is_drawable(&self) -> bool {
        !self.src.is_empty() && !self.dst.is_empty()
    }
}

/// Split `total` into `[start, middle, end]` spans.
fn spans(total: u32, start: u32, end: u32) -> [(u32, u32); 3] {
    let middle = total - start - end;
    [(0, start), (start, middle), (start + middle, end)]
}

/// Fixed destination sizes for the two outer spans of one axis.
///
/// When the target is smaller than the corner sum both corners shrink
/// proportionally so they still fit.
fn fixed_spans(target: u32, start: u32, end: u32) -> (u32, u32) {
    let sum = start as u64 + end as u64;
    if sum <= target as u64 {
        return (start, end);
    }
    let scaled_start = (start as u64 * target as u64 / sum) as u32;
    (scaled_start, target - scaled_start)
}

/// True when `target_size` is too small to hold the corners at source size.
///
/// Auto-fitted canvases never are; [`plan`] shrinks the corners when this holds.
pub fn corners_shrink(
    source_size: (u32, u32),
    target_size: (u32, u32),
    insets: &SliceInsets,
) -> bool {
    let insets = insets.normalized(source_size.0, source_size.1);
    insets.left as u64 + insets.right as u64 > target_size.0 as u64
        || insets.top as u64 + insets.bottom as u64 > target_size.1 as u64
}

/// Compute the nine placements for a source of `source_size` drawn into a
/// `target_size` canvas.
///
/// `insets` are re-normalised against the source size first.
pub fn plan(
    source_size: (u32, u32),
    target_size: (u32, u32),
    insets: &SliceInsets,
) -> [SlicePlacement; 9] {
    let (sw, sh) = source_size;
    let (tw, th) = target_size;
    let insets = insets.normalized(sw, sh);

    let src_cols = spans(sw, insets.left, insets.right);
    let src_rows = spans(sh, insets.top, insets.bottom);

    let (dl, dr) = fixed_spans(tw, insets.left, insets.right);
    let (dt, db) = fixed_spans(th, insets.top, insets.bottom);
    let dst_cols = spans(tw, dl, dr);
    let dst_rows = spans(th, dt, db);

    SliceRegion::ALL.map(|region| {
        let (sx, swidth) = src_cols[region.column()];
        let (sy, sheight) = src_rows[region.row()];
        let (dx, dwidth) = dst_cols[region.column()];
        let (dy, dheight) = dst_rows[region.row()];
        SlicePlacement {
            region,
            src: Rect::new(sx, sy, swidth, sheight),
            dst: Rect::new(dx, dy, dwidth, dheight),
        }
    })
}

/// Draw `source` into `target` as a nine-slice. Returns the number of
/// regions drawn.
pub fn draw(target: &mut Bitmap, source: &Bitmap, insets: &SliceInsets) -> usize {
    if corners_shrink(source.size(), target.size(), insets) {
        warn!(
            target_width = target.width,
            target_height = target.height,
            "nine-slice target smaller than its corners, scaling corners down"
        );
    }
    let placements = plan(source.size(), target.size(), insets);
    let mut drawn = 0;

    for placement in placements.iter().filter(|p| p.is_drawable()) {
        blit(target, source, placement.src, placement.dst);
        drawn += 1;
    }

    debug!(
        source_width = source.width,
        source_height = source.height,
        target_width = target.width,
        target_height = target.height,
        regions = drawn,
        "nine-slice composited"
    );
    drawn
}

/// Render `source` at `width` x `height`.
///
/// A missing source yields a transparent canvas.
pub fn composite(
    source: Option<&Bitmap>,
    width: u32,
    height: u32,
    insets: &SliceInsets,
) -> Bitmap {
    let mut target = Bitmap::new(width, height);
    match source {
        Some(source) => {
            draw(&mut target, source, insets);
        }
        None => warn!("nine-slice source missing, compositing skipped"),
    }
    target
}

/// Copy or resample one region.
fn blit(target: &mut Bitmap, source: &Bitmap, src: Rect, dst: Rect) {
    if src.width == dst.width && src.height == dst.height {
        target.copy_region(source, src, dst);
        return;
    }

    let scale_x = src.width as f64 / dst.width as f64;
    let scale_y = src.height as f64 / dst.height as f64;

    for dy in 0..dst.height {
        let sy = (dy as f64 + 0.5) * scale_y - 0.5;
        for dx in 0..dst.width {
            let sx = (dx as f64 + 0.5) * scale_x - 0.5;
            let pixel = source.sample_region(src, sx, sy).to_rgba8();
            target.set(dst.x + dx, dst.y + dy, pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(plan: &[SlicePlacement; 9], region: SliceRegion) -> SlicePlacement {
        *plan.iter().find(|p| p.region == region).unwrap()
    }

    #[test]
    fn test_plan_downscaled_center() {
        let plan = plan((100, 100), (50, 50), &SliceInsets::uniform(10));

        let center = placement(&plan, SliceRegion::Center);
        assert_eq!(center.src, Rect::new(10, 10, 80, 80));
        assert_eq!(center.dst, Rect::new(10, 10, 30, 30));

        let corner = placement(&plan, SliceRegion::BottomRight);
        assert_eq!(corner.src, Rect::new(90, 90, 10, 10));
        assert_eq!(corner.dst, Rect::new(40, 40, 10, 10));

        let top = placement(&plan, SliceRegion::Top);
        assert_eq!(top.src, Rect::new(10, 0, 80, 10));
        assert_eq!(top.dst, Rect::new(10, 0, 30, 10));
    }

    #[test]
    fn test_plan_renormalizes_insets() {
        // Config predates a smaller source.
        let plan = plan((20, 20), (40, 40), &SliceInsets::new(15, 15, 15, 15));
        let right = placement(&plan, SliceRegion::TopRight);
        assert_eq!(right.src.width, 5);
        let center = placement(&plan, SliceRegion::Center);
        assert!(!center.is_drawable());
    }

    #[test]
    fn test_plan_shrinks_corners_for_small_target() {
        let plan = plan((40, 40), (10, 10), &SliceInsets::new(10, 10, 10, 10));
        for p in plan.iter() {
            assert!(p.dst.right() <= 10 && p.dst.bottom() <= 10, "{:?}", p);
        }
        assert_eq!(placement(&plan, SliceRegion::TopLeft).dst.width, 5);
        assert!(!placement(&plan, SliceRegion::Center).is_drawable());
    }

    #[test]
    fn test_corners_shrink_detection() {
        let insets = SliceInsets::uniform(10);
        assert!(corners_shrink((40, 40), (10, 10), &insets));
        assert!(corners_shrink((40, 40), (40, 19), &insets));
        assert!(!corners_shrink((100, 100), (50, 50), &insets));
        assert!(!corners_shrink((40, 40), (20, 20), &insets));
    }

    #[test]
    fn test_natural_size_never_shrinks_corners() {
        for insets in [
            SliceInsets::uniform(0),
            SliceInsets::new(30, 30, 30, 30),
            SliceInsets::new(1, 200, 7, 0),
        ] {
            assert!(!corners_shrink((24, 16), (24, 16), &insets), "{:?}", insets);
        }
    }

    #[test]
    fn test_corners_copied_verbatim() {
        let mut source = Bitmap::filled(30, 30, [0, 0, 255, 255]);
        for y in 0..10 {
            for x in 0..10 {
                source.set(x, y, [x as u8 * 20, y as u8 * 20, 0, 255]);
            }
        }

        let target = composite(Some(&source), 90, 60, &SliceInsets::uniform(10));
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(target.get(x, y), source.get(x, y));
            }
        }
        assert_eq!(target.get(45, 30), [0, 0, 255, 255]);
    }

    #[test]
    fn test_stretch_does_not_bleed_across_slices() {
        let mut source = Bitmap::filled(30, 30, [255, 0, 0, 255]);
        // Green center only.
        for y in 10..20 {
            for x in 10..20 {
                source.set(x, y, [0, 255, 0, 255]);
            }
        }

        let target = composite(Some(&source), 100, 100, &SliceInsets::uniform(10));
        for y in 10..90 {
            for x in 10..90 {
                assert_eq!(target.get(x, y), [0, 255, 0, 255]);
            }
        }
        assert_eq!(target.get(50, 5), [255, 0, 0, 255]);
    }

    #[test]
    fn test_missing_source_is_transparent() {
        let target = composite(None, 12, 8, &SliceInsets::uniform(4));
        assert_eq!(target.size(), (12, 8));
        assert!(target.pixels().all(|p| p == [0, 0, 0, 0]));
    }

    #[test]
    fn test_zero_insets_stretch_whole_image() {
        let source = Bitmap::filled(2, 2, [10, 20, 30, 255]);
        let mut target = Bitmap::new(8, 8);
        let drawn = draw(&mut target, &source, &SliceInsets::uniform(0));
        assert_eq!(drawn, 1);
        assert!(target.pixels().all(|p| p == [10, 20, 30, 255]));
    }
}
