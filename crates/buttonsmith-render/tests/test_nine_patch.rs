//! Integration tests for nine-slice compositing and auto-fit canvases.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p buttonsmith-render --test test_nine_patch
//! ```

use buttonsmith_render::nine_slice::{self, SliceRegion};
use buttonsmith_render::patch::{paint, slice_minimum, RenderOutcome, RenderPhase};
use buttonsmith_render::text::{fit_canvas, measure, FontFace};
use buttonsmith_render::{render_nine_patch, Bitmap, FontLoader, Rect};
use buttonsmith_spec::{
    InteractionState, LabelConfig, NinePatchStateConfig, PaddingInsets, SliceInsets,
};
use proptest::prelude::*;

/// Source whose four corners, edges and center each have a distinct color.
fn quadrant_source(size: u32, inset: u32) -> Bitmap {
    let mut bitmap = Bitmap::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let col = if x < inset { 0 } else if x >= size - inset { 2 } else { 1 };
            let row = if y < inset { 0 } else if y >= size - inset { 2 } else { 1 };
            let tone = (row * 3 + col) as u8 * 25;
            bitmap.set(x, y, [tone, 255 - tone, 128, 255]);
        }
    }
    bitmap
}

// ============================================================================
// Compositing
// ============================================================================

#[test]
fn test_downscaled_center_scenario() {
    let plan = nine_slice::plan((100, 100), (50, 50), &SliceInsets::uniform(10));
    let center = plan
        .iter()
        .find(|p| p.region == SliceRegion::Center)
        .unwrap();

    assert_eq!(center.src, Rect::new(10, 10, 80, 80));
    assert_eq!(center.dst, Rect::new(10, 10, 30, 30));
}

#[test]
fn test_corners_are_copied_verbatim() {
    let source = quadrant_source(30, 10);
    let target = nine_slice::composite(Some(&source), 90, 50, &SliceInsets::uniform(10));

    for (sx, sy, tx, ty) in [(0, 0, 0, 0), (29, 0, 89, 0), (0, 29, 0, 49), (29, 29, 89, 49)] {
        assert_eq!(source.get(sx, sy), target.get(tx, ty), "corner at ({tx},{ty})");
    }
    // Interior of a corner region as well, not only the outermost pixel.
    assert_eq!(source.get(5, 5), target.get(5, 5));
    assert_eq!(source.get(24, 24), target.get(84, 44));
}

#[test]
fn test_edges_stretch_along_one_axis() {
    let source = quadrant_source(30, 10);
    let target = nine_slice::composite(Some(&source), 90, 50, &SliceInsets::uniform(10));

    let top_edge = source.get(15, 2);
    for x in [12, 40, 77] {
        assert_eq!(target.get(x, 2), top_edge);
    }
    let left_edge = source.get(2, 15);
    for y in [12, 25, 37] {
        assert_eq!(target.get(2, y), left_edge);
    }
}

#[test]
fn test_oversized_insets_are_renormalized() {
    let plan = nine_slice::plan((20, 20), (40, 40), &SliceInsets::new(15, 15, 15, 15));
    let corner = plan
        .iter()
        .find(|p| p.region == SliceRegion::BottomRight)
        .unwrap();
    // left/top keep 15, right/bottom shrink to the remaining 5.
    assert_eq!(corner.src, Rect::new(15, 15, 5, 5));
    assert_eq!(corner.dst, Rect::new(35, 35, 5, 5));
}

#[test]
fn test_missing_source_composites_nothing() {
    let target = nine_slice::composite(None, 12, 8, &SliceInsets::uniform(2));
    assert_eq!(target.size(), (12, 8));
    assert!(target.pixels().all(|p| p[3] == 0));
}

// ============================================================================
// Auto-fit
// ============================================================================

#[test]
fn test_padded_text_scenario() {
    let extent = measure(&FontFace::Builtin, "Параметр", 20.0);
    assert_eq!(extent.width, 96.0);
    assert_eq!(extent.height, 25.0);

    let canvas = fit_canvas((20, 20), &extent, &PaddingInsets::new(16.0, 24.0, 16.0, 24.0));
    assert_eq!(canvas, (144, 57));
}

#[test]
fn test_slice_minimum_wins_for_short_text() {
    let patch = NinePatchStateConfig {
        source_image: None,
        slices: SliceInsets::new(40, 60, 40, 60),
        padding: PaddingInsets::uniform(4.0),
    };
    let label = LabelConfig {
        text: "Go".to_string(),
        font_size: 10,
        ..LabelConfig::default()
    };
    let mut outcome = RenderOutcome {
        phases: vec![RenderPhase::Idle],
        font: None,
        source_missing: false,
        regions_drawn: 0,
        clamped: false,
    };

    let bitmap = paint(
        &FontFace::Builtin,
        &label,
        &patch,
        InteractionState::Normal,
        None,
        &mut outcome,
    );
    assert_eq!(bitmap.size(), (120, 80));
    assert!(outcome.source_missing);
}

proptest! {
    /// The fitted canvas always covers both the slice minimum and the padded text.
    #[test]
    fn fitted_canvas_covers_minimum_and_text(
        min_w in 0u32..400,
        min_h in 0u32..400,
        chars in 0usize..24,
        size in 8u32..=120,
        pad in prop::array::uniform4(0.0f64..200.0),
    ) {
        let text = "W".repeat(chars);
        let extent = measure(&FontFace::Builtin, &text, size as f64);
        let padding = PaddingInsets::new(pad[0], pad[1], pad[2], pad[3]);
        let (w, h) = fit_canvas((min_w, min_h), &extent, &padding);

        prop_assert!(w >= min_w && h >= min_h);
        prop_assert!(w as f64 >= extent.width + padding.horizontal());
        prop_assert!(h as f64 >= extent.height + padding.vertical());
        prop_assert!(w >= 1 && h >= 1);
    }

    /// Destination spans tile the target without gaps or overlap.
    #[test]
    fn plan_tiles_the_target(
        source in 1u32..64,
        insets in prop::array::uniform4(0u32..80),
        target in (1u32..200, 1u32..200),
    ) {
        let insets = SliceInsets::new(insets[0], insets[1], insets[2], insets[3]);
        let plan = nine_slice::plan((source, source), target, &insets);

        let area: u64 = plan.iter().map(|p| p.dst.width as u64 * p.dst.height as u64).sum();
        prop_assert_eq!(area, target.0 as u64 * target.1 as u64);
        for placement in &plan {
            prop_assert!(placement.src.right() <= source);
            prop_assert!(placement.src.bottom() <= source);
            prop_assert!(placement.dst.right() <= target.0);
            prop_assert!(placement.dst.bottom() <= target.1);
        }
    }

    /// With a source, the slice minimum never undercuts the source itself.
    #[test]
    fn slice_minimum_covers_source(w in 1u32..100, h in 1u32..100, inset in 0u32..200) {
        let patch = NinePatchStateConfig {
            slices: SliceInsets::uniform(inset),
            ..NinePatchStateConfig::default()
        };
        let source = Bitmap::new(w, h);
        prop_assert_eq!(slice_minimum(&patch, Some(&source)), (w, h));
    }
}

// ============================================================================
// Full render
// ============================================================================

#[tokio::test]
async fn test_render_with_source_draws_all_regions() {
    let patch = NinePatchStateConfig {
        source_image: None,
        slices: SliceInsets::uniform(8),
        padding: PaddingInsets::new(16.0, 24.0, 16.0, 24.0),
    };
    let label = LabelConfig {
        text: "Параметр".to_string(),
        font_size: 20,
        ..LabelConfig::default()
    };
    let source = quadrant_source(24, 8);
    let mut fonts = FontLoader::builtin_only();

    let raster = render_nine_patch(
        &mut fonts,
        &label,
        &patch,
        InteractionState::Hover,
        Some(&source),
        7,
    )
    .await;

    assert_eq!(raster.bitmap.size(), (144, 57));
    assert_eq!(raster.outcome.regions_drawn, 9);
    assert_eq!(raster.outcome.phase(), RenderPhase::Drawn);
    assert!(!raster.outcome.source_missing);
    assert_eq!(raster.bitmap.get(0, 0), source.get(0, 0));

    let png = raster.to_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}
