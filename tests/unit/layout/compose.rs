use super::*;
use crate::layout::strategy::Stacked;

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PreparedImage {
    PreparedImage::from_rgba_image(image::RgbaImage::from_pixel(
        width,
        height,
        image::Rgba(rgba),
    ))
}

const BLACK: [u8; 4] = [0, 0, 0, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

#[test]
fn total_width_matches_sum_plus_spacing_for_all_counts() {
    let bg = solid(100, 4, BLACK);
    let glyphs: Vec<PreparedImage> = (1..=6).map(|w| solid(w * 3, 2, RED)).collect();
    for n in 1..=glyphs.len() {
        for spacing in [-4i64, 0, 7] {
            let spec = LayoutSpec {
                background: &bg,
                glyphs: glyphs[..n].iter().collect(),
                spacing,
                vertical_offset: 0,
            };
            let widths: i64 = glyphs[..n].iter().map(|g| i64::from(g.width)).sum();
            assert_eq!(spec.total_width(), widths + spacing * (n as i64 - 1));
            assert_eq!(spec.x_start(), (100 - spec.total_width()).div_euclid(2));
        }
    }
}

#[test]
fn placements_advance_by_width_plus_spacing() {
    let bg = solid(40, 4, BLACK);
    let a = solid(5, 2, RED);
    let b = solid(3, 2, RED);
    let spec = LayoutSpec {
        background: &bg,
        glyphs: vec![&a, &b, &a],
        spacing: 2,
        vertical_offset: 1,
    };
    // total = 13 + 4 = 17; x_start = (40 - 17) // 2 = 11
    assert_eq!(spec.placements(), vec![(11, 1), (18, 1), (23, 1)]);
}

#[test]
fn overflowing_row_starts_left_of_canvas_without_clamping() {
    let bg = solid(10, 2, BLACK);
    let g = solid(7, 2, RED);
    let spec = LayoutSpec {
        background: &bg,
        glyphs: vec![&g, &g],
        spacing: 0,
        vertical_offset: 0,
    };
    // (10 - 14) // 2 = -2, floor division.
    assert_eq!(spec.x_start(), -2);

    let odd = LayoutSpec {
        background: &bg,
        glyphs: vec![&g, &g],
        spacing: 1,
        vertical_offset: 0,
    };
    // (10 - 15) // 2 = -3 (floor), not -2 (truncation).
    assert_eq!(odd.x_start(), -3);

    let out = compose(&bg, &[&g, &g], 0, 0).unwrap();
    assert_eq!(out.width(), 10);
    assert!((0..10).all(|x| out.pixel(x, 0) == Some(RED)));
}

#[test]
fn compose_empty_row_is_none() {
    let bg = solid(10, 2, BLACK);
    assert!(compose(&bg, &[], 3, 0).is_none());
}

#[test]
fn compose_centers_and_preserves_background() {
    let bg = solid(9, 3, BLACK);
    let g = solid(3, 1, RED);
    let before = bg.clone();

    let out = compose(&bg, &[&g], 0, 1).unwrap();
    assert_eq!(bg, before);

    // x_start = (9 - 3) // 2 = 3; row 1 only.
    for x in 0..9 {
        let want = if (3..6).contains(&x) { RED } else { BLACK };
        assert_eq!(out.pixel(x, 1), Some(want), "x={x}");
        assert_eq!(out.pixel(x, 0), Some(BLACK));
        assert_eq!(out.pixel(x, 2), Some(BLACK));
    }
}

#[test]
fn glyph_alpha_masks_the_blend() {
    let bg = solid(2, 1, BLACK);
    let g = solid(2, 1, CLEAR);
    let out = compose(&bg, &[&g], 0, 0).unwrap();
    assert_eq!(out.pixel(0, 0), Some(BLACK));
    assert_eq!(out.pixel(1, 0), Some(BLACK));
}

#[test]
fn glyphs_below_canvas_are_clipped() {
    let bg = solid(4, 2, BLACK);
    let g = solid(2, 2, RED);
    let out = compose(&bg, &[&g], 0, 5).unwrap();
    assert_eq!(out.image(), bg.pixels());
}

#[test]
fn translucent_background_survives_outside_and_under_clear_glyph_pixels() {
    const HAZE: [u8; 4] = [200, 100, 50, 3];
    let bg = solid(6, 2, HAZE);
    // Left column clear, right column opaque.
    let g = PreparedImage::from_rgba_image(image::RgbaImage::from_fn(2, 1, |x, _| {
        if x == 0 { image::Rgba(CLEAR) } else { image::Rgba(RED) }
    }));

    let out = compose(&bg, &[&g], 0, 0).unwrap();
    // x_start = (6 - 2) // 2 = 2.
    assert_eq!(out.pixel(0, 0), Some(HAZE));
    assert_eq!(out.pixel(2, 0), Some(HAZE));
    assert_eq!(out.pixel(3, 0), Some(RED));
    assert_eq!(out.pixel(3, 1), Some(HAZE));

    let png = out.encode_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, HAZE);
    assert_eq!(decoded.get_pixel(5, 1).0, HAZE);
}

#[test]
fn pixel_outside_canvas_is_none() {
    let out = Composite::from_background(&solid(3, 2, BLACK));
    assert_eq!((out.width(), out.height()), (3, 2));
    assert_eq!(out.pixel(2, 1), Some(BLACK));
    assert_eq!(out.pixel(3, 0), None);
    assert_eq!(out.pixel(0, 2), None);
}

#[test]
fn stacked_layers_keep_their_baked_in_placement() {
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    let bg = solid(6, 2, BLACK);
    let layer = |from: u32, to: u32, rgba: [u8; 4]| {
        PreparedImage::from_rgba_image(image::RgbaImage::from_fn(6, 2, |x, _| {
            if (from..to).contains(&x) { image::Rgba(rgba) } else { image::Rgba(CLEAR) }
        }))
    };
    let first = layer(0, 2, RED);
    let second = layer(2, 4, GREEN);
    let spec = LayoutSpec {
        background: &bg,
        glyphs: vec![&first, &second],
        spacing: 100,
        vertical_offset: 0,
    };
    let out = Stacked.compose(&spec).unwrap();
    assert_eq!(out.pixel(0, 0), Some(RED));
    assert_eq!(out.pixel(1, 1), Some(RED));
    assert_eq!(out.pixel(2, 0), Some(GREEN));
    assert_eq!(out.pixel(3, 1), Some(GREEN));
    assert_eq!(out.pixel(4, 0), Some(BLACK));
    assert!(Stacked.compose(&LayoutSpec { glyphs: vec![], ..spec }).is_none());
}

#[test]
fn png_export_round_trips_pixels() {
    let bg = solid(3, 1, [10, 20, 30, 255]);
    let out = Composite::from_background(&bg);
    let png = out.encode_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 1));
    assert_eq!(decoded.get_pixel(2, 0).0, [10, 20, 30, 255]);
    assert_eq!(out.into_image(), *bg.pixels());
}
