//! End-to-end rendering scenarios.

use pattern_gen::compositor::{render, render_seeded, render_with};
use pattern_gen::export::{decode_png, encode_png};
use pattern_gen::gradient::gradient;
use pattern_gen::{ColorGradient, PatternError, PatternKind, Raster, RenderParameters, Rgb8};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn hex(s: &str) -> Rgb8 {
    s.parse().unwrap()
}

#[test]
fn test_checkerboard_row_matches_parity() {
    let params = RenderParameters::new(
        PatternKind::Checkerboard,
        vec![hex("#000000"), hex("#ffffff")],
    )
    .with_intensity(1.0);
    let raster = render(4, 1, &params, 0).unwrap();
    let expected = [Rgb8::BLACK, Rgb8::WHITE, Rgb8::BLACK, Rgb8::WHITE];
    for (x, want) in expected.iter().enumerate() {
        assert_eq!(raster.pixel(x as u32, 0), *want, "pixel {}", x);
    }
}

#[test]
fn test_three_stop_midpoint() {
    let stops = [hex("#ff0000"), hex("#00ff00"), hex("#0000ff")];
    assert_eq!(gradient(&stops, 0.5).unwrap().to_hex(), "#00ff00");
}

#[test]
fn test_single_stop_fails_before_writing() {
    let params = RenderParameters::default().with_stops(vec![hex("#abcdef")]);
    let mut raster = Raster::new(16, 16);
    let err = render_seeded(&mut raster, &params, 3).unwrap_err();
    assert!(matches!(err, PatternError::TooFewStops { count: 1 }));
    assert!(raster.as_bytes().iter().all(|&b| b == 0));
    assert!(render(16, 16, &params, 3).is_err());
}

#[test]
fn test_malformed_color_rejected_at_boundary() {
    assert!(matches!(
        ColorGradient::from_hex(&["#ff0000", "#00ff0"]),
        Err(PatternError::InvalidColor { .. })
    ));
}

#[test]
fn test_deterministic_without_noise() {
    for kind in PatternKind::ALL {
        let params = RenderParameters::default()
            .with_pattern(kind)
            .with_intensity(1.3);
        let a = render(48, 16, &params, 1).unwrap();
        let b = render(48, 16, &params, 2).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes(), "{:?}", kind);
    }
}

#[test]
fn test_full_randomness_is_uniform() {
    // Black to white: the red channel is round(255 * U).
    let params = RenderParameters::new(PatternKind::Ripples, vec![Rgb8::BLACK, Rgb8::WHITE])
        .with_randomness(1.0);
    let raster = render(100, 100, &params, 0xC0FFEE).unwrap();

    let mut quartiles = [0usize; 4];
    let mut sum = 0.0;
    for y in 0..100 {
        for x in 0..100 {
            let t = raster.pixel(x, y).r as f64 / 255.0;
            sum += t;
            quartiles[((t * 4.0) as usize).min(3)] += 1;
        }
    }
    let mean = sum / 10_000.0;
    assert!((mean - 0.5).abs() < 0.02, "mean={}", mean);
    for (q, &count) in quartiles.iter().enumerate() {
        assert!((2200..=2800).contains(&count), "quartile {} has {}", q, count);
    }
}

#[test]
fn test_full_randomness_independent_of_pattern() {
    let base = RenderParameters::default().with_randomness(1.0).with_distortion(0.5);
    let reference = render(40, 20, &base, 11).unwrap();
    for kind in PatternKind::ALL {
        let other = render(40, 20, &base.clone().with_pattern(kind), 11).unwrap();
        assert!(reference.compare(&other).unwrap().identical, "{:?}", kind);
    }
}

#[test]
fn test_injected_rng_drives_noise() {
    let params = RenderParameters::default()
        .with_pattern(PatternKind::Hyperbolic)
        .with_randomness(0.5)
        .with_distortion(0.5);
    let mut a = Raster::new(24, 24);
    let mut b = Raster::new(24, 24);
    render_with(&mut a, &params, &mut StdRng::seed_from_u64(42)).unwrap();
    render_with(&mut b, &params, &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_every_pixel_is_opaque_gradient_color() {
    let stops = vec![hex("#102030"), hex("#f0e0d0")];
    let g = ColorGradient::new(stops.clone()).unwrap();
    for kind in PatternKind::ALL {
        let params = RenderParameters::new(kind, stops.clone())
            .with_randomness(0.2)
            .with_distortion(0.3);
        let raster = render(30, 10, &params, 9).unwrap();
        for px in raster.as_bytes().chunks_exact(4) {
            assert_eq!(px[3], 255);
            for (c, (lo, hi)) in [(px[0], (0x10, 0xf0)), (px[1], (0x20, 0xe0)), (px[2], (0x30, 0xd0))] {
                assert!(c >= lo && c <= hi, "{:?} channel {} out of gradient", kind, c);
            }
        }
        // Endpoints of the gradient are exact stops.
        assert_eq!(g.color_at(0.0), stops[0]);
        assert_eq!(g.color_at(1.0), stops[1]);
    }
}

#[test]
fn test_default_canvas_exports_to_png() {
    let params = RenderParameters::default();
    let raster = render(
        pattern_gen::basics::DEFAULT_WIDTH,
        pattern_gen::basics::DEFAULT_HEIGHT,
        &params,
        0,
    )
    .unwrap();
    assert_eq!(raster.as_bytes().len(), 1500 * 500 * 4);
    let back = decode_png(&encode_png(&raster).unwrap()).unwrap();
    assert!(raster.compare(&back).unwrap().identical);
}
