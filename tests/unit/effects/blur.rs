use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 3, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn blur_rejects_mismatched_buffer() {
    assert!(blur_rgba8_premul(&[0u8; 7], 1, 2, 1, 1.0).is_err());
}

#[test]
fn radius_covers_three_sigma() {
    assert_eq!(radius_for_sigma(0.0), 0);
    assert_eq!(radius_for_sigma(2.0), 6);
    assert_eq!(radius_for_sigma(f32::NAN), 0);
}

#[test]
fn region_blur_matches_full_blur_for_isolated_content() {
    let (w, h) = (16u32, 12u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    for y in 5..7u32 {
        for x in 6..9u32 {
            let i = ((y * w + x) * 4) as usize;
            src[i..i + 4].copy_from_slice(&[200, 100, 50, 255]);
        }
    }
    let full = blur_rgba8_premul(&src, w, h, 2, 1.0).unwrap();
    let mut part = src.clone();
    blur_region_in_place(&mut part, w, h, [4, 3, 11, 9], 2, 1.0).unwrap();
    assert_eq!(part, full);
}
