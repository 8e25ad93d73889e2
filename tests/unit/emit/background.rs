use super::*;

#[test]
fn gradient_runs_from_top_to_bottom() {
    let top = Rgb::new(0xFF, 0xFF, 0xFF);
    let bottom = Rgb::new(0xE2, 0xE8, 0xF0);
    let img = gradient_image(top, bottom, 3, 5);
    assert_eq!(img.dimensions(), (3, 5));
    assert_eq!(img.get_pixel(0, 0).0, [0xFF, 0xFF, 0xFF]);
    assert_eq!(img.get_pixel(2, 4).0, [0xE2, 0xE8, 0xF0]);
    let mid = img.get_pixel(1, 2).0;
    assert!(mid[0] < 0xFF && mid[0] > 0xE2);
}

#[test]
fn degenerate_sizes_still_produce_a_pixel() {
    let img = gradient_image(Rgb::WHITE, Rgb::WHITE, 0, 0);
    assert_eq!(img.dimensions(), (1, 1));
}

#[test]
fn png_strip_decodes() {
    let bytes = gradient_png(Rgb::new(0x1F, 0x3D, 0x2B), Rgb::new(0x27, 0x4E, 0x37)).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (1, GRADIENT_ROWS));
    assert_eq!(decoded.get_pixel(0, 0).0, [0x1F, 0x3D, 0x2B]);
    assert_eq!(
        gradient_samples(Rgb::WHITE, Rgb::WHITE).len(),
        3 * GRADIENT_ROWS as usize
    );
}
