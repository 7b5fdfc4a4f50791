use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let prepared = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(prepared.rgba8_premul.as_slice(), &[50, 25, 100, 128]);
}

#[test]
fn garbage_is_a_decode_failure() {
    assert!(decode_image(b"definitely not an image").is_err());
    assert!(decode_asset(b"<svg", true).is_err());
}

#[test]
fn svg_is_sniffed_and_rasterized_at_target_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
        <rect width="20" height="10" fill="#00ff00"/></svg>"##;
    let asset = decode_asset(svg, false).unwrap();
    assert!(matches!(asset, PreparedAsset::Svg(_)));
    assert_eq!(asset.aspect_ratio(), Some(2.0));

    let px = asset.pixels_for(40.0, 20.0).unwrap();
    assert_eq!((px.width, px.height), (40, 20));
    let mid = ((10 * 40 + 20) * 4) as usize;
    assert_eq!(&px.rgba8_premul[mid..mid + 4], &[0, 255, 0, 255]);
}

#[test]
fn raster_aspect_ratio_comes_from_pixels() {
    let img = image::RgbaImage::from_pixel(30, 10, image::Rgba([1, 2, 3, 255]));
    let asset = decode_asset(&png_bytes(img), false).unwrap();
    assert_eq!(asset.natural_size(), (30.0, 10.0));
    assert_eq!(asset.aspect_ratio(), Some(3.0));
}

#[test]
fn oversized_svg_raster_is_rejected() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#;
    let asset = decode_asset(svg, true).unwrap();
    assert!(asset.pixels_for(20_000.0, 10.0).is_err());
    assert!(asset.pixels_for(f64::NAN, 10.0).is_err());
}

#[test]
fn oversized_image_is_resampled_to_the_raster_limit() {
    assert_eq!(fit_within(800, 467, MAX_RASTER_DIM), None);
    assert_eq!(fit_within(32_768, 8_192, MAX_RASTER_DIM), Some((16_384, 4_096)));
    assert_eq!(fit_within(70_000, 1, MAX_RASTER_DIM), Some((16_384, 1)));

    let img = image::RgbaImage::from_pixel(70_000, 1, image::Rgba([0, 0, 255, 255]));
    let prepared = decode_image(&png_bytes(img)).unwrap();
    assert_eq!((prepared.width, prepared.height), (MAX_RASTER_DIM, 1));
    assert_eq!(&prepared.rgba8_premul[..4], &[0, 0, 255, 255]);
}
