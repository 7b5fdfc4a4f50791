use std::io::Cursor;

use super::*;
use crate::filter::set::FilterSet;
use crate::foundation::config::EditorConfig;

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn failures_are_recorded_not_returned() {
    let mut store = AssetStore::new("/nonexistent-root");
    let key = AssetRef::new("bg.png");
    assert!(matches!(store.load(&key), AssetState::Failed(_)));
    assert!(store.ready(&key).is_none());
    assert!(matches!(store.require(&key), Err(PlaymatError::Decode(_))));
    assert!(store.require(&AssetRef::new("other.png")).is_err());
}

#[test]
fn insert_bytes_replaces_previous_state() {
    let mut store = AssetStore::new(".");
    let key = AssetRef::new("upload");
    assert!(matches!(store.insert_bytes(key.clone(), b"junk"), AssetState::Failed(_)));
    assert!(matches!(store.insert_bytes(key.clone(), &png(4, 2)), AssetState::Ready(_)));
    assert_eq!(store.len(), 1);
    store.evict(&key);
    assert!(store.is_empty());
}

#[test]
fn data_uri_assets_need_no_root() {
    let mut store = AssetStore::new("/nonexistent-root");
    let key = AssetRef::from_bytes("image/png", &png(6, 3));
    assert_eq!(store.aspect_ratio(&key), 2.0);
}

#[test]
fn undecodable_logo_gets_square_aspect() {
    let mut store = AssetStore::new(".");
    let key = AssetRef::new("broken.png");
    store.insert_bytes(key.clone(), b"not a png");
    assert_eq!(store.aspect_ratio(&key), 1.0);
}

#[test]
fn prepare_counts_failures_per_reference() {
    let mut store = AssetStore::new("/nonexistent-root");
    let good = AssetRef::from_bytes("image/png", &png(2, 2));
    let mut doc = Document::with_config(&EditorConfig::default()).unwrap();
    doc.set_background(AssetRef::new("missing-bg.png"));
    doc.add_logo(good.clone(), 1.0, FilterSet::IDENTITY);
    doc.add_logo(AssetRef::new("missing-logo.png"), 1.0, FilterSet::IDENTITY);
    assert_eq!(store.prepare(&doc), 2);
    assert!(store.ready(&good).is_some());
}
