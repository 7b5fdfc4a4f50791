use super::*;

#[test]
fn normalize_rel_path_collapses_dots() {
    assert_eq!(normalize_rel_path("a/./b/../c.png").unwrap(), "a/c.png");
    assert_eq!(normalize_rel_path("logos\\red.png").unwrap(), "logos/red.png");
    assert!(normalize_rel_path("../secret.png").is_err());
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path(".").is_err());
}

#[test]
fn data_uri_round_trips_bytes() {
    let r = AssetRef::from_bytes("image/png", &[1, 2, 3, 250]);
    assert!(r.is_data_uri());
    assert!(r.as_str().starts_with("data:image/png;base64,"));
    assert_eq!(read_source(&r, Path::new(".")).unwrap(), vec![1, 2, 3, 250]);
}

#[test]
fn plain_data_uri_is_taken_verbatim() {
    assert_eq!(decode_data_uri("data:,hello").unwrap(), b"hello".to_vec());
    assert!(decode_data_uri("data:image/png;base64").is_err());
    assert!(decode_data_uri("data:image/png;base64,@@@").is_err());
}

#[test]
fn svg_detection_uses_media_type_or_extension() {
    assert!(AssetRef::new("logos/skull.SVG").looks_like_svg());
    assert!(AssetRef::from_bytes("image/svg+xml", b"<svg/>").looks_like_svg());
    assert!(!AssetRef::new("bg.png").looks_like_svg());
}

#[test]
fn display_truncates_data_uris() {
    let r = AssetRef::from_bytes("image/png", &[0u8; 4096]);
    let shown = r.to_string();
    assert!(shown.len() < 80);
    assert!(shown.contains("bytes"));
    assert_eq!(AssetRef::new("bg.png").to_string(), "bg.png");
}

#[test]
fn read_source_reports_missing_files() {
    let err = read_source(&AssetRef::new("nope/missing.png"), Path::new("/nonexistent-root"))
        .unwrap_err();
    assert!(err.to_string().contains("missing.png"));
}
