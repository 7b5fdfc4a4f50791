use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PlaymatError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PlaymatError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        PlaymatError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        PlaymatError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        PlaymatError::MissingBackground
            .to_string()
            .contains("background")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PlaymatError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
