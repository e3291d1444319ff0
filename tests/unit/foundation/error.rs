use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ShotframeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ShotframeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        ShotframeError::persistence("x")
            .to_string()
            .contains("persistence error:")
    );
    assert!(
        ShotframeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        ShotframeError::export("x")
            .to_string()
            .contains("export error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ShotframeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
