use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ParallaxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ParallaxError::selector("x")
            .to_string()
            .contains("selector error:")
    );
    assert!(ParallaxError::host("x").to_string().contains("host error:"));
    assert!(
        ParallaxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ParallaxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
