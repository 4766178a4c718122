use super::*;

#[test]
fn defaults_match_the_documented_contract() {
    let opts = ParallaxOptions::new(".story");
    assert_eq!(opts.container_selector, ".story");
    assert_eq!(opts.max_offset, 40.0);
    assert_eq!(opts.opacity_offset, 25.0);
    assert_eq!(opts.padding, 50.0);
    assert_eq!(opts.animation_space(), 80.0);
    assert_eq!(opts.total_padding(), 100.0);
    opts.validate().unwrap();
}

#[test]
fn json_uses_camel_case_and_fills_defaults() {
    let opts =
        ParallaxOptions::from_json_str(r#"{ "containerSelector": ".s", "maxOffset": 60 }"#)
            .unwrap();
    assert_eq!(opts.container_selector, ".s");
    assert_eq!(opts.max_offset, 60.0);
    assert_eq!(opts.opacity_offset, 25.0);
    assert_eq!(opts.padding, 50.0);

    let back = serde_json::to_value(&opts).unwrap();
    assert!(back.get("opacityOffset").is_some());
    assert!(back.get("opacity_offset").is_none());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ParallaxOptions::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, ParallaxError::Serde(_)));
}

#[test]
fn missing_selector_is_rejected() {
    let err = ParallaxOptions::default().validate().unwrap_err();
    assert!(matches!(err, ParallaxError::Selector(_)));

    let err = ParallaxOptions::new("   ").validate().unwrap_err();
    assert!(matches!(err, ParallaxError::Selector(_)));
}

#[test]
fn fade_window_must_be_non_empty() {
    let err = ParallaxOptions::new(".s")
        .with_opacity_offset(40.0)
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("opacityOffset must be < maxOffset"));

    assert!(
        ParallaxOptions::new(".s")
            .with_max_offset(0.0)
            .validate()
            .is_err()
    );
    assert!(
        ParallaxOptions::new(".s")
            .with_padding(-1.0)
            .validate()
            .is_err()
    );
    assert!(
        ParallaxOptions::new(".s")
            .with_max_offset(f64::INFINITY)
            .validate()
            .is_err()
    );
}
