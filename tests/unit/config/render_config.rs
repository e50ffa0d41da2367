use super::*;

#[test]
fn empty_json_uses_defaults() {
    let cfg = RenderConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, RenderConfig::default());
    assert_eq!(cfg.target_width, 80);
    assert_eq!(cfg.pipeline, PipelineMode::Sync);
}

#[test]
fn json_fields_round_trip_into_config() {
    let cfg = RenderConfig::from_json_str(
        r#"{
            "target_width": 40,
            "target_height": 10,
            "pixel_ratio": 1.0,
            "palette": { "glyphs": " .#" },
            "invert": true,
            "pipeline": "staged",
            "threads": 2,
            "row_dispatch": "sequential"
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.palette, PaletteChoice::Glyphs(" .#".to_string()));
    assert_eq!(cfg.pipeline, PipelineMode::Staged);
    assert_eq!(cfg.row_dispatch, RowDispatch::Sequential);
    assert_eq!(cfg.threads, Some(2));
    assert_eq!(cfg.palette().unwrap().chars().collect::<String>(), "#. ");
}

#[test]
fn unknown_fields_are_serde_errors() {
    let err = RenderConfig::from_json_str(r#"{ "width": 3 }"#).unwrap_err();
    assert!(matches!(err, GlyphError::Serde(_)));
}

#[test]
fn validation_is_eager() {
    let cfg = RenderConfig {
        palette: PaletteChoice::Glyphs(String::new()),
        ..RenderConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(GlyphError::EmptyPalette)));

    let cfg = RenderConfig {
        pixel_ratio: 0.0,
        ..RenderConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(GlyphError::InvalidDimension(_))));

    let cfg = RenderConfig {
        threads: Some(0),
        ..RenderConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(GlyphError::Validation(_))));

    let cfg = RenderConfig {
        palette: PaletteChoice::Named("nope".to_string()),
        ..RenderConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(GlyphError::Validation(_))));
}

#[test]
fn target_size_uses_configured_ratio() {
    let cfg = RenderConfig {
        target_width: 10,
        pixel_ratio: 0.5,
        ..RenderConfig::default()
    };
    let size = cfg.target_size(100, 100).unwrap();
    assert_eq!((size.width, size.height), (10, 5));
}
