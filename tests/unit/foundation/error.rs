use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GlyphError::invalid_dimension("x")
            .to_string()
            .contains("invalid dimension:")
    );
    assert!(
        GlyphError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        GlyphError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        GlyphError::SinkWrite(std::io::Error::other("x"))
            .to_string()
            .contains("sink write error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlyphError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn config_errors_are_classified() {
    assert!(GlyphError::EmptyPalette.is_config_error());
    assert!(GlyphError::EmptySequence.is_config_error());
    assert!(GlyphError::invalid_dimension("w").is_config_error());
    assert!(!GlyphError::SinkWrite(std::io::Error::other("x")).is_config_error());
}

#[test]
fn broken_pipe_is_permanent_but_other_io_is_not() {
    let closed = GlyphError::SinkWrite(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
    assert!(closed.is_permanent_sink_failure());

    let flaky = GlyphError::SinkWrite(std::io::Error::from(std::io::ErrorKind::Interrupted));
    assert!(!flaky.is_permanent_sink_failure());

    assert!(!GlyphError::EmptyPalette.is_permanent_sink_failure());
}
