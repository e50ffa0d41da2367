use super::*;

#[test]
fn every_set_starts_with_blank() {
    for name in charset_names() {
        let set = builtin(name).unwrap();
        assert_eq!(set.chars().next(), Some(' '), "{name}");
        assert!(set.chars().count() >= 2, "{name}");
    }
}

#[test]
fn lookup_by_name() {
    assert_eq!(builtin("default"), Some(" .:oO8@#"));
    assert_eq!(builtin("nope"), None);
    assert_eq!(charset_names()[0], "default");
}

#[test]
fn sci_ramp_has_seventy_glyphs() {
    assert_eq!(builtin("sci").unwrap().chars().count(), 70);
}
