//! Built-in character sets, each ordered from empty to solid.

const SETS: &[(&str, &str)] = &[
    ("default", " .:oO8@#"),
    ("alt", " .-=+*%#@"),
    ("box", " ·╶─┼╋█"),
    ("shade", " ░▒▓█"),
    (
        "sci",
        " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$",
    ),
];

/// Glyphs of the built-in set called `name`.
pub fn builtin(name: &str) -> Option<&'static str> {
    SETS.iter().find(|(n, _)| *n == name).map(|(_, s)| *s)
}

/// Names of all built-in character sets, in a stable order.
pub fn charset_names() -> Vec<&'static str> {
    SETS.iter().map(|(n, _)| *n).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/palette/charsets.rs"]
mod tests;
