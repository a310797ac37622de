//! Name/dimension sanitization.
//!
//! Downstream stores use `:` and `=` as separators, so neither may appear in a
//! metric name, a dimension key, or a dimension value. Each occurrence maps to
//! exactly one `-`; runs are not collapsed, which keeps the output the same
//! length as the input and makes the function idempotent.

/// Characters that must never reach a stored name or dimension.
pub const RESERVED: [char; 2] = [':', '='];

/// Replacement for every reserved character.
pub const REPLACEMENT: &str = "-";

/// Replace every `:` and `=` in `s` with `-`.
pub fn sanitize(s: &str) -> String {
    s.replace(RESERVED, REPLACEMENT)
}
