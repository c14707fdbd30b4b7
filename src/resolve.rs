//! Frame-sequence path resolution
//!
//! Resolves a templated grid file path to the concrete on-disk filename for
//! a given frame. A sequence template carries a zero-padded frame number
//! before the `.vdb` extension (`shot01.0001.vdb`); resolution swaps that
//! numeric suffix for the requested frame. Resolution is a pure function of
//! its inputs and performs no I/O.

use regex::Regex;

/// File extension recognized by the sequence pattern
pub const VDB_EXTENSION: &str = "vdb";

/// Resolve a sequence template to the path for `frame`.
///
/// When `sequence` is false, or the template does not end in a
/// `.<padding digits>.vdb` suffix, the template is returned unchanged; a
/// non-numbered path is not an error. Otherwise the trailing bytes of the
/// template are replaced by the zero-padded frame suffix. The replaced run
/// has the same length as the new suffix, so a frame whose decimal
/// rendering outgrows `padding` eats into the preceding characters.
pub fn resolve_frame_path(template: &str, sequence: bool, frame: i32, padding: u8) -> String {
    if !sequence {
        return template.to_string();
    }

    if !matches_sequence_pattern(template, padding) {
        return template.to_string();
    }

    let suffix = format!("{}.{}", zero_padded(frame, padding), VDB_EXTENSION);
    let mut keep = template.len().saturating_sub(suffix.len());
    // The cut can land inside a multibyte character in the prefix; back up
    // to the previous boundary instead of panicking.
    while keep > 0 && !template.is_char_boundary(keep) {
        keep -= 1;
    }

    let mut resolved = String::with_capacity(keep + suffix.len());
    resolved.push_str(&template[..keep]);
    resolved.push_str(&suffix);
    resolved
}

/// Test whether `path` matches the sequence pattern for `padding`:
/// any prefix, a dot, exactly `padding` digits, a dot, the `vdb` extension.
pub fn matches_sequence_pattern(path: &str, padding: u8) -> bool {
    // `(?s)` so the wildcard prefix spans every byte, matching what a shell
    // glob would accept.
    let pattern = format!(r"(?s)^.*\.[0-9]{{{}}}\.{}$", padding, VDB_EXTENSION);
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(path),
        Err(_) => false,
    }
}

/// Render `frame` as a decimal string left-padded with zeros to `padding`
/// characters. The sign occupies a pad slot; a rendering wider than
/// `padding` is kept in full.
pub fn zero_padded(frame: i32, padding: u8) -> String {
    format!("{:0width$}", frame, width = padding as usize)
}
