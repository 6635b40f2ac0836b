//! Stderr diagnostics. Reports go to stdout; anything here is advisory.

/// Print a warning line to stderr.
pub fn warn(msg: impl AsRef<str>) {
    eprintln!("WARN: {}", msg.as_ref());
}
