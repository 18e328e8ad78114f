/// Print a success message with checkmark
pub fn success(msg: &str) {
    println!("  ✓ {}", msg);
}

/// Print an error message with X (diagnostics go to stderr)
pub fn error(msg: &str) {
    eprintln!("  ✗ {}", msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("  ⚠ {}", msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg);
}
