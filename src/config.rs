//! Environment-driven defaults
//!
//! Values are read once per process. Command line flags take precedence.

use std::sync::OnceLock;

/// Default initial work-stack capacity
pub const DEFAULT_STACK_CAPACITY: usize = 1024;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_u8(name: &str) -> Option<u8> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
}

static STACK_CAPACITY: OnceLock<usize> = OnceLock::new();

/// Initial work-stack capacity (`UNBLACK_STACK_CAPACITY`)
pub fn stack_capacity() -> usize {
    *STACK_CAPACITY
        .get_or_init(|| parse_env_usize("UNBLACK_STACK_CAPACITY", DEFAULT_STACK_CAPACITY))
}

static THRESHOLD: OnceLock<Option<u8>> = OnceLock::new();

/// Fixed binarization threshold for raster input (`UNBLACK_THRESHOLD`)
///
/// `None` selects Otsu's method.
pub fn threshold_override() -> Option<u8> {
    *THRESHOLD.get_or_init(|| parse_env_u8("UNBLACK_THRESHOLD"))
}
