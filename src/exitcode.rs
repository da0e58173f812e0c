//! Standard exit codes (BSD sysexits.h compatible) and exit code normalization

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error (unknown command)
pub const USAGE: i32 = 64;

/// Internal software error (command failed)
pub const SOFTWARE: i32 = 70;

/// Configuration error
pub const CONFIG: i32 = 78;

/// Largest exit code a process can report.
pub const MAX: i32 = 255;

/// Convert a command's numeric status into a process exit code.
///
/// With `clamp` set (the process is about to exit), codes above 255 become 255.
/// Otherwise the value is only narrowed to `i32`.
pub fn normalize(code: i64, clamp: bool) -> i32 {
    if clamp && code > i64::from(MAX) {
        return MAX;
    }
    i32::try_from(code).unwrap_or(if code < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_large_code_when_clamping_then_caps_at_255() {
        assert_eq!(normalize(300, true), 255);
        assert_eq!(normalize(255, true), 255);
        assert_eq!(normalize(3, true), 3);
    }

    #[test]
    fn given_large_code_without_clamp_then_unchanged() {
        assert_eq!(normalize(300, false), 300);
        assert_eq!(normalize(-1, false), -1);
        assert_eq!(normalize(i64::MAX, false), i32::MAX);
    }
}
