//! Output helpers shared by CLI commands.
//!
//! Global flags (`--json`, `--quiet`, `--verbose`, `--no-color`) are
//! propagated through `FALEPROXY_*` environment variables so every
//! module can check them without threading state around.

/// Whether `--json` was passed.
pub fn is_json() -> bool {
    std::env::var("FALEPROXY_JSON").is_ok()
}

/// Whether `--quiet` was passed.
pub fn is_quiet() -> bool {
    std::env::var("FALEPROXY_QUIET").is_ok()
}

/// Whether `--verbose` was passed.
pub fn is_verbose() -> bool {
    std::env::var("FALEPROXY_VERBOSE").is_ok()
}

/// Print a machine-readable JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(_) => println!("{value}"),
    }
}

/// Styled status symbols, honoring `--no-color` and `NO_COLOR`.
pub struct Styled {
    color: bool,
}

impl Styled {
    pub fn new() -> Self {
        let color = std::env::var("FALEPROXY_NO_COLOR").is_err()
            && std::env::var("NO_COLOR").is_err();
        Self { color }
    }

    pub fn ok_sym(&self) -> &'static str {
        if self.color {
            "\x1b[32m✓\x1b[0m"
        } else {
            "✓"
        }
    }

    pub fn warn_sym(&self) -> &'static str {
        if self.color {
            "\x1b[33m!\x1b[0m"
        } else {
            "!"
        }
    }

    pub fn err_sym(&self) -> &'static str {
        if self.color {
            "\x1b[31m✗\x1b[0m"
        } else {
            "✗"
        }
    }
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}
