//! Dual text/JSON rendering (spec §6: stable top-level keys in JSON mode).

use flowctl_core::types::OutputFormat;
use serde::Serialize;

/// Prints `value` as pretty JSON, or runs `human` for text mode.
pub fn emit<T: Serialize>(format: OutputFormat, value: &T, human: impl FnOnce(&T)) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value).expect("result types always serialize"));
        }
        OutputFormat::Text => human(value),
    }
}
