//! Terminal output helpers.
//!
//! Dashboard payloads go to stdout as JSON so they can be piped into
//! other tools; status notes and empty-state messages go to stderr.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a dimmed status note ("Logging in...", "No vehicles found.").
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a dashboard payload as JSON, pretty-printed on request.
pub fn json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    println!("{}", render(value, pretty)?);
    Ok(())
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Reading {
        sensor: &'static str,
        value: f64,
    }

    #[test]
    fn render_is_compact_by_default() {
        let json = render(
            &Reading {
                sensor: "temperature",
                value: 97.5,
            },
            false,
        )
        .unwrap();
        assert_eq!(json, r#"{"sensor":"temperature","value":97.5}"#);
    }

    #[test]
    fn render_pretty_spans_multiple_lines() {
        let json = render(
            &Reading {
                sensor: "voltage",
                value: 12.6,
            },
            true,
        )
        .unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"sensor\": \"voltage\""));
    }
}
