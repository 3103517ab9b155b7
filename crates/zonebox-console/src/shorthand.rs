use std::sync::OnceLock;

use regex::Regex;
use zonebox_core::{Axis, Command};

fn height_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)height\s*(\d+(\.\d+)?)").expect("valid height pattern")
    })
}

/// Offline shorthand: "height 10", "Height 5m", "set height 2.5".
pub fn parse_height_shorthand(text: &str) -> Option<Command> {
    let captures = height_pattern().captures(text)?;
    let value: f64 = captures.get(1)?.as_str().parse().ok()?;
    Some(Command::Resize {
        axis: Axis::Y,
        value,
    })
}
