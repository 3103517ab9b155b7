use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Case-insensitive: "Y" and "y" both name the vertical axis.
    pub fn parse(raw: &str) -> Option<Axis> {
        match raw.to_lowercase().as_str() {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }
}

/// A structured instruction decoded from model output.
///
/// The wire shape matches what the interpret prompt teaches the model:
/// `{"action":"resize","axis":"y","value":5}` or
/// `{"action":"color","value":"red"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Command {
    Resize {
        axis: Axis,
        /// Meters; one box unit per meter
        value: f64,
    },
    Color {
        /// Any CSS color the renderer understands, e.g. "red" or "#ff0000"
        value: String,
    },
}

/// Decode an untrusted JSON payload into a [`Command`].
///
/// Total over every JSON value: anything that is not exactly one of the two
/// accepted shapes yields `None`. The "setback" shape the prompt mentions is
/// not accepted.
pub fn parse_command(payload: &Value) -> Option<Command> {
    let fields = payload.as_object()?;
    let action = fields.get("action")?.as_str()?;

    match action {
        "resize" => parse_resize(fields),
        "color" => parse_color(fields),
        _ => None,
    }
}

/// Predicate form of [`parse_command`].
pub fn is_valid_command(payload: &Value) -> bool {
    parse_command(payload).is_some()
}

/// JSON Schema describing the accepted command shapes.
pub fn command_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(Command)).unwrap_or(Value::Null)
}

fn parse_resize(fields: &Map<String, Value>) -> Option<Command> {
    let axis = Axis::parse(fields.get("axis")?.as_str()?)?;
    let value = finite_number(fields.get("value")?)?;
    Some(Command::Resize { axis, value })
}

fn parse_color(fields: &Map<String, Value>) -> Option<Command> {
    let value = fields.get("value")?.as_str()?;
    if value.is_empty() {
        return None;
    }
    Some(Command::Color {
        value: value.to_string(),
    })
}

fn finite_number(value: &Value) -> Option<f64> {
    // Strings like "5" are rejected: only JSON numbers count.
    if !value.is_number() {
        return None;
    }
    value.as_f64().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rejects_non_objects() {
        for payload in [
            json!(null),
            json!(true),
            json!(5),
            json!("resize"),
            json!(["resize", "y", 5]),
        ] {
            assert!(!is_valid_command(&payload), "{payload}");
        }
    }

    #[test]
    fn rejects_missing_or_non_string_action() {
        assert!(!is_valid_command(&json!({})));
        assert!(!is_valid_command(&json!({"axis": "y", "value": 5})));
        assert!(!is_valid_command(&json!({"action": 1, "value": "red"})));
        assert!(!is_valid_command(&json!({"action": null, "value": "red"})));
    }

    #[test]
    fn resize_accepts_any_case_axis() {
        assert_eq!(
            parse_command(&json!({"action": "resize", "axis": "Y", "value": 5})),
            Some(Command::Resize {
                axis: Axis::Y,
                value: 5.0
            })
        );
        assert!(is_valid_command(&json!({"action": "resize", "axis": "x", "value": 2.5})));
        assert!(is_valid_command(&json!({"action": "resize", "axis": "Z", "value": -1})));
    }

    #[test]
    fn resize_rejects_unknown_axis() {
        assert!(!is_valid_command(&json!({"action": "resize", "axis": "w", "value": 5})));
        assert!(!is_valid_command(&json!({"action": "resize", "axis": "xy", "value": 5})));
        assert!(!is_valid_command(&json!({"action": "resize", "value": 5})));
        assert!(!is_valid_command(&json!({"action": "resize", "axis": 1, "value": 5})));
    }

    #[test]
    fn resize_requires_finite_number() {
        assert!(!is_valid_command(&json!({"action": "resize", "axis": "y", "value": "5"})));
        assert!(!is_valid_command(&json!({"action": "resize", "axis": "y"})));
        // serde_json has no NaN; it serializes to null
        assert!(!is_valid_command(&json!({"action": "resize", "axis": "y", "value": f64::NAN})));
        assert!(!is_valid_command(
            &json!({"action": "resize", "axis": "y", "value": f64::INFINITY})
        ));
    }

    #[test]
    fn color_requires_non_empty_string() {
        assert_eq!(
            parse_command(&json!({"action": "color", "value": "red"})),
            Some(Command::Color {
                value: "red".to_string()
            })
        );
        assert!(!is_valid_command(&json!({"action": "color", "value": ""})));
        assert!(!is_valid_command(&json!({"action": "color", "value": 7})));
        assert!(!is_valid_command(&json!({"action": "color"})));
    }

    #[test]
    fn setback_is_never_accepted() {
        assert!(!is_valid_command(
            &json!({"action": "setback", "direction": "front", "value": 10})
        ));
    }

    #[test]
    fn action_match_is_case_sensitive() {
        assert!(!is_valid_command(&json!({"action": "Resize", "axis": "y", "value": 5})));
        assert!(!is_valid_command(&json!({"action": "COLOR", "value": "red"})));
    }

    #[test]
    fn extra_fields_are_ignored() {
        assert!(is_valid_command(
            &json!({"action": "color", "value": "blue", "note": "from model"})
        ));
    }

    #[test]
    fn serializes_to_wire_shape() {
        let command = Command::Resize {
            axis: Axis::Y,
            value: 5.0,
        };
        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            json!({"action": "resize", "axis": "y", "value": 5.0})
        );
    }

    #[test]
    fn schema_names_both_actions() {
        let schema = command_schema().to_string();
        assert!(schema.contains("resize"));
        assert!(schema.contains("color"));
        assert!(!schema.contains("setback"));
    }
}
