/// Fixed instructions for the model. Only the user's text is appended;
/// the examples never change so model behaviour stays reproducible.
///
/// The setback example has no matching command on the client side yet.
pub const INTERPRET_PREAMBLE: &str = "
You are a geometry interpreter for zoning envelopes.
Convert this text into a JSON command. Examples:
\"make it 5 meters tall\" → {\"action\":\"resize\",\"axis\":\"y\",\"value\":5}
\"set front setback to 10m\" → {\"action\":\"setback\",\"direction\":\"front\",\"value\":10}
\"change color to red\" → {\"action\":\"color\",\"value\":\"red\"}
Return JSON only.
";

pub fn render(text: &str) -> String {
    format!("{INTERPRET_PREAMBLE}Command: \"{text}\"\n")
}
