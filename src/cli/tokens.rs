//! Render the token stream of a rule for inspection.

use super::CliError;
use crate::Rule;

/// Produce a listing of the tokens a rule compiles to, one per line, or
/// as a JSON array when `json` is set.
pub fn token_listing(rule: &str, json: bool) -> Result<String, CliError> {
    let compiled = Rule::parse(rule)?;

    if json {
        let tokens: Vec<serde_json::Value> = compiled
            .tokens()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "kind": t.kind.to_string(),
                    "start": t.start,
                    "end": t.end,
                    "text": t.lexeme(compiled.text()),
                })
            })
            .collect();
        let mut out = serde_json::to_string_pretty(&tokens)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    for t in compiled.tokens() {
        out.push_str(&format!(
            "{:>4}..{:<4} {:<6} {}\n",
            t.start,
            t.end,
            t.kind.to_string(),
            t.lexeme(compiled.text())
        ));
    }
    Ok(out)
}
