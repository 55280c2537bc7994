use serde_json::Value;

/// Render the result envelope as pretty-printed JSON on stdout.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => eprintln!("Failed to render JSON output: {}", e),
    }
}
