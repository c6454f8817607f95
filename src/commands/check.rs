//! Check command handler - build the index and report its shape

use crate::cli::CheckArgs;
use crate::commands::{render_structured, CommandContext};
use crate::error::Result;
use crate::index::SymbolIndex;

/// Number of keys listing more than one entry
fn shared_keys(index: &SymbolIndex) -> usize {
    index
        .all_keys()
        .filter(|key| index.get(key).map_or(false, |entries| entries.len() > 1))
        .count()
}

/// Run the check command
///
/// Any build error (duplicate key, malformed record, syntax error) is
/// returned as-is so the binary exits with its code.
pub fn run_check(args: &CheckArgs, ctx: &CommandContext) -> Result<String> {
    let paths = ctx.data_paths(&args.source)?;
    let index = ctx.open_index(&args.source)?;
    let shared = shared_keys(&index);

    let path_names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    let json_value = serde_json::json!({
        "_type": "check",
        "status": "ok",
        "paths": path_names,
        "keys": index.len(),
        "entries": index.entry_count(),
        "shared_keys": shared,
    });

    if let Some(output) = render_structured(ctx.format, &json_value) {
        return Ok(output);
    }

    let mut output = String::new();
    output.push_str("status: ok\n");
    output.push_str(&format!("keys: {}\n", index.len()));
    output.push_str(&format!("entries: {}\n", index.entry_count()));
    output.push_str(&format!("shared_keys: {}\n", shared));
    if ctx.verbose {
        for path in &path_names {
            output.push_str(&format!("  source: {}\n", path));
        }
    }

    Ok(output)
}
