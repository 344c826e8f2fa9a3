use ipnotes_core::store::{JsonFileRefStore, RefStore};

use crate::app::AppContext;
use crate::cli::RefsArgs;
use crate::output::refs_json;
use crate::ui::{header, print};

/// List stored CIDs. Needs no wallet and no network.
pub fn handle_refs(ctx: &AppContext<'_>, args: &RefsArgs) -> anyhow::Result<()> {
    let path = ctx.refs_path()?;
    let refs = JsonFileRefStore::new(&path)
        .load()
        .map_err(|e| anyhow::anyhow!("Failed to read reference file {}: {}", path.display(), e))?;
    let ui_ctx = ctx.ui_context(args.json);

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&refs_json(&refs))?);
        return Ok(());
    }

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        let context = format!("{} refs", refs.len());
        print(&ui_ctx, &header(&ui_ctx, "refs", Some(&context)));
    }
    for note_ref in &refs {
        println!("{}", note_ref.cid);
    }

    Ok(())
}
