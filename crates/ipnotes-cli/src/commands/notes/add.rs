use ipnotes_core::enhance::{Enhancer, HeuristicEnhancer};

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::constants::env_vars;
use crate::errors::CliError;
use crate::helpers::read_note_body;
use crate::ui::{hint, print, receipt, Spinner};

use super::with_network_hint;

pub async fn handle_add(ctx: &AppContext<'_>, args: &AddArgs) -> anyhow::Result<()> {
    let body = read_note_body(args.no_input, args.body.clone())?;

    let mut store = ctx.open_store()?;
    if !store.content_store().can_upload() {
        return Err(CliError::invalid_input(format!(
            "No pinning token configured; cannot upload\nHint: Set {} to your pinning service JWT",
            env_vars::PINNING_JWT
        ))
        .into());
    }

    let enhancement = if args.enhance {
        Some(HeuristicEnhancer::new().enhance(&body)?)
    } else {
        None
    };

    let ui_ctx = ctx.ui_context(false);

    let spinner = Spinner::start(&ui_ctx, "Waiting for wallet signature");
    let session = ctx.unlock(args.no_input).await?;
    let key = session.key()?;

    spinner.update("Encrypting and uploading");
    let cid = store
        .save_note(key, &body, enhancement.as_ref())
        .await
        .map_err(with_network_hint)?;
    spinner.clear();

    if ctx.quiet() {
        return Ok(());
    }

    let mut items: Vec<(&str, &str)> = vec![("CID", cid.as_str())];
    if let Some(enhancement) = &enhancement {
        items.push(("Summary", enhancement.summary.as_str()));
        items.push(("Tone", enhancement.tone.as_str()));
    }
    print(&ui_ctx, &receipt(&ui_ctx, "Note saved", &items));
    if ui_ctx.mode.is_pretty() {
        print(&ui_ctx, &hint(&ui_ctx, &format!("ipnotes show {}", cid)));
    }

    Ok(())
}
