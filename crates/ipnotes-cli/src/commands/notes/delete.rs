use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::helpers::confirm;
use crate::ui::{badge, hint, print, receipt, Badge};

/// Forget a note reference. The ciphertext stays pinned remotely.
pub fn handle_delete(ctx: &AppContext<'_>, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let ui_ctx = ctx.ui_context(false);

    if !store.refs().iter().any(|r| r.cid == args.cid) {
        if !ctx.quiet() {
            print(
                &ui_ctx,
                &badge(
                    &ui_ctx,
                    Badge::Info,
                    &format!("No reference to {}; nothing changed", args.cid),
                ),
            );
        }
        return Ok(());
    }

    if !args.yes {
        if !ui_ctx.is_interactive() {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation\nHint: Pass --yes to delete non-interactively",
            )
            .into());
        }
        let prompt = format!(
            "Forget note {}? It cannot be listed again without its CID",
            args.cid
        );
        if !confirm(&prompt)? {
            print(&ui_ctx, "Cancelled.");
            return Ok(());
        }
    }

    store.remove(&args.cid)?;

    if !ctx.quiet() {
        print(&ui_ctx, &receipt(&ui_ctx, "Note forgotten", &[("CID", args.cid.as_str())]));
        if ui_ctx.mode.is_pretty() {
            print(
                &ui_ctx,
                &hint(&ui_ctx, "The encrypted payload remains pinned on IPFS"),
            );
        }
    }

    Ok(())
}
