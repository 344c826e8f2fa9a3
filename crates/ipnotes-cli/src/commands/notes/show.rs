use ipnotes_core::content::validate_cid;
use ipnotes_core::crypto::PayloadCipher;

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::errors::CliError;
use crate::output::note_json;
use crate::ui::format::format_saved_at;
use crate::ui::{blank_line, divider, header, kv, print, OutputMode, Spinner};

use super::with_network_hint;

pub async fn handle_show(ctx: &AppContext<'_>, args: &ShowArgs) -> anyhow::Result<()> {
    validate_cid(&args.cid).map_err(|e| CliError::invalid_input(e.to_string()))?;

    let store = ctx.open_store()?;
    let ui_ctx = ctx.ui_context(args.json);

    let spinner = Spinner::start(&ui_ctx, "Waiting for wallet signature");
    let session = ctx.unlock(args.no_input).await?;
    let cipher = PayloadCipher::new(session.key()?);

    spinner.update("Fetching note");
    let note = store
        .open_note(&args.cid, &cipher)
        .await
        .map_err(with_network_hint)?;
    spinner.clear();

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&note_json(&note)?)?);
        return Ok(());
    }

    let pretty = ui_ctx.mode.is_pretty();
    let saved = format_saved_at(note.saved_at(), &note.timestamp, pretty);

    match ui_ctx.mode {
        OutputMode::Pretty => {
            if !ctx.quiet() {
                print(&ui_ctx, &header(&ui_ctx, "show", None));
                blank_line(&ui_ctx);
                print(&ui_ctx, &kv(&ui_ctx, "CID", &note.cid));
                print(&ui_ctx, &kv(&ui_ctx, "Saved", &saved));
                if !note.summary.is_empty() {
                    print(&ui_ctx, &kv(&ui_ctx, "Summary", &note.summary));
                }
                if !note.tone.is_empty() {
                    print(&ui_ctx, &kv(&ui_ctx, "Tone", &note.tone));
                }
                blank_line(&ui_ctx);
                print(&ui_ctx, &divider(&ui_ctx));
                blank_line(&ui_ctx);
            }
            println!("{}", note.content);
        }
        OutputMode::Plain | OutputMode::Json => {
            if !ctx.quiet() {
                println!("cid={}", note.cid);
                println!("saved={}", saved);
                if !note.summary.is_empty() {
                    println!("summary={}", note.summary);
                }
                if !note.tone.is_empty() {
                    println!("tone={}", note.tone);
                }
            }
            println!("{}", note.content);
        }
    }

    Ok(())
}
