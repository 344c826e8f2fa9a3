use ipnotes_core::NoteView;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::output::note_view_json;
use crate::ui::format::{format_saved_at, preview, short_cid};
use crate::ui::{badge, header, hint, print, simple_table, Badge, OutputMode, Spinner};

pub async fn handle_list(ctx: &AppContext<'_>, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let ui_ctx = ctx.ui_context(args.json);

    if store.refs().is_empty() {
        if ui_ctx.mode.is_json() {
            println!("[]");
        } else if !ctx.quiet() {
            print(&ui_ctx, "No notes yet.");
            print(&ui_ctx, &hint(&ui_ctx, "ipnotes add --body \"...\""));
        }
        return Ok(());
    }

    let spinner = Spinner::start(&ui_ctx, "Waiting for wallet signature");
    let session = ctx.unlock(args.no_input).await?;
    let key = session.key()?;

    spinner.update(&format!("Decrypting {} notes", store.refs().len()));
    let views = store.list_decrypted(key).await;
    spinner.clear();

    if ui_ctx.mode.is_json() {
        let values = views
            .iter()
            .map(note_view_json)
            .collect::<serde_json::Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    let failed = views.iter().filter(|v| v.is_error()).count();
    let pretty = ui_ctx.mode.is_pretty();
    let rows: Vec<Vec<String>> = views
        .iter()
        .map(|view| match view {
            NoteView::Decrypted(note) => vec![
                if pretty {
                    short_cid(&note.cid)
                } else {
                    note.cid.clone()
                },
                format_saved_at(note.saved_at(), &note.timestamp, pretty),
                if note.tone.is_empty() {
                    "-".to_string()
                } else {
                    note.tone.clone()
                },
                if pretty {
                    preview(&note.content, 60)
                } else {
                    note.content.replace('\n', " ")
                },
            ],
            NoteView::Failed { cid, .. } => vec![
                if pretty { short_cid(cid) } else { cid.clone() },
                "-".to_string(),
                "-".to_string(),
                view.content().to_string(),
            ],
        })
        .collect();

    let columns = ["CID", "Saved", "Tone", "Note"];

    match ui_ctx.mode {
        OutputMode::Pretty => {
            if !ctx.quiet() {
                let context = format!("{} notes", views.len());
                print(&ui_ctx, &header(&ui_ctx, "list", Some(&context)));
                println!();
            }
            println!("{}", simple_table(&ui_ctx, &columns, &rows));
            if failed > 0 && !ctx.quiet() {
                println!();
                print(
                    &ui_ctx,
                    &badge(
                        &ui_ctx,
                        Badge::Warn,
                        &format!("{} of {} notes could not be decrypted", failed, views.len()),
                    ),
                );
            }
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("{}", simple_table(&ui_ctx, &columns, &rows));
        }
    }

    Ok(())
}
