use ipnotes_core::enhance::{Enhancer, HeuristicEnhancer};

use crate::app::AppContext;
use crate::cli::EnhanceArgs;
use crate::helpers::read_note_body;
use crate::ui::{header, kv, print, OutputMode};

/// Preview the summary and tone `add --enhance` would attach. Offline.
pub fn handle_enhance(ctx: &AppContext<'_>, args: &EnhanceArgs) -> anyhow::Result<()> {
    let body = read_note_body(args.no_input, args.body.clone())?;
    let enhancement = HeuristicEnhancer::new().enhance(&body)?;
    let ui_ctx = ctx.ui_context(args.json);

    match ui_ctx.mode {
        OutputMode::Json => {
            let value = serde_json::json!({
                "summary": enhancement.summary,
                "tone": enhancement.tone,
                "stored_summary": enhancement.display_summary(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputMode::Pretty => {
            if !ctx.quiet() {
                print(&ui_ctx, &header(&ui_ctx, "enhance", None));
                println!();
            }
            print(&ui_ctx, &kv(&ui_ctx, "Summary", &enhancement.summary));
            print(&ui_ctx, &kv(&ui_ctx, "Tone", &enhancement.tone));
        }
        OutputMode::Plain => {
            println!("summary={}", enhancement.summary);
            println!("tone={}", enhancement.tone);
        }
    }

    Ok(())
}
