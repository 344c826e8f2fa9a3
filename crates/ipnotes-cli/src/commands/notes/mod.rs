pub mod add;
pub mod delete;
pub mod list;
pub mod refs;
pub mod show;

pub use add::handle_add;
pub use delete::handle_delete;
pub use list::handle_list;
pub use refs::handle_refs;
pub use show::handle_show;

use ipnotes_core::NotesError;

use crate::errors::CliError;

/// Attach a user-facing hint to upload and gateway failures.
pub(crate) fn with_network_hint(err: NotesError) -> anyhow::Error {
    match err {
        NotesError::UploadFailed { status, body } => CliError::network(
            format!("Upload failed ({}): {}", status, body),
            "Check IPNOTES_PINNING_JWT and the [pinning] endpoint",
        )
        .into(),
        NotesError::AllGatewaysFailed { cid, attempts } => CliError::network(
            format!("Could not fetch {} from any of {} gateways", cid, attempts),
            "Check your connection or add gateways with `ipnotes init --gateway <url> --force`",
        )
        .into(),
        NotesError::Http { source } => CliError::network(
            format!("Network error: {}", source),
            "Check your connection and try again",
        )
        .into(),
        other => other.into(),
    }
}
