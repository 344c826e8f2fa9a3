use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use ipnotes_core::VERSION;

use crate::constants::env_vars;

/// ipnotes - Wallet-encrypted notes stored on IPFS
#[derive(Parser)]
#[command(name = "ipnotes")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = env_vars::CONFIG)]
    pub config: Option<String>,

    /// Path to the note reference file
    #[arg(long, global = true, env = env_vars::REFS)]
    pub refs: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Wallet JSON-RPC endpoint
    #[arg(long, value_name = "URL")]
    pub rpc_url: Option<String>,

    /// Wallet address (required when signing out-of-band)
    #[arg(long)]
    pub address: Option<String>,

    /// Pinning service endpoint
    #[arg(long, value_name = "URL")]
    pub pinning_endpoint: Option<String>,

    /// Gateway template containing {cid} (repeatable, tried in order)
    #[arg(long = "gateway", value_name = "TEMPLATE")]
    pub gateways: Vec<String>,

    /// Per-gateway timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub gateway_timeout: Option<u64>,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Note text (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Attach a local summary and tone
    #[arg(long)]
    pub enhance: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Content identifier of the note
    #[arg(value_name = "CID")]
    pub cid: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Content identifier of the note
    #[arg(value_name = "CID")]
    pub cid: String,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `refs` command
#[derive(Args)]
pub struct RefsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `enhance` command
#[derive(Args)]
pub struct EnhanceArgs {
    /// Note text (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `doctor` command
#[derive(Args)]
pub struct DoctorArgs {
    /// Also contact the wallet and the first gateway
    #[arg(long)]
    pub online: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the config file
    Init(InitArgs),

    /// Encrypt a note and store it on IPFS
    Add(AddArgs),

    /// Decrypt and list every saved note
    List(ListArgs),

    /// Decrypt a single note by CID
    Show(ShowArgs),

    /// Forget a note reference
    Delete(DeleteArgs),

    /// List saved CIDs without unlocking
    Refs(RefsArgs),

    /// Preview the summary and tone for some text
    Enhance(EnhanceArgs),

    /// Check config, reference file and connectivity
    Doctor(DoctorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_path_overrides_read_env() {
        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|name| name.to_string_lossy().into_owned())
        };
        assert_eq!(env_of("config").as_deref(), Some(env_vars::CONFIG));
        assert_eq!(env_of("refs").as_deref(), Some(env_vars::REFS));
    }

    #[test]
    fn test_parse_add_with_enhance() {
        let cli = Cli::try_parse_from(["ipnotes", "add", "--body", "hi", "--enhance"])
            .expect("parse");
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.body.as_deref(), Some("hi"));
                assert!(args.enhance);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_repeated_gateways_keep_order() {
        let cli = Cli::try_parse_from([
            "ipnotes",
            "init",
            "--gateway",
            "https://a/ipfs/{cid}",
            "--gateway",
            "https://b/ipfs/{cid}",
        ])
        .expect("parse");
        match cli.command {
            Some(Commands::Init(args)) => {
                assert_eq!(args.gateways, vec!["https://a/ipfs/{cid}", "https://b/ipfs/{cid}"]);
            }
            _ => panic!("expected init"),
        }
    }
}
