use std::path::PathBuf;

use ipnotes_core::content::GatewayTemplate;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_refs_path, write_config, NotesConfig};
use crate::constants::env_vars;
use crate::errors::CliError;
use crate::ui::{hint, print, receipt};

fn validate_address(address: &str) -> anyhow::Result<String> {
    let trimmed = address.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or("");
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CliError::invalid_input(format!(
            "Invalid wallet address: {}\nHint: Addresses are 0x followed by 40 hex digits",
            address
        ))
        .into());
    }
    Ok(trimmed.to_string())
}

pub fn handle_init(ctx: &AppContext<'_>, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path(ctx.cli())?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Pass --force to overwrite it",
            config_path.display()
        ))
        .into());
    }

    for gateway in &args.gateways {
        GatewayTemplate::parse(gateway).map_err(|e| CliError::invalid_input(e.to_string()))?;
    }
    if args.gateway_timeout == Some(0) {
        return Err(CliError::invalid_input("--gateway-timeout must be at least 1 second").into());
    }
    let address = args.address.as_deref().map(validate_address).transpose()?;

    let refs_path = match ctx.cli().refs.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(path) => PathBuf::from(path),
        None => default_refs_path()?,
    };

    let config = NotesConfig::new(
        refs_path.clone(),
        args.rpc_url.clone(),
        address,
        args.pinning_endpoint.clone(),
        args.gateways.clone(),
        args.gateway_timeout,
    );
    write_config(&config_path, &config)?;
    tracing::debug!(path = %config_path.display(), "wrote config");

    if ctx.quiet() {
        return Ok(());
    }

    let ui_ctx = ctx.ui_context(false);
    let config_display = config_path.display().to_string();
    let refs_display = refs_path.display().to_string();
    let gateway_count = config.gateways.urls.len().to_string();
    print(
        &ui_ctx,
        &receipt(
            &ui_ctx,
            "Config written",
            &[
                ("Config", config_display.as_str()),
                ("Refs", refs_display.as_str()),
                ("Wallet", config.wallet.rpc_url.as_str()),
                ("Gateways", gateway_count.as_str()),
            ],
        ),
    );
    if ui_ctx.mode.is_pretty() {
        print(
            &ui_ctx,
            &hint(
                &ui_ctx,
                &format!("Set {} to enable uploads", env_vars::PINNING_JWT),
            ),
        );
    }

    Ok(())
}
