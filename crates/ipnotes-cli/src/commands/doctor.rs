use ipnotes_core::store::{JsonFileRefStore, RefStore};

use crate::app::{missing_config_message, AppContext};
use crate::cli::DoctorArgs;
use crate::constants::env_vars;
use crate::ui::{badge, header, hint, kv, Badge, OutputMode, UiContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckStatus {
    Ok,
    Warn,
    Err,
}

impl CheckStatus {
    fn label(self) -> &'static str {
        match self {
            CheckStatus::Ok => "ok",
            CheckStatus::Warn => "warn",
            CheckStatus::Err => "err",
        }
    }

    fn badge(self) -> Badge {
        match self {
            CheckStatus::Ok => Badge::Ok,
            CheckStatus::Warn => Badge::Warn,
            CheckStatus::Err => Badge::Err,
        }
    }
}

struct Check {
    name: &'static str,
    status: CheckStatus,
    detail: String,
}

impl Check {
    fn new(name: &'static str, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            name,
            status,
            detail: detail.into(),
        }
    }
}

fn render_check(ctx: &UiContext, check: &Check) {
    match ctx.mode {
        OutputMode::Pretty => {
            println!(
                "{}",
                badge(ctx, check.status.badge(), &format!("{:<10} {}", check.name, check.detail))
            );
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("check={} {}", check.name, check.status.label());
        }
    }
}

/// Check config, reference file, gateways, pinning token and wallet mode.
///
/// Only errors fail the command; a missing config or pinning token warns.
pub async fn handle_doctor(ctx: &AppContext<'_>, args: &DoctorArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let mut checks = Vec::new();

    let loaded = match ctx.config() {
        Ok(loaded) => loaded,
        Err(err) => {
            checks.push(Check::new("config", CheckStatus::Err, err.to_string()));
            return finish(ctx, &ui_ctx, &checks);
        }
    };
    if loaded.from_file {
        checks.push(Check::new(
            "config",
            CheckStatus::Ok,
            loaded.path.display().to_string(),
        ));
    } else {
        if ui_ctx.mode.is_pretty() && !ctx.quiet() {
            eprintln!("{}\n", missing_config_message(&loaded.path));
        }
        checks.push(Check::new(
            "config",
            CheckStatus::Warn,
            format!("{} not found; using defaults", loaded.path.display()),
        ));
    }

    match ctx.refs_path() {
        Ok(path) => match JsonFileRefStore::new(&path).load() {
            Ok(refs) => checks.push(Check::new(
                "refs",
                CheckStatus::Ok,
                format!("{} notes in {}", refs.len(), path.display()),
            )),
            Err(err) => checks.push(Check::new(
                "refs",
                CheckStatus::Err,
                format!("{}: {}", path.display(), err),
            )),
        },
        Err(err) => checks.push(Check::new("refs", CheckStatus::Err, err.to_string())),
    }

    let gateways = &loaded.config.gateways;
    match gateways.templates() {
        Ok(templates) => checks.push(Check::new(
            "gateways",
            CheckStatus::Ok,
            format!(
                "{} configured, {}s timeout",
                templates.len(),
                gateways.timeout().as_secs()
            ),
        )),
        Err(err) => checks.push(Check::new("gateways", CheckStatus::Err, err.to_string())),
    }

    if ctx.pinning_token().is_some() {
        checks.push(Check::new(
            "pinning",
            CheckStatus::Ok,
            loaded.config.pinning.endpoint.clone(),
        ));
    } else {
        checks.push(Check::new(
            "pinning",
            CheckStatus::Warn,
            format!("{} not set; uploads disabled", env_vars::PINNING_JWT),
        ));
    }

    match ctx.wallet() {
        Ok(wallet) => {
            let mode = if std::env::var(env_vars::SIGNATURE).is_ok_and(|v| !v.trim().is_empty()) {
                "presigned".to_string()
            } else {
                format!("json-rpc {}", loaded.config.wallet.rpc_url)
            };
            if args.online {
                match wallet.accounts().await {
                    Ok(accounts) if accounts.is_empty() => checks.push(Check::new(
                        "wallet",
                        CheckStatus::Warn,
                        format!("{}: no accounts exposed", mode),
                    )),
                    Ok(accounts) => checks.push(Check::new(
                        "wallet",
                        CheckStatus::Ok,
                        format!("{}: {}", mode, accounts[0]),
                    )),
                    Err(err) => checks.push(Check::new(
                        "wallet",
                        CheckStatus::Err,
                        format!("{}: {}", mode, err),
                    )),
                }
            } else {
                checks.push(Check::new("wallet", CheckStatus::Ok, mode));
            }
        }
        Err(err) => checks.push(Check::new("wallet", CheckStatus::Err, err.to_string())),
    }

    finish(ctx, &ui_ctx, &checks)
}

fn finish(ctx: &AppContext<'_>, ui_ctx: &UiContext, checks: &[Check]) -> anyhow::Result<()> {
    let failed = checks.iter().find(|c| c.status == CheckStatus::Err);

    if failed.is_none() && ctx.quiet() {
        return Ok(());
    }

    match ui_ctx.mode {
        OutputMode::Pretty => {
            println!("{}", header(ui_ctx, "doctor", None));
            println!();
            for check in checks {
                render_check(ui_ctx, check);
            }
            println!();
            match failed {
                Some(check) => {
                    println!("{}", badge(ui_ctx, Badge::Err, "Doctor failed"));
                    println!("  {}", kv(ui_ctx, "Error", &check.detail));
                }
                None => {
                    println!("{}", badge(ui_ctx, Badge::Ok, "ipnotes is ready"));
                    if checks.iter().any(|c| c.status == CheckStatus::Warn) {
                        println!("{}", hint(ui_ctx, "Warnings do not block reading notes"));
                    }
                }
            }
        }
        OutputMode::Plain | OutputMode::Json => {
            for check in checks {
                render_check(ui_ctx, check);
            }
            match failed {
                Some(check) => {
                    println!("error={}", check.detail);
                    println!("status=failed");
                }
                None => println!("status=ok"),
            }
        }
    }

    match failed {
        Some(check) => Err(anyhow::anyhow!("Doctor failed: {} check", check.name)),
        None => Ok(()),
    }
}
