//! `check-config`: validate Discord account tables without connecting.

use anyhow::{Result, bail};

use {switchboard_config::SwitchboardConfig, switchboard_discord::DiscordAccountConfig};

/// Outcome for one configured account.
#[derive(Debug, PartialEq, Eq)]
enum AccountCheck {
    Ok {
        ignore_bots: bool,
        resolve_replies: bool,
    },
    MissingToken,
    Invalid(String),
}

fn check_accounts(config: &SwitchboardConfig) -> Vec<(String, AccountCheck)> {
    let mut checks: Vec<(String, AccountCheck)> = config
        .channels
        .discord
        .iter()
        .map(|(account_id, value)| {
            let check = match serde_json::from_value::<DiscordAccountConfig>(value.clone()) {
                Ok(account) if !account.has_token() => AccountCheck::MissingToken,
                Ok(account) => AccountCheck::Ok {
                    ignore_bots: account.ignore_bots,
                    resolve_replies: account.resolve_replies,
                },
                Err(e) => AccountCheck::Invalid(e.to_string()),
            };
            (account_id.clone(), check)
        })
        .collect();
    checks.sort_by(|a, b| a.0.cmp(&b.0));
    checks
}

pub fn check_config(config: &SwitchboardConfig) -> Result<()> {
    let checks = check_accounts(config);
    if checks.is_empty() {
        println!("No Discord accounts configured.");
        return Ok(());
    }

    let mut problems = 0;
    for (account_id, check) in &checks {
        match check {
            AccountCheck::Ok {
                ignore_bots,
                resolve_replies,
            } => println!(
                "  {account_id}: token set, ignore_bots={ignore_bots}, resolve_replies={resolve_replies}"
            ),
            AccountCheck::MissingToken => {
                problems += 1;
                println!("  {account_id}: token missing");
            },
            AccountCheck::Invalid(reason) => {
                problems += 1;
                println!("  {account_id}: invalid ({reason})");
            },
        }
    }
    if let Some(dir) = &config.media.download_dir {
        println!("Media download dir: {}", dir.display());
    }

    if problems > 0 {
        bail!("{problems} discord account(s) misconfigured");
    }
    Ok(())
}
