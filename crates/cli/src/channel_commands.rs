//! `run` and `send`: drive Discord accounts from the command line.

use std::sync::Arc;

use {
    anyhow::{Context, Result, bail},
    clap::Args,
    secrecy::ExposeSecret,
    serenity::http::Http,
    tracing::{info, warn},
};

use {
    switchboard_channels::{ChannelPlugin, ImageSource, MessageChain},
    switchboard_config::SwitchboardConfig,
    switchboard_discord::{DiscordAccountConfig, DiscordPlugin, DispatchOptions, send_to_session},
    switchboard_media::HttpDownloader,
};

use crate::sink::LoggingSink;

#[derive(Args)]
pub struct SendArgs {
    /// Account whose bot token is used.
    #[arg(long)]
    account: String,
    /// Target channel ID.
    #[arg(long)]
    channel: String,
    /// Text span; repeat for several spans.
    #[arg(long)]
    text: Vec<String>,
    /// Image reference (`file:///path`, `https://..`, or a platform ID); repeatable.
    #[arg(long)]
    image: Vec<String>,
    /// Skip remaining batches after the first failed send.
    #[arg(long, default_value_t = false)]
    stop_on_error: bool,
}

/// Text spans in order, then images.
fn build_chain(texts: &[String], images: &[String]) -> MessageChain {
    let chain = texts
        .iter()
        .fold(MessageChain::new(), |chain, text| chain.plain(text.as_str()));
    images
        .iter()
        .fold(chain, |chain, image| chain.image(ImageSource::parse(image)))
}

pub async fn run(config: SwitchboardConfig) -> Result<()> {
    if config.channels.discord.is_empty() {
        bail!("no discord accounts configured under [channels.discord]");
    }

    let mut plugin = DiscordPlugin::new().with_event_sink(Arc::new(LoggingSink));
    if let Some(dir) = config.media.download_dir {
        plugin = plugin.with_download_dir(dir);
    }

    for (account_id, account) in config.channels.discord {
        plugin
            .start_account(&account_id, account)
            .await
            .with_context(|| format!("starting discord account {account_id}"))?;
    }

    info!(
        accounts = plugin.account_ids().len(),
        "switchboard running, press Ctrl-C to stop"
    );
    tokio::signal::ctrl_c().await?;

    for account_id in plugin.account_ids() {
        if let Err(e) = plugin.stop_account(&account_id).await {
            warn!(account_id, error = %e, "failed to stop discord account");
        }
    }
    info!("switchboard stopped");
    Ok(())
}

pub async fn send(config: SwitchboardConfig, args: SendArgs) -> Result<()> {
    let Some(account) = config.channels.discord.get(&args.account) else {
        bail!("discord account {} is not configured", args.account);
    };
    let account: DiscordAccountConfig = serde_json::from_value(account.clone())
        .with_context(|| format!("invalid config for discord account {}", args.account))?;
    if !account.has_token() {
        bail!("discord account {} has no token", args.account);
    }

    let chain = build_chain(&args.text, &args.image);
    if chain.is_empty() {
        bail!("nothing to send, pass --text and/or --image");
    }

    let download_dir = account
        .download_dir
        .or(config.media.download_dir)
        .unwrap_or_else(HttpDownloader::default_dir);
    let downloader = HttpDownloader::new(download_dir);
    let http = Arc::new(Http::new(account.token.expose_secret()));

    let report = send_to_session(
        http,
        &downloader,
        &args.channel,
        &chain,
        DispatchOptions {
            stop_on_error: args.stop_on_error,
        },
    )
    .await?;

    info!(
        account_id = %args.account,
        channel_id = %args.channel,
        sent = report.sent_count(),
        failed = report.failed_count(),
        "send finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
