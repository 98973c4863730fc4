//! wecom-notify - send a WeChat Work message from the command line.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your application settings:
//!
//! ```yaml
//! wechat:
//!   corp_id: "ww0123456789abcdef"
//!   agent_id: 1000002
//!   corp_secret: "application-secret"
//! ```
//!
//! Override any value using environment variables with the `WECOM_` prefix:
//!
//! ```bash
//! export WECOM_WECHAT__CORP_SECRET="application-secret"
//! ```
//!
//! # Usage
//!
//! ```bash
//! wecom-notify --config config.yaml --to ZhangSan --to LiSi text "backup finished"
//! wecom-notify --config config.yaml --to ZhangSan markdown "**deploy** done"
//! wecom-notify --config config.yaml --to ZhangSan image ./chart.png
//! wecom-notify --config config.yaml --to ZhangSan file ./report.pdf
//! ```
//!
//! The process exits with `0` when WeChat Work accepted the message and `1`
//! otherwise.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};

use wecom_notify::config::Config;
use wecom_notify::wechat::{AppCredentials, WechatRequester, WechatWork};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: String,

    /// Account of a user receiving the message, repeat for several users.
    #[arg(short, long = "to", required = true)]
    to: Vec<String>,

    #[command(subcommand)]
    message: Message,
}

/// Message to send.
#[derive(Subcommand, Debug)]
enum Message {
    /// Send a text message
    Text { content: String },
    /// Send a markdown message
    Markdown { content: String },
    /// Upload and send an image
    Image { path: PathBuf },
    /// Upload and send a file
    File { path: PathBuf },
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let config = Config::load(&args.config).context("failed to load config file")?;

    let credentials = AppCredentials::from(&config.wechat);
    let client = WechatWork::new(credentials, WechatRequester::new(&config.wechat.url));

    let sent = match &args.message {
        Message::Text { content } => client.send_text(content, &args.to).await?,
        Message::Markdown { content } => client.send_markdown(content, &args.to).await?,
        Message::Image { path } => client.send_image(path, &args.to).await?,
        Message::File { path } => client.send_file(path, &args.to).await?,
    };

    Ok(sent)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    let args = Args::parse();

    match run(args).await {
        Ok(true) => {
            info!("message delivered");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            error!("message refused by WeChat Work");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
