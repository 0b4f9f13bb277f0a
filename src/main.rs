use std::{path::PathBuf, sync::Arc};

use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use tunesmith::{config::Config, error, server};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Address to bind, overriding SERVER_ADDRESS
    #[clap(long)]
    address: Option<String>,

    /// Directory with the prebuilt front-end bundle, overriding STATIC_DIR
    #[clap(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    };

    if let Some(address) = cli.address {
        config.server_address = address;
    }
    if let Some(static_dir) = cli.static_dir {
        config.static_dir = static_dir;
    }

    let state = Arc::new(server::AppState::new(config));
    server::start_server(state).await;
}
