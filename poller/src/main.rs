//! ratepoll Entry Point

use clap::Parser;
use ratepoll::cli::Cli;
use ratepoll::health::Poller;
use ratepoll::liveness::LivenessListener;
use ratepoll::shutdown::{install_signal_handler, ShutdownController};
use ratepoll::{logging, PollerConfig};
use tracing::info;

#[tokio::main]
async fn main() {
    // Parse CLI (only -h/--help and -V/--version)
    let _cli = Cli::parse();

    logging::init().expect("failed to initialize logging");

    let config = PollerConfig::from_env().expect("invalid poller configuration");
    info!("{}", config.target_url);

    let shutdown = ShutdownController::default();
    // ガードは main の終了までシグナル監視を保持する
    let _signals = install_signal_handler(shutdown.clone());

    // ライブネスリスナーは join しない（プロセス終了とともに破棄）
    LivenessListener::default().spawn(shutdown.clone());

    let poller = Poller::new(&config).expect("failed to create HTTP client");
    poller.run(&shutdown).await;
}
