// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::future::Future;
use std::time::Duration;

use clap::Parser;
use cli::Cli;
use sji_api_client::{CancellationToken, SjiClient};
use sji_core::config::ClientConfig;
use tracing::{debug, warn};

mod cli;
mod commands;
mod logging;

/// How long a cancelled command gets to wind down after Ctrl-C.
const INTERRUPT_GRACE: Duration = Duration::from_secs(2);

/// Conventional exit status for SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    if let Err(e) = run().await {
        debug!(error = ?e, "command failed");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(session_file) = &args.session_file {
        config.session_file = session_file.clone();
    }
    debug!(base_url = %config.base_url, session_file = %config.session_file.display(), "configuration");

    // Ctrl-C abandons the in-flight request; the process still exits after
    // a second Ctrl-C or the grace period.
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if watch_interrupts(on_interrupt, tokio::signal::ctrl_c, INTERRUPT_GRACE).await {
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    });

    let client = SjiClient::new(&config)?.scoped(cancel);
    commands::execute(&client, args.command).await
}

/// Cancel `token` on the first signal, then wait for a second signal or
/// `grace`. Returns `true` when the process should exit, `false` if signals
/// could not be watched.
async fn watch_interrupts<S, F>(token: CancellationToken, mut signal: S, grace: Duration) -> bool
where
    S: FnMut() -> F,
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal().await {
        warn!("cannot listen for Ctrl-C: {e}");
        return false;
    }
    debug!("interrupt received, cancelling");
    token.cancel();
    let _ = tokio::time::timeout(grace, signal()).await;
    true
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test]
    async fn first_interrupt_cancels_then_exits_after_grace() {
        let token = CancellationToken::new();
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let signal = move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok::<(), std::io::Error>(())
            } else {
                std::future::pending().await
            }
        };

        let exit = watch_interrupts(token.clone(), signal, Duration::from_millis(20)).await;
        assert!(exit);
        assert!(token.is_cancelled());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn second_interrupt_exits_immediately() {
        let token = CancellationToken::new();
        let exit = watch_interrupts(
            token.clone(),
            || async { Ok::<(), std::io::Error>(()) },
            Duration::from_secs(3600),
        )
        .await;
        assert!(exit);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn unavailable_signal_never_exits() {
        let token = CancellationToken::new();
        let exit = watch_interrupts(
            token.clone(),
            || async { Err::<(), _>(std::io::Error::other("no signal handler")) },
            Duration::from_millis(1),
        )
        .await;
        assert!(!exit);
        assert!(!token.is_cancelled());
    }
}
