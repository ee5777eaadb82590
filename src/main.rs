#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use std::process::ExitCode;
use telegram_sender::app;
use telegram_sender::config::Config;
use telegram_sender::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    let outcome = app::run(&config, tokio::io::stdin())
        .await
        .and_then(|result| app::write_result(&result, &mut std::io::stdout().lock()).map(|()| result));
    if let Err(e) = &outcome {
        tracing::error!(error = %e, "Send aborted");
    }

    telemetry_guard.shutdown();
    Ok(ExitCode::from(app::exit_status(&outcome?)))
}
