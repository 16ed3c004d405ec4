mod application;
mod domain;
mod infrastructure;
mod presentation;

use crate::infrastructure::config::LogConfig;
use crate::infrastructure::http_client::HyperHttpClient;
use crate::presentation::cli::{Cli, normalize_flag_prefixes};
use clap::Parser;
use std::process::ExitCode;
use tracing::error;

/// qurl: one-shot HTTP and GraphQL requests
///
/// `qurl http` sends a plain request to a URL. `qurl gql` POSTs a GraphQL
/// query, where the last argument may be the endpoint, a query file, or the
/// query itself. Either prints the response body, optionally preceded by the
/// status line and headers.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_flag_prefixes(std::env::args_os())) {
        Ok(cli) => cli,
        // --help and --version land here too, on stdout
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let _log_guard = LogConfig::from_debug(cli.debug).install();

    let request_service = match HyperHttpClient::new() {
        Ok(client) => client.create_request_service(),
        Err(err) => {
            error!("{:#}", anyhow::Error::from(err));
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = cli.run(&request_service, &mut std::io::stdout()).await {
        error!("{:#}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
