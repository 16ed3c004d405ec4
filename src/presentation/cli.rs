use crate::application::builders::request_builder::RequestBuilder;
use crate::application::resolver::{ArgumentResolver, GqlArgs, RestArgs};
use crate::application::services::HttpRequestService;
use crate::infrastructure::output::{OutputMode, render_response};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::io::Write;

/// CLI configuration for qurl
#[derive(Parser, Debug)]
#[command(name = "qurl", version)]
#[command(about = "qurl: one-shot HTTP and GraphQL requests from the terminal", long_about = None)]
pub struct Cli {
    /// Enable verbose diagnostic logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// POST a GraphQL query
    Gql(GqlCommand),
    /// Send a plain HTTP request
    Http(HttpCommand),
}

#[derive(Args, Debug)]
pub struct GqlCommand {
    /// The last one is the endpoint URL, a query file, or an inline query
    pub args: Vec<String>,

    /// Inline query text
    #[arg(long, default_value = "")]
    pub query: String,

    /// Path to a file containing the query
    #[arg(long, default_value = "")]
    pub file: String,

    /// Endpoint URL, used when the last argument is not a URL
    #[arg(long, env = "ENDPOINT", default_value = "")]
    pub endpoint: String,

    /// GraphQL variables as a JSON object
    #[arg(long)]
    pub variables: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct HttpCommand {
    /// The last one is the request URL
    #[arg(required = true)]
    pub args: Vec<String>,

    #[arg(short, long, default_value = "GET")]
    pub method: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Bearer token for the Authorization header
    #[arg(long, default_value = "")]
    pub token: String,

    /// Extra request header, 'Key: Value'
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Print status line, headers and body untouched
    #[arg(long)]
    pub raw: bool,

    /// Print status line and headers before the body
    #[arg(long = "headers")]
    pub show_headers: bool,
}

impl CommonArgs {
    fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.raw, self.show_headers)
    }
}

impl Cli {
    pub async fn run<W: Write>(&self, request_service: &HttpRequestService, out: &mut W) -> Result<()> {
        let (descriptor, mode) = match &self.command {
            Command::Gql(cmd) => {
                let args = GqlArgs {
                    positionals: cmd.args.clone(),
                    query: cmd.query.clone(),
                    file: cmd.file.clone(),
                    endpoint: cmd.endpoint.clone(),
                    token: cmd.common.token.clone(),
                    variables: cmd.variables.clone(),
                    headers: cmd.common.headers.clone(),
                };
                (ArgumentResolver::resolve_graphql(&args)?, cmd.common.output_mode())
            }
            Command::Http(cmd) => {
                let args = RestArgs {
                    positionals: cmd.args.clone(),
                    method: cmd.method.clone(),
                    token: cmd.common.token.clone(),
                    headers: cmd.common.headers.clone(),
                };
                (ArgumentResolver::resolve_rest(&args)?, cmd.common.output_mode())
            }
        };

        let request = RequestBuilder::from_descriptor(&descriptor)?;
        let response = request_service.send_request(request).await?;

        render_response(out, &response, mode).context("Failed to write response")?;
        Ok(())
    }
}

const LONG_FLAGS: &[&str] = &[
    "debug", "query", "file", "endpoint", "variables", "token", "header", "headers", "raw",
    "method", "help", "version",
];

/// Rewrites Go-style single-dash long flags (`-query=x`) to `--query=x`
///
/// Everything after a bare `--` is passed through untouched.
pub fn normalize_flag_prefixes<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut after_separator = false;
    args.into_iter()
        .map(|arg| {
            if after_separator {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                after_separator = true;
                return arg;
            }
            let Some(rest) = text.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}
