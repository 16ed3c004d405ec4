use crate::domain::entities::{CommandKind, GraphQlQuery, Method, QuerySource, RequestDescriptor};
use crate::domain::errors::QurlError;
use crate::domain::value_objects::{Url, Variables};
use hyper::header::{HeaderName, HeaderValue};
use std::fs::File;
use std::path::PathBuf;
use tracing::debug;

/// Raw `gql` input as it came off the command line
#[derive(Debug, Clone, Default)]
pub struct GqlArgs {
    pub positionals: Vec<String>,
    pub query: String,
    pub file: String,
    pub endpoint: String,
    pub token: String,
    pub variables: Option<String>,
    pub headers: Vec<String>,
}

/// Raw `http` input as it came off the command line
#[derive(Debug, Clone, Default)]
pub struct RestArgs {
    pub positionals: Vec<String>,
    pub method: String,
    pub token: String,
    pub headers: Vec<String>,
}

/// Turns raw CLI input into a [`RequestDescriptor`]
///
/// The GraphQL surface is ambiguous: the last positional argument (the pivot)
/// may be the endpoint, a query file, or the query itself. All of that
/// disambiguation happens here and nowhere else.
pub struct ArgumentResolver;

impl ArgumentResolver {
    pub fn resolve_graphql(args: &GqlArgs) -> Result<RequestDescriptor, QurlError> {
        debug!(
            query = %args.query,
            file = %args.file,
            endpoint = %args.endpoint,
            variables = ?args.variables,
            headers = ?args.headers,
            token_set = !args.token.is_empty(),
            "gql flags"
        );
        debug!(positionals = ?args.positionals, "gql arguments");

        let (endpoint, source) = match args.positionals.last() {
            Some(pivot) if Url::is_absolute(pivot) => {
                debug!(pivot = %pivot, "last argument is the endpoint");
                (Url::new(pivot)?, Self::flag_source(args)?)
            }
            Some(pivot) => {
                let endpoint = Self::endpoint_flag(args)?;
                if !args.query.is_empty() || !args.file.is_empty() {
                    return Err(QurlError::ConflictingQuerySource(format!(
                        "last argument '{}' supplies the query, so --query and --file must be empty",
                        pivot
                    )));
                }
                (endpoint, Self::pivot_source(pivot)?)
            }
            None => (Self::endpoint_flag(args)?, Self::flag_source(args)?),
        };
        debug!(endpoint = %endpoint, source = ?source, "resolved query source");

        let variables = args.variables.as_deref().map(Variables::parse).transpose()?;

        Ok(RequestDescriptor {
            kind: CommandKind::GraphQl,
            method: Method::Post,
            endpoint,
            headers: Self::parse_headers(&args.headers)?,
            token: non_empty(&args.token),
            query: Some(GraphQlQuery {
                query: source.read()?,
                variables,
            }),
        })
    }

    pub fn resolve_rest(args: &RestArgs) -> Result<RequestDescriptor, QurlError> {
        debug!(
            method = %args.method,
            headers = ?args.headers,
            token_set = !args.token.is_empty(),
            "http flags"
        );
        debug!(positionals = ?args.positionals, "http arguments");

        let url = args.positionals.last().map(String::as_str).unwrap_or_default();

        Ok(RequestDescriptor {
            kind: CommandKind::Rest,
            method: args.method.parse()?,
            endpoint: Url::new(url)?,
            headers: Self::parse_headers(&args.headers)?,
            token: non_empty(&args.token),
            query: None,
        })
    }

    /// Query source from the --query / --file flags; exactly one must be set
    fn flag_source(args: &GqlArgs) -> Result<QuerySource, QurlError> {
        match (args.query.is_empty(), args.file.is_empty()) {
            (true, true) => Err(QurlError::MissingQuerySource),
            (false, false) => Err(QurlError::ConflictingQuerySource(
                "--query and --file are mutually exclusive".to_string(),
            )),
            (false, true) => Ok(QuerySource::Inline(args.query.clone())),
            (true, false) => Ok(QuerySource::File(PathBuf::from(&args.file))),
        }
    }

    /// Query source from a pivot that is not a URL: a readable file, else inline text
    fn pivot_source(pivot: &str) -> Result<QuerySource, QurlError> {
        if is_readable_file(pivot) {
            Ok(QuerySource::File(PathBuf::from(pivot)))
        } else if !pivot.is_empty() {
            Ok(QuerySource::Inline(pivot.to_string()))
        } else {
            Err(QurlError::InvalidQuerySource(pivot.to_string()))
        }
    }

    fn endpoint_flag(args: &GqlArgs) -> Result<Url, QurlError> {
        Url::new(&args.endpoint).map_err(|_| QurlError::MissingEndpoint(args.endpoint.clone()))
    }

    /// Parses `Name: Value` lines, keeping the supplied order and casing
    pub fn parse_headers(raw_headers: &[String]) -> Result<Vec<(String, String)>, QurlError> {
        raw_headers.iter().map(|raw| Self::parse_header(raw)).collect()
    }

    fn parse_header(raw: &str) -> Result<(String, String), QurlError> {
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| QurlError::invalid_header(raw, "use 'Key: Value'"))?;
        let (name, value) = (name.trim(), value.trim());

        HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| QurlError::invalid_header(raw, e))?;
        HeaderValue::from_str(value).map_err(|e| QurlError::invalid_header(raw, e))?;

        Ok((name.to_string(), value.to_string()))
    }
}

fn non_empty(token: &str) -> Option<String> {
    (!token.is_empty()).then(|| token.to_string())
}

/// Only regular files are opened; a FIFO with no writer would block
fn is_readable_file(path: &str) -> bool {
    let is_file = std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    is_file && File::open(path).is_ok()
}
