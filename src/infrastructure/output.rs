use crate::domain::entities::Response;
use colored::Colorize;
use std::io::{self, Write};

/// How much of the response to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Body bytes only
    Body,
    /// Status line and headers, highlighted, then the body
    Headers,
    /// Status line, headers and body, untouched
    Raw,
}

impl OutputMode {
    pub fn from_flags(raw: bool, headers: bool) -> Self {
        match (raw, headers) {
            (true, _) => OutputMode::Raw,
            (false, true) => OutputMode::Headers,
            (false, false) => OutputMode::Body,
        }
    }
}

/// Writes a fully read response to `out`
pub fn render_response<W: Write>(out: &mut W, response: &Response, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Body => {}
        OutputMode::Raw => {
            writeln!(out, "{}", status_line(response))?;
            for (name, value) in header_lines(response) {
                writeln!(out, "{}: {}", name, value)?;
            }
            writeln!(out)?;
        }
        OutputMode::Headers => {
            writeln!(out, "{}", status_line(response).cyan().bold())?;
            for (name, value) in header_lines(response) {
                writeln!(out, "{}: {}", name.green(), value)?;
            }
            writeln!(out)?;
        }
    }

    out.write_all(&response.body)?;
    out.flush()
}

fn status_line(response: &Response) -> String {
    let status = response.status;
    match status.canonical_reason() {
        Some(reason) => format!("{:?} {} {}", response.version, status.as_str(), reason),
        None => format!("{:?} {}", response.version, status.as_str()),
    }
}

/// One line per header name, repeated values joined with ", "
fn header_lines(response: &Response) -> Vec<(&str, String)> {
    response
        .headers
        .keys()
        .map(|name| {
            let values: Vec<String> = response
                .headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect();
            (name.as_str(), values.join(", "))
        })
        .collect()
}
