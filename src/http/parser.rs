use crate::http::request::{Method, Request};
use std::collections::HashMap;

#[derive(Debug)]
pub enum ParseError {
    /// More bytes are needed before a full request is in the buffer
    Incomplete,
    /// Input is not valid UTF-8
    InvalidEncoding,
    /// Line 0 does not match the request-line grammar
    MalformedRequestLine,
}

/// Parses one HTTP request out of `buf`.
///
/// `Incomplete` asks the caller to read more bytes and retry; the other
/// errors mean no request can be constructed from this input. On success the
/// returned count is the number of bytes consumed (header section, blank
/// line, and Content-Length worth of body).
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {

    // Look for header/body separator
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;

    let head = std::str::from_utf8(&buf[..headers_end])
        .map_err(|_| ParseError::InvalidEncoding)?;

    let mut lines = head.split("\r\n");

    // Request line
    let request_line = lines.next().unwrap_or("");
    let (method, url, protocol) =
        parse_request_line(request_line).ok_or(ParseError::MalformedRequestLine)?;

    // Header loop: stops at the first line that does not fit the header
    // shape; that line and everything after it belongs to the body.
    let mut headers = HashMap::new();
    let mut trailing: Vec<&str> = Vec::new();

    for line in lines {
        if trailing.is_empty() {
            if let Some((name, value)) = parse_header_line(line) {
                // First occurrence wins on duplicate names
                headers
                    .entry(name.to_ascii_lowercase())
                    .or_insert_with(|| value.to_string());
                continue;
            }
        }
        trailing.push(line);
    }

    // Body framing: Content-Length more bytes past the blank line. A missing
    // or unparseable value counts as zero; no cross-check against what the
    // client actually sent.
    let content_length = headers
        .get("content-length")
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = headers_end + 4;
    let total = body_start + content_length;

    if buf.len() < total {
        return Err(ParseError::Incomplete);
    }

    let body_text = std::str::from_utf8(&buf[body_start..total])
        .map_err(|_| ParseError::InvalidEncoding)?;

    let body = if trailing.is_empty() {
        body_text.trim().to_string()
    } else {
        let mut joined = trailing.join("\r\n");
        joined.push_str("\r\n");
        joined.push_str(body_text);
        joined.trim().to_string()
    };

    let request = Request {
        method,
        url,
        protocol,
        headers,
        body,
    };

    Ok((request, total))
}

/// `<verb> <url> <protocol>`: verb is GET or POST (any case), the protocol
/// is the trailing `HTTP/<dotted-version>` run, the url is everything in
/// between (it may itself contain spaces).
fn parse_request_line(line: &str) -> Option<(Method, String, String)> {
    let first_ws = line.find(char::is_whitespace)?;
    let method = Method::from_token(&line[..first_ws])?;
    let rest = line[first_ws..].trim_start();

    let upper = rest.to_ascii_uppercase();
    let p = upper.rfind("HTTP/")?;

    let version = &rest[p + 5..];
    if version.is_empty() || !version.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }

    let url = rest[..p].trim_end().to_string();
    let protocol = rest[p..].to_string();

    Some((method, url, protocol))
}

/// A header line is split at the first ':' that is immediately followed by
/// whitespace; the name needs at least one non-space character. Anything
/// else (a blank line included) ends the header block.
fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let mut search_from = 0;

    loop {
        let colon = line[search_from..].find(':')? + search_from;
        let after = &line[colon + 1..];

        if after.starts_with(|c: char| c.is_whitespace()) {
            let name = &line[..colon];
            if name.trim().is_empty() {
                return None;
            }
            return Some((name, after.trim_start()));
        }

        search_from = colon + 1;
    }
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}
