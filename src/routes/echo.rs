//! Echo responder
//!
//! Reflects whatever follows `/echo/` back to the client, compressed with
//! gzip when the request's Accept-Encoding lists it.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::routes::chain::starts_with_ignore_case;

const PREFIX: &str = "/echo/";
const SUPPORTED_ENCODING: &str = "gzip";

pub fn matches(request: &Request) -> bool {
    starts_with_ignore_case(&request.url, PREFIX)
}

pub fn respond(request: &Request) -> anyhow::Result<Response> {
    let reflected = &request.url[PREFIX.len()..];

    if request.accepts_encoding(SUPPORTED_ENCODING) {
        let compressed = compress(reflected.as_bytes())?;

        Ok(ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "text/plain")
            .header("Content-Encoding", SUPPORTED_ENCODING)
            .header("Content-Length", compressed.len().to_string())
            .body(compressed)
            .build())
    } else {
        Ok(ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "text/plain")
            .header("Content-Length", reflected.len().to_string())
            .body(reflected.as_bytes().to_vec())
            .build())
    }
}

fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
