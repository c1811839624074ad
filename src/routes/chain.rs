use std::path::PathBuf;

use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::routes::echo;
use crate::routes::files::FileRoutes;

/// A self-contained unit of route matching plus response generation.
///
/// The set is closed: every route this server answers is one of these
/// variants, and each is responsible for both its predicate and its
/// response.
#[derive(Clone, Debug)]
pub enum Responder {
    /// Reflects the remainder of an `/echo/...` url, gzip-compressed when
    /// the client accepts it
    Echo,
    /// Reflects the User-Agent header at `/user-agent`
    UserAgent,
    /// Serves files under the configured directory at `/files/...`
    GetFile(FileRoutes),
    /// Writes files under the configured directory at `/files/...`
    PostFile(FileRoutes),
    /// Bare 200 for the root url
    Empty,
    /// The fallback; matches everything and answers 404
    NotFound,
}

impl Responder {
    /// Whether this responder wants the request.
    pub fn matches(&self, request: &Request) -> bool {
        match self {
            Responder::Echo => echo::matches(request),
            Responder::UserAgent => request.url.eq_ignore_ascii_case("/user-agent"),
            Responder::GetFile(files) => files.get_matches(request),
            Responder::PostFile(files) => files.post_matches(request),
            Responder::Empty => request.url == "/",
            Responder::NotFound => true,
        }
    }

    /// Produces the full response. Filesystem faults surface as errors and
    /// abort the connection; they are never folded into a status code.
    pub fn respond(&self, request: &Request) -> anyhow::Result<Response> {
        match self {
            Responder::Echo => echo::respond(request),
            Responder::UserAgent => Ok(user_agent_response(request)),
            Responder::GetFile(files) => files.get_respond(request),
            Responder::PostFile(files) => files.post_respond(request),
            Responder::Empty => Ok(Response::empty(StatusCode::Ok)),
            Responder::NotFound => Ok(Response::not_found()),
        }
    }
}

fn user_agent_response(request: &Request) -> Response {
    // A missing header reflects as an empty body, not an error
    let reflected = request.header("User-Agent").unwrap_or("");

    ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("Content-Length", reflected.len().to_string())
        .body(reflected.as_bytes().to_vec())
        .build()
}

/// The ordered responder list plus the 404 fallback.
///
/// Registration order is the tie-break if two predicates ever overlap; in
/// the standard chain they are mutually exclusive.
#[derive(Clone, Debug)]
pub struct ResponderChain {
    responders: Vec<Responder>,
    fallback: Responder,
}

impl ResponderChain {
    pub fn new(responders: Vec<Responder>) -> Self {
        Self {
            responders,
            fallback: Responder::NotFound,
        }
    }

    /// The standard chain: Echo, UserAgent, GetFile, PostFile, Empty.
    pub fn standard(files_dir: Option<PathBuf>) -> Self {
        let files = FileRoutes::new(files_dir);

        Self::new(vec![
            Responder::Echo,
            Responder::UserAgent,
            Responder::GetFile(files.clone()),
            Responder::PostFile(files),
            Responder::Empty,
        ])
    }

    /// First-match dispatch.
    ///
    /// A request that never parsed (`None`) goes straight to the fallback,
    /// as does one no responder wants. Each responder is consulted at most
    /// once.
    pub fn dispatch(&self, request: Option<&Request>) -> anyhow::Result<Response> {
        let Some(request) = request else {
            return Ok(Response::not_found());
        };

        let responder = self
            .responders
            .iter()
            .find(|r| r.matches(request))
            .unwrap_or(&self.fallback);

        responder.respond(request)
    }
}

pub(crate) fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
