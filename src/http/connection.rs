use bytes::{Buf, BytesMut};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::http::parser::{parse_http_request, ParseError};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::routes::ResponderChain;

/// Upper bound on buffered request bytes; beyond this the request is
/// treated as unparseable.
const MAX_REQUEST_BYTES: usize = 64 * 1024;

/// How long the whole read-and-parse phase may take before it fails closed
/// as a parse failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    chain: ResponderChain,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    /// None when the bytes never formed a request; the dispatcher turns
    /// that into the 404 fallback
    Processing(Option<Request>),
    Writing(ResponseWriter),
    Closed,
}

enum ReadOutcome {
    Request(Request),
    Malformed,
    Disconnected,
}

impl Connection {
    pub fn new(stream: TcpStream, chain: ResponderChain) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            chain,
            state: ConnectionState::Reading,
        }
    }

    /// Serves exactly one request: read, parse, dispatch, write, close.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    match self.read_request().await? {
                        ReadOutcome::Request(req) => {
                            self.state = ConnectionState::Processing(Some(req));
                        }
                        ReadOutcome::Malformed => {
                            self.state = ConnectionState::Processing(None);
                        }
                        ReadOutcome::Disconnected => {
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Processing(req) => {
                    let response = self.chain.dispatch(req.as_ref())?;

                    tracing::debug!(
                        status = response.status.as_u16(),
                        "Response selected"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        match timeout(REQUEST_TIMEOUT, self.fill_and_parse()).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!("Request read timed out, failing closed");
                Ok(ReadOutcome::Malformed)
            }
        }
    }

    async fn fill_and_parse(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    tracing::debug!(
                        method = request.method.as_str(),
                        url = %request.url,
                        "Parsed request"
                    );
                    self.buffer.advance(consumed);
                    return Ok(ReadOutcome::Request(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    tracing::warn!("HTTP parse error: {:?}", e);
                    return Ok(ReadOutcome::Malformed);
                }
            }

            if self.buffer.len() >= MAX_REQUEST_BYTES {
                tracing::warn!(
                    buffered = self.buffer.len(),
                    "Request exceeds size cap, failing closed"
                );
                return Ok(ReadOutcome::Malformed);
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                // Client closed; bytes without a complete request in them
                // still get the fallback response
                return if self.buffer.is_empty() {
                    Ok(ReadOutcome::Disconnected)
                } else {
                    Ok(ReadOutcome::Malformed)
                };
            }
        }
    }
}
