use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::gateway::gate::{self, GatePolicy};
use crate::gateway::respond;
use crate::gateway::{self, Outcome};
use crate::http::parser::{ParseError, parse_request_head};
use crate::http::request::RequestHead;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::store::Store;

pub struct Connection<S: Store> {
    stream: TcpStream,
    buffer: Vec<u8>,
    state: ConnectionState,
    store: S,
    policy: GatePolicy,
}

pub enum ConnectionState {
    ReadingHead,
    ReadingBody(RequestHead),
    Processing(RequestHead, Vec<u8>),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S: Store> Connection<S> {
    pub fn new(stream: TcpStream, store: S, policy: GatePolicy) -> Self {
        Self {
            stream,
            buffer: Vec::with_capacity(4096),
            state: ConnectionState::ReadingHead,
            store,
            policy,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::ReadingHead => {
                    match self.read_head().await? {
                        Some(head) => {
                            self.state = match gate::check(&head, &self.policy) {
                                Ok(()) => ConnectionState::ReadingBody(head),

                                // Rejected before the body was read; the unread
                                // payload would poison the next request on this
                                // connection, so close after responding.
                                Err(outcome) => writing(outcome, false),
                            };
                        }
                        None => {
                            // Client closed; state stays Closed
                        }
                    }
                }

                ConnectionState::ReadingBody(head) => {
                    match self.read_body(head.content_length()).await {
                        Ok(Some(body)) => {
                            self.state = ConnectionState::Processing(head, body);
                        }
                        Ok(None) => {
                            // Client went away mid-body; nothing is dispatched
                        }
                        Err(e) => {
                            let outcome = Outcome::Failure {
                                message: format!("body read error: {e}"),
                            };
                            self.state = writing(outcome, false);
                        }
                    }
                }

                ConnectionState::Processing(head, body) => {
                    let outcome = gateway::execute(&self.store, &body).await;
                    self.state = writing(outcome, head.keep_alive());
                }

                ConnectionState::Writing(mut writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if keep_alive {
                        self.state = ConnectionState::ReadingHead; // go back for next request
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_head(&mut self) -> anyhow::Result<Option<RequestHead>> {
        loop {
            // Try parsing whatever we already have
            match parse_request_head(&self.buffer) {
                Ok((head, consumed)) => {
                    // Remove consumed bytes; any body bytes stay buffered
                    self.buffer.drain(..consumed);
                    return Ok(Some(head));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    // Malformed request → protocol error
                    return Err(anyhow::anyhow!("HTTP parse error: {:?}", e));
                }
            }

            let mut temp = [0u8; 1024];
            let n = self.stream.read(&mut temp).await?;

            if n == 0 {
                // Client closed connection
                return Ok(None);
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }

    /// Accumulates the request payload until `content_length` bytes are
    /// buffered, preserving byte order.
    ///
    /// `Ok(None)` means the client disconnected before the body completed;
    /// the request is abandoned without touching the store.
    async fn read_body(&mut self, content_length: usize) -> std::io::Result<Option<Vec<u8>>> {
        while self.buffer.len() < content_length {
            let mut temp = [0u8; 1024];
            let n = self.stream.read(&mut temp).await?;

            if n == 0 {
                return Ok(None);
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }

        Ok(Some(self.buffer.drain(..content_length).collect()))
    }
}

fn writing(outcome: Outcome, keep_alive: bool) -> ConnectionState {
    let response: Response = respond::into_response(outcome);
    ConnectionState::Writing(ResponseWriter::new(&response), keep_alive)
}
