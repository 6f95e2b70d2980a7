//! RESP client for a Redis-compatible backend.
//!
//! Speaks just enough of the protocol for GET and SET: commands go out as
//! arrays of bulk strings, replies come back as a simple string, an error,
//! or a bulk string (nil included).

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;

use crate::store::{Result, Store, StoreError};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default buffer size for reply reads
const BUFFER_SIZE: usize = 8192;

/// Store backend speaking RESP over a single TCP connection.
///
/// The connection is established once at startup and shared by every
/// request task; the mutex serializes command/reply round trips. There is
/// no reconnect logic - a broken connection surfaces as a store error.
#[derive(Clone)]
pub struct RedisStore {
    conn: Arc<Mutex<TcpStream>>,
}

#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Simple(String),
    Error(String),
    Bulk(Option<String>),
}

impl RedisStore {
    /// Connects to the backend named by a `redis://host[:port]` URL.
    pub async fn connect(store_url: &str) -> anyhow::Result<Self> {
        let url = url::Url::parse(store_url).context("Invalid store URL")?;

        let host = url.host_str().context("Store URL missing host")?;
        let port = url.port().unwrap_or(6379);

        let addr = format!("{}:{}", host, port);
        let stream = timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr))
            .await
            .context("Store connection timeout")?
            .context("Failed to connect to store")?;

        tracing::info!("Connected to store at {}", addr);

        Ok(Self {
            conn: Arc::new(Mutex::new(stream)),
        })
    }

    async fn request(&self, parts: &[&str]) -> Result<Reply> {
        let mut conn = self.conn.lock().await;

        let frame = encode_command(parts);
        conn.write_all(&frame).await?;
        conn.flush().await?;

        read_reply(&mut conn).await
    }
}

impl Store for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.request(&["GET", key]).await? {
            Reply::Bulk(value) => Ok(value),
            Reply::Error(message) => Err(StoreError::Rejected(message)),
            other => Err(StoreError::Protocol(format!(
                "unexpected reply to GET: {:?}",
                other
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        match self.request(&["SET", key, value]).await? {
            Reply::Simple(_) => Ok(()),
            Reply::Error(message) => Err(StoreError::Rejected(message)),
            other => Err(StoreError::Protocol(format!(
                "unexpected reply to SET: {:?}",
                other
            ))),
        }
    }
}

fn encode_command(parts: &[&str]) -> Vec<u8> {
    let mut frame = Vec::new();

    frame.extend_from_slice(format!("*{}\r\n", parts.len()).as_bytes());
    for part in parts {
        frame.extend_from_slice(format!("${}\r\n", part.len()).as_bytes());
        frame.extend_from_slice(part.as_bytes());
        frame.extend_from_slice(b"\r\n");
    }

    frame
}

async fn read_reply(stream: &mut TcpStream) -> Result<Reply> {
    let mut buffer = BytesMut::with_capacity(BUFFER_SIZE);

    loop {
        if let Some((reply, _consumed)) = parse_reply(&buffer)? {
            return Ok(reply);
        }

        let n = stream.read_buf(&mut buffer).await?;
        if n == 0 {
            return Err(StoreError::Protocol(
                "connection closed mid-reply".to_string(),
            ));
        }
    }
}

/// Parses one reply from the front of `buf`.
///
/// Returns `None` while the buffer holds only a prefix of the reply.
fn parse_reply(buf: &[u8]) -> Result<Option<(Reply, usize)>> {
    let Some(line_end) = find_line_end(buf) else {
        return Ok(None);
    };

    if line_end == 0 {
        return Err(StoreError::Protocol("empty reply line".to_string()));
    }

    let line = std::str::from_utf8(&buf[1..line_end])
        .map_err(|_| StoreError::Protocol("reply is not valid UTF-8".to_string()))?;

    match buf[0] {
        b'+' => Ok(Some((Reply::Simple(line.to_string()), line_end + 2))),

        b'-' => Ok(Some((Reply::Error(line.to_string()), line_end + 2))),

        b'$' => {
            let len: i64 = line
                .parse()
                .map_err(|_| StoreError::Protocol(format!("bad bulk length {line:?}")))?;

            // $-1 is the nil reply
            if len < 0 {
                return Ok(Some((Reply::Bulk(None), line_end + 2)));
            }

            let len = len as usize;
            let data_start = line_end + 2;
            if buf.len() < data_start + len + 2 {
                return Ok(None);
            }

            let data = std::str::from_utf8(&buf[data_start..data_start + len])
                .map_err(|_| StoreError::Protocol("bulk reply is not valid UTF-8".to_string()))?;

            Ok(Some((Reply::Bulk(Some(data.to_string())), data_start + len + 2)))
        }

        other => Err(StoreError::Protocol(format!(
            "unknown reply prefix {:?}",
            other as char
        ))),
    }
}

fn find_line_end(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}
