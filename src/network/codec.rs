//! Line codec for the server link.
//!
//! Decoding never fails on content: invalid UTF-8 is replaced lossily and
//! lines longer than the limit are dropped, so a single bad line from
//! another user cannot tear down the session.

use std::io;

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

/// Longest line accepted from the server (bytes, excluding CRLF).
pub const MAX_LINE_LEN: usize = 8191;

pub struct IrcLineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    max_len: usize,
    /// Set while skipping the rest of an oversized line.
    discarding: bool,
}

impl IrcLineCodec {
    pub fn new() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    fn skip(&mut self, src: &mut BytesMut, len: usize) {
        let _ = src.split_to(len);
        self.next_index = 0;
    }
}

impl Default for IrcLineCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

impl Decoder for IrcLineCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> io::Result<Option<String>> {
        loop {
            let newline = src[self.next_index..].iter().position(|b| *b == b'\n');
            match newline {
                Some(offset) => {
                    let end = self.next_index + offset;
                    let line = src.split_to(end + 1);
                    self.next_index = 0;
                    if self.discarding {
                        self.discarding = false;
                        continue;
                    }

                    let content = trim_cr(&line[..end]);
                    if content.len() > self.max_len {
                        warn!(len = content.len(), limit = self.max_len, "Dropping oversized line");
                        continue;
                    }
                    return Ok(Some(String::from_utf8_lossy(content).into_owned()));
                }
                None if self.discarding => {
                    let len = src.len();
                    self.skip(src, len);
                    return Ok(None);
                }
                // Room for the CRLF that has not arrived yet.
                None if src.len() > self.max_len + 2 => {
                    warn!(limit = self.max_len, "Dropping oversized line");
                    self.discarding = true;
                    let len = src.len();
                    self.skip(src, len);
                    return Ok(None);
                }
                None => {
                    self.next_index = src.len();
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> io::Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if src.is_empty() || self.discarding {
            src.clear();
            self.next_index = 0;
            return Ok(None);
        }
        let len = src.len();
        let line = src.split_to(len);
        self.next_index = 0;
        Ok(Some(String::from_utf8_lossy(trim_cr(&line)).into_owned()))
    }
}

impl Encoder<String> for IrcLineCodec {
    type Error = io::Error;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> io::Result<()> {
        dst.reserve(line.len() + 2);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}
