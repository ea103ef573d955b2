//! Scripted transport for exercising the engine without hardware.

use std::collections::VecDeque;

use super::{Transport, TransportError};

/// What the module does in response to one transmission attempt.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Bytes(Vec<u8>),
    Silence,
    Fail,
}

impl Reply {
    pub(crate) fn text(text: &str) -> Self {
        Self::Bytes(text.as_bytes().to_vec())
    }
}

/// Replies are consumed one per attempt. [`Reply::Silence`] and an exhausted
/// script both count as a timed-out attempt.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    script: VecDeque<Reply>,
    pub(crate) sent: Vec<Vec<u8>>,
    pub(crate) retries_seen: Vec<u32>,
    pub(crate) disconnects: usize,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, text: &str) -> Self {
        self.script.push_back(Reply::text(text));
        self
    }

    pub(crate) fn then(mut self, reply: Reply) -> Self {
        self.script.push_back(reply);
        self
    }

    pub(crate) fn sent_text(&self) -> Vec<String> {
        self.sent
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }
}

impl Transport for MockTransport {
    fn send_receive(
        &mut self,
        data: &[u8],
        _max_size: usize,
        retries: u32,
    ) -> Result<Vec<u8>, TransportError> {
        self.retries_seen.push(retries);
        let attempts = retries.saturating_add(1);
        for _ in 0..attempts {
            self.sent.push(data.to_vec());
            match self.script.pop_front() {
                Some(Reply::Bytes(bytes)) if !bytes.is_empty() => return Ok(bytes),
                Some(Reply::Fail) => {
                    return Err(TransportError::Io(std::io::Error::other("line fault")));
                }
                Some(Reply::Bytes(_)) | Some(Reply::Silence) | None => {}
            }
        }
        Err(TransportError::Timeout { attempts })
    }

    fn disconnect(&mut self) {
        self.disconnects += 1;
    }
}
