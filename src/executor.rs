//! The send/validate transaction every module operation goes through.

use tracing::{debug, info};

use crate::command::{Command, RETRY, encode_line};
use crate::error::ProtocolError;
use crate::transport::{Transport, TransportError};

/// Read size passed to the transport: drain everything the module sends back.
const DRAIN: usize = 0;

pub(crate) struct Executor<T> {
    transport: T,
    retries: u32,
}

impl<T: Transport> Executor<T> {
    pub(crate) fn new(transport: T) -> Self {
        Self {
            transport,
            retries: RETRY,
        }
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Sends `command` and validates the trimmed reply against its expectation.
    pub(crate) fn execute(&mut self, command: &Command) -> Result<String, ProtocolError> {
        let label = command.label();
        let reply = self
            .exchange(command.text())
            .map_err(|source| ProtocolError::Transport { label, source })?;

        if !command.expect().is_met_by(&reply) {
            return Err(ProtocolError::UnexpectedResponse {
                label,
                response: reply,
            });
        }

        info!(label, result = %reply, "success");
        Ok(reply)
    }

    /// Raw exchange without validation; the reply is decoded and trimmed.
    pub(crate) fn exchange(&mut self, text: &str) -> Result<String, TransportError> {
        let frame = encode_line(text);
        debug!(command = %text.escape_debug(), bytes = frame.len(), "sending");
        let raw = self.transport.send_receive(&frame, DRAIN, self.retries)?;
        Ok(decode_reply(&raw))
    }
}

/// Decodes raw reply bytes as text and strips surrounding whitespace and line endings.
pub(crate) fn decode_reply(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{GET_CHIP_NAME, GET_FIRMWARE_VERSION, SET_MASTER_MODE};
    use crate::transport::mock::{MockTransport, Reply};

    #[test]
    fn appends_newline_and_trims_reply() {
        let mut executor = Executor::new(MockTransport::new().reply("RNBT-A955\r\n"));
        let name = executor.execute(&GET_CHIP_NAME).expect("chip name");
        assert_eq!(name, "RNBT-A955");
        assert_eq!(executor.transport().sent, vec![b"GN\r\n".to_vec()]);
        assert_eq!(executor.transport().retries_seen, vec![2]);
    }

    #[test]
    fn exact_expectation_accepts_aok() {
        let mut executor = Executor::new(MockTransport::new().reply("AOK\r\n"));
        assert_eq!(executor.execute(&SET_MASTER_MODE).expect("set master"), "AOK");
    }

    #[test]
    fn exact_expectation_rejects_other_reply() {
        let mut executor = Executor::new(MockTransport::new().reply("ERR\r\n"));
        let err = executor.execute(&SET_MASTER_MODE).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnexpectedResponse { label: "setting master mode", ref response }
                if response == "ERR"
        ));
    }

    #[test]
    fn substring_expectation() {
        let mut executor = Executor::new(
            MockTransport::new()
                .reply("Ver 6.15 04/26/2013\r\n(c) Roving Networks\r\n")
                .reply("?\r\n"),
        );
        let version = executor.execute(&GET_FIRMWARE_VERSION).expect("version");
        assert!(version.starts_with("Ver 6.15"));
        assert!(version.ends_with("Roving Networks"));

        let err = executor.execute(&GET_FIRMWARE_VERSION).unwrap_err();
        assert_eq!(err.response(), "?");
    }

    #[test]
    fn retries_until_reply_arrives() {
        let mut executor = Executor::new(
            MockTransport::new()
                .then(Reply::Silence)
                .then(Reply::Silence)
                .reply("RNBT-1234\r\n"),
        );
        assert_eq!(executor.execute(&GET_CHIP_NAME).expect("name"), "RNBT-1234");
        assert_eq!(executor.transport().sent.len(), 3);
    }

    #[test]
    fn exhausted_retry_budget_is_an_error() {
        let mut executor = Executor::new(MockTransport::new());
        let err = executor.execute(&GET_CHIP_NAME).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Transport {
                label: "getting chip name",
                source: TransportError::Timeout { attempts: 3 },
            }
        ));
        assert_eq!(err.response(), "");
        assert_eq!(executor.transport().sent.len(), 3);
    }

    #[test]
    fn transport_failure_is_an_error() {
        let mut executor = Executor::new(MockTransport::new().then(Reply::Fail));
        let err = executor.execute(&GET_CHIP_NAME).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Transport {
                source: TransportError::Io(_),
                ..
            }
        ));
    }

    #[test]
    fn decode_reply_strips_line_endings() {
        assert_eq!(decode_reply(b"\r\nCMD\r\n"), "CMD");
        assert_eq!(decode_reply(b"\r\n"), "");
    }
}
