//! Command-mode state machine.
//!
//! The module either forwards bytes transparently (data mode) or interprets
//! them as commands. [`Session`] tracks which one it is in and only moves
//! between the two through [`Session::enter_command_mode`],
//! [`Session::leave_command_mode`] and [`Session::close`].

use tracing::{info, warn};

use crate::command::{
    CHIP_NAME_PREFIX, CMD_MARKER, Command, ENTER_COMMAND_MODE, GET_CHIP_NAME, LEAVE,
};
use crate::error::ProtocolError;
use crate::executor::Executor;
use crate::transport::{Transport, TransportError};

const ENTER_LABEL: &str = "entering command mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Data,
    Command,
    Closed,
}

/// Classified reply to the command-mode entry token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EntryReply {
    /// The reply contains `CMD`, possibly after stale bytes from the buffer.
    Marker,
    /// Nothing came back. The module may already be in command mode, in which
    /// case it swallows the token without answering.
    Silent,
    Unexpected(String),
}

impl EntryReply {
    pub(crate) fn classify(reply: &str) -> Self {
        if reply.contains(CMD_MARKER) {
            Self::Marker
        } else if reply.is_empty() {
            Self::Silent
        } else {
            Self::Unexpected(reply.to_owned())
        }
    }
}

pub(crate) struct Session<T> {
    executor: Executor<T>,
    mode: Mode,
}

impl<T: Transport> Session<T> {
    pub(crate) fn new(transport: T) -> Self {
        Self {
            executor: Executor::new(transport),
            mode: Mode::Data,
        }
    }

    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn transport(&self) -> &T {
        self.executor.transport()
    }

    pub(crate) fn enter_command_mode(&mut self) -> Result<(), ProtocolError> {
        self.ensure_open(ENTER_LABEL)?;

        let reply = match self.executor.exchange(ENTER_COMMAND_MODE) {
            Ok(reply) => EntryReply::classify(&reply),
            Err(TransportError::Timeout { .. }) => EntryReply::Silent,
            Err(source) => {
                return Err(ProtocolError::Transport {
                    label: ENTER_LABEL,
                    source,
                });
            }
        };

        match reply {
            EntryReply::Marker => {
                info!("entered command mode");
            }
            EntryReply::Silent => {
                warn!("no reply to command-mode token, probing chip name");
                let name = self
                    .executor
                    .execute(&GET_CHIP_NAME)
                    .map_err(|err| ProtocolError::ChipNameProbe {
                        source: Box::new(err),
                    })?;
                if !name.starts_with(CHIP_NAME_PREFIX) {
                    return Err(ProtocolError::ChipNameMismatch { name });
                }
                info!(chip_name = %name, "already in command mode");
            }
            EntryReply::Unexpected(response) => {
                return Err(ProtocolError::CommandModeEntry { response });
            }
        }

        self.mode = Mode::Command;
        Ok(())
    }

    /// Leaves command mode. Outside command mode this is a no-op.
    pub(crate) fn leave_command_mode(&mut self) -> Result<(), ProtocolError> {
        if self.mode != Mode::Command {
            return Ok(());
        }

        self.executor.execute(&LEAVE)?;
        self.mode = Mode::Data;
        info!("left command mode");
        Ok(())
    }

    /// Runs `command`; only allowed in command mode.
    pub(crate) fn execute(&mut self, command: &Command) -> Result<String, ProtocolError> {
        let label = command.label();
        match self.mode {
            Mode::Command => self.executor.execute(command),
            Mode::Data => Err(ProtocolError::NotInCommandMode { label }),
            Mode::Closed => Err(ProtocolError::Closed { label }),
        }
    }

    /// Leaves command mode if needed, then disconnects. Runs at most once.
    pub(crate) fn close(&mut self) {
        if self.mode == Mode::Closed {
            return;
        }

        if let Err(err) = self.leave_command_mode() {
            warn!(%err, "could not leave command mode while closing");
        }
        self.executor.transport_mut().disconnect();
        self.mode = Mode::Closed;
    }

    fn ensure_open(&self, label: &'static str) -> Result<(), ProtocolError> {
        if self.mode == Mode::Closed {
            return Err(ProtocolError::Closed { label });
        }
        Ok(())
    }
}
