//! Rust client for the command mode of RN-42 Bluetooth modules.
//!
//! The recommended API surface is:
//! - [`Rn42`] for module operations and command-mode control
//! - [`ProtocolError`] for every failure those operations report
//! - the decoded enums ([`OperationMode`], [`AuthenticationMode`],
//!   [`ServiceProfile`], [`HidDeviceType`])
//! - [`transport`] for serial I/O adapters
//!
//! [`command`] exposes the raw command set for advanced use cases. Commands
//! only reach the module through [`Rn42`], which checks the session is in
//! command mode first:
//!
//! ```compile_fail
//! let transport: Box<dyn rn42::Transport> = todo!();
//! rn42::Executor::new(transport).execute(&rn42::command::GET_CHIP_NAME);
//! ```

/// Raw command codes and wire constants.
pub mod command;
mod decode;
mod device;
mod error;
mod executor;
mod session;
/// Transport adapters for connecting to an RN-42 module.
pub mod transport;

pub use decode::{
    AuthenticationMode, HidDeviceType, NO_REMOTE_ADDRESS, OperationMode, ServiceProfile, WireCode,
    decode, decode_connection_status, decode_remote_address,
};
pub use device::Rn42;
pub use error::ProtocolError;
pub use session::Mode;
pub use transport::{Transport, TransportError};
