//! Byte-level transports the command engine talks through.
//!
//! The engine never touches a port directly. It hands a command to
//! [`Transport::send_receive`] and gets back whatever the module replied.

#[cfg(test)]
pub(crate) mod mock;
#[cfg(feature = "serial")]
pub mod serial;

#[cfg(feature = "serial")]
pub use serial::{SerialConfig, SerialTransport};

/// Errors raised by a [`Transport`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[cfg(feature = "serial")]
    #[error("failed to open serial port: {0}")]
    Open(#[from] serialport::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no response after {attempts} attempt(s)")]
    Timeout { attempts: u32 },
    #[error("transport is disconnected")]
    Disconnected,
}

/// A duplex byte channel to the module.
pub trait Transport {
    /// Sends `data`, then reads the reply.
    ///
    /// `max_size == 0` drains everything the module sends back; any other value
    /// stops once that many bytes have arrived. An attempt that yields no bytes
    /// counts as a timeout and is repeated up to `retries` more times before
    /// [`TransportError::Timeout`] is returned.
    fn send_receive(
        &mut self,
        data: &[u8],
        max_size: usize,
        retries: u32,
    ) -> Result<Vec<u8>, TransportError>;

    /// Releases the underlying channel. Always succeeds from the caller's view.
    fn disconnect(&mut self);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send_receive(
        &mut self,
        data: &[u8],
        max_size: usize,
        retries: u32,
    ) -> Result<Vec<u8>, TransportError> {
        (**self).send_receive(data, max_size, retries)
    }

    fn disconnect(&mut self) {
        (**self).disconnect()
    }
}
