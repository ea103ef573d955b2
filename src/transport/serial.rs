use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;

use serialport::{ClearBuffer, DataBits, Parity, SerialPort, StopBits};
use tracing::debug;

use super::{Transport, TransportError};

const DEFAULT_BAUD_RATE: u32 = 115_200;
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);
const DEFAULT_SETTLE: Duration = Duration::from_millis(20);
const READ_CHUNK: usize = 256;
/// Upper bound on one drained reply; a module that keeps streaming is cut off here.
const MAX_DRAIN: usize = 4096;

/// Line settings for the module's UART.
///
/// The defaults match the factory configuration of the module: 115200 baud,
/// 8 data bits, no parity, 1 stop bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    /// How long one read attempt blocks waiting for the first byte.
    pub timeout: Duration,
    /// Pause between chunks while draining a reply.
    pub settle: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            timeout: DEFAULT_TIMEOUT,
            settle: DEFAULT_SETTLE,
        }
    }
}

impl SerialConfig {
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            ..Self::default()
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_data_bits(mut self, data_bits: DataBits) -> Self {
        self.data_bits = data_bits;
        self
    }

    pub fn with_parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    pub fn with_stop_bits(mut self, stop_bits: StopBits) -> Self {
        self.stop_bits = stop_bits;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

pub struct SerialTransport {
    inner: Option<Box<dyn SerialPort>>,
    settle: Duration,
}

impl SerialTransport {
    pub fn connect(config: &SerialConfig) -> Result<Self, TransportError> {
        let port = serialport::new(config.port.as_str(), config.baud_rate)
            .data_bits(config.data_bits)
            .parity(config.parity)
            .stop_bits(config.stop_bits)
            .timeout(config.timeout)
            .open()?;
        debug!(port = %config.port, baud_rate = config.baud_rate, "serial port open");
        Ok(Self {
            inner: Some(port),
            settle: config.settle,
        })
    }

    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>, TransportError> {
        self.inner.as_mut().ok_or(TransportError::Disconnected)
    }

    fn receive(&mut self, max_size: usize) -> Result<Vec<u8>, TransportError> {
        let settle = self.settle;
        let port = self.port()?;
        read_reply(port, max_size, settle, |port| {
            port.bytes_to_read().map_err(io::Error::from)
        })
    }
}

/// Reads one reply from `reader`.
///
/// With `max_size == 0` reading continues while `pending` reports buffered
/// bytes, up to [`MAX_DRAIN`]. Otherwise it stops at `max_size` bytes or the
/// first read timeout.
fn read_reply<R: Read>(
    reader: &mut R,
    max_size: usize,
    settle: Duration,
    mut pending: impl FnMut(&mut R) -> io::Result<u32>,
) -> Result<Vec<u8>, TransportError> {
    let limit = if max_size > 0 { max_size } else { MAX_DRAIN };
    let mut reply = Vec::new();
    let mut chunk = [0_u8; READ_CHUNK];

    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => reply.extend_from_slice(&chunk[..n]),
            Err(err) if err.kind() == io::ErrorKind::TimedOut => break,
            Err(err) => return Err(err.into()),
        }

        if reply.len() >= limit {
            reply.truncate(limit);
            break;
        }
        if max_size > 0 {
            continue;
        }

        thread::sleep(settle);
        if pending(reader)? == 0 {
            break;
        }
    }

    Ok(reply)
}

impl Transport for SerialTransport {
    fn send_receive(
        &mut self,
        data: &[u8],
        max_size: usize,
        retries: u32,
    ) -> Result<Vec<u8>, TransportError> {
        let attempts = retries.saturating_add(1);
        for attempt in 1..=attempts {
            let port = self.port()?;
            port.clear(ClearBuffer::Input).map_err(io::Error::from)?;
            port.write_all(data)?;
            port.flush()?;

            let reply = self.receive(max_size)?;
            if !reply.is_empty() {
                return Ok(reply);
            }
            debug!(attempt, attempts, "no reply from module");
        }

        Err(TransportError::Timeout { attempts })
    }

    fn disconnect(&mut self) {
        if self.inner.take().is_some() {
            debug!("serial port closed");
        }
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        self.disconnect();
    }
}
