//! Wire constants and command descriptors for the module's ASCII command set.
//!
//! Every command is a short code, sometimes followed by comma-separated
//! arguments, terminated by `\r\n`. The only exception is the command-mode
//! entry token, which the module treats as an escape sequence.

/// Line terminator appended to every command except [`ENTER_COMMAND_MODE`].
pub const NEWLINE: &str = "\r\n";

/// Transport retries per transaction; each transaction makes `RETRY + 1` attempts.
pub const RETRY: u32 = 2;

/// Expected prefix of the chip name, e.g. `RNBT-A955`.
pub const CHIP_NAME_PREFIX: &str = "RNBT";

/// Generic acknowledgement for an accepted setting.
pub const AOK: &str = "AOK";

pub const ENTER_COMMAND_MODE: &str = "$$$";
pub const LEAVE_COMMAND_MODE: &str = "---";

/// Marker contained in the reply to [`ENTER_COMMAND_MODE`].
pub const CMD_MARKER: &str = "CMD";
/// Exact reply to [`LEAVE_COMMAND_MODE`].
pub const END: &str = "END";

/// How a reply is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// The trimmed reply must equal the text.
    Exact(&'static str),
    /// The trimmed reply must contain the text.
    Contains(&'static str),
    /// Any reply is accepted.
    Any,
}

impl Expectation {
    pub fn is_met_by(&self, reply: &str) -> bool {
        match self {
            Self::Exact(expected) => reply == *expected,
            Self::Contains(expected) => reply.contains(*expected),
            Self::Any => true,
        }
    }
}

/// An immutable command: wire text, reply expectation, and a diagnostic label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    text: &'static str,
    expect: Expectation,
    label: &'static str,
}

impl Command {
    pub const fn new(text: &'static str, expect: Expectation, label: &'static str) -> Self {
        Self {
            text,
            expect,
            label,
        }
    }

    /// A getter: any reply is accepted.
    pub const fn query(text: &'static str, label: &'static str) -> Self {
        Self::new(text, Expectation::Any, label)
    }

    /// A setter: the reply must be exactly [`AOK`].
    pub const fn set(text: &'static str, label: &'static str) -> Self {
        Self::new(text, Expectation::Exact(AOK), label)
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn expect(&self) -> &Expectation {
        &self.expect
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Bytes put on the wire for this command.
    pub fn encode(&self) -> Vec<u8> {
        encode_line(self.text)
    }
}

/// Appends [`NEWLINE`] unless `text` is the command-mode entry token.
pub fn encode_line(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + NEWLINE.len());
    out.extend_from_slice(text.as_bytes());
    if text != ENTER_COMMAND_MODE {
        out.extend_from_slice(NEWLINE.as_bytes());
    }
    out
}

pub const LEAVE: Command = Command::new(
    LEAVE_COMMAND_MODE,
    Expectation::Exact(END),
    "leaving command mode",
);
pub const REBOOT: Command = Command::new("R,1", Expectation::Contains("Reboot"), "rebooting");

pub const GET_CHIP_NAME: Command = Command::query("GN", "getting chip name");
pub const GET_FIRMWARE_VERSION: Command = Command::new(
    "V",
    Expectation::Contains("Ver"),
    "getting firmware version",
);

pub const GET_OPERATION_MODE: Command = Command::query("GM", "getting operation mode");
pub const SET_MASTER_MODE: Command = Command::set("SM,1", "setting master mode");
pub const SET_SLAVE_MODE: Command = Command::set("SM,0", "setting slave mode");

pub const GET_AUTHENTICATION_MODE: Command =
    Command::query("GA", "getting authentication mode");
pub const SET_AUTHENTICATION_OPEN_MODE: Command =
    Command::set("SA,0", "setting authentication open mode");
pub const SET_AUTHENTICATION_PIN_MODE: Command =
    Command::set("SA,4", "setting authentication pin mode");

pub const GET_SERVICE_PROFILE: Command = Command::query("G~", "getting service profile");
pub const SET_SERVICE_PROFILE_SPP: Command =
    Command::set("S~,0", "setting SPP as service profile");
pub const SET_SERVICE_PROFILE_HID: Command =
    Command::set("S~,6", "setting HID as service profile");

pub const GET_LOCAL_ADDRESS: Command = Command::query("GB", "getting local bluetooth address");
pub const GET_CONNECTION_STATUS: Command = Command::query("GK", "getting connection status");
pub const GET_REMOTE_ADDRESS: Command =
    Command::query("GF", "getting remote bluetooth address");

pub const GET_HID_DEVICE_TYPE: Command = Command::query("GH", "getting HID device type");
pub const SET_HID_KEYBOARD: Command = Command::set("SH,0000", "setting HID keyboard");
pub const SET_HID_GAMEPAD: Command = Command::set("SH,0010", "setting HID gamepad");
pub const SET_HID_MOUSE: Command = Command::set("SH,0020", "setting HID mouse");
pub const SET_HID_COMBO: Command = Command::set("SH,0030", "setting HID combo");
pub const SET_HID_JOYSTICK: Command = Command::set("SH,0040", "setting HID joystick");
