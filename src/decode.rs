//! Lookup tables turning the module's short status codes into typed values.
//!
//! Codes are matched exactly. A code missing from a table decodes to `None`,
//! meaning the module returned a value this crate does not know, which is not
//! a transport failure.

use strum_macros::{Display, EnumIter, IntoStaticStr};

/// Reply to a remote-address query when no remote device is connected.
pub const NO_REMOTE_ADDRESS: &str = "000000000000";

/// Exact-key lookup in a code table.
pub fn decode<L: Copy>(table: &[(&str, L)], code: &str) -> Option<L> {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|&(_, label)| label)
}

/// A value the module reports as a short code.
pub trait WireCode: Copy + PartialEq + 'static {
    const TABLE: &'static [(&'static str, Self)];

    fn from_code(code: &str) -> Option<Self> {
        decode(Self::TABLE, code)
    }

    fn code(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, value)| *value == self)
            .map(|&(code, _)| code)
            .unwrap_or_default()
    }
}

macro_rules! wire_code_table {
    ($ty:ident { $($code:literal => $variant:ident),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                self.into()
            }
        }

        impl WireCode for $ty {
            const TABLE: &'static [(&'static str, Self)] = &[$(($code, Self::$variant)),+];
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationMode {
    Slave,
    Master,
    Trigger,
    /// Auto-connect master.
    Auto,
    /// Auto-connect on DTR.
    Dtr,
    /// Auto-connect to any device.
    Any,
    Pair,
}

wire_code_table!(OperationMode {
    "Slav" => Slave,
    "Mstr" => Master,
    "Trig" => Trigger,
    "Auto" => Auto,
    "DTR" => Dtr,
    "Any" => Any,
    "Pair" => Pair,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticationMode {
    Open,
    SspKeyboard,
    SspJustWork,
    PinCode,
}

wire_code_table!(AuthenticationMode {
    "0" => Open,
    "1" => SspKeyboard,
    "2" => SspJustWork,
    "4" => PinCode,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceProfile {
    Spp,
    DunDce,
    DunDte,
    MdmSpp,
    SppAndDunDce,
    Apl,
    Hid,
}

wire_code_table!(ServiceProfile {
    "0" => Spp,
    "1" => DunDce,
    "2" => DunDte,
    "3" => MdmSpp,
    "4" => SppAndDunDce,
    "5" => Apl,
    "6" => Hid,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HidDeviceType {
    Keyboard,
    Gamepad,
    Mouse,
    Combo,
    Joystick,
    Digitizer,
    Sensor,
    Usecfg,
}

wire_code_table!(HidDeviceType {
    "0200" => Keyboard,
    "0210" => Gamepad,
    "0220" => Mouse,
    "0230" => Combo,
    "0240" => Joystick,
    "0250" => Digitizer,
    "0260" => Sensor,
    "0270" => Usecfg,
});

/// Decodes a `GK` reply such as `1,0,0`. Only a leading `1` means connected.
pub fn decode_connection_status(raw: &str) -> bool {
    raw.split(',').next() == Some("1")
}

/// Decodes a `GF` reply; the all-zero address means nothing is connected.
pub fn decode_remote_address(raw: &str) -> Option<String> {
    (raw != NO_REMOTE_ADDRESS).then(|| raw.to_owned())
}
