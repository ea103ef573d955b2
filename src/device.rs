use tracing::debug;

use crate::command::{self, Command};
use crate::decode::{
    AuthenticationMode, HidDeviceType, OperationMode, ServiceProfile, WireCode,
    decode_connection_status, decode_remote_address,
};
use crate::error::ProtocolError;
use crate::session::{Mode, Session};
use crate::transport::Transport;
#[cfg(feature = "serial")]
use crate::transport::serial::{SerialConfig, SerialTransport};

/// An RN-42 Bluetooth module.
///
/// Owns the transport for its whole lifetime. Dropping the device closes it,
/// leaving command mode first if necessary.
///
/// ```no_run
/// # fn main() -> Result<(), rn42::ProtocolError> {
/// let mut rn42 = rn42::Rn42::open_port("/dev/ttyUSB0")?;
/// rn42.enter_command_mode()?;
/// println!("{}", rn42.get_chip_name()?);
/// rn42.close();
/// # Ok(())
/// # }
/// ```
pub struct Rn42<T: Transport> {
    session: Session<T>,
}

impl<T: Transport> Rn42<T> {
    /// Wraps an already connected transport. The module starts in data mode.
    pub fn new(transport: T) -> Self {
        Self {
            session: Session::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        self.session.transport()
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn is_command_mode(&self) -> bool {
        self.session.mode() == Mode::Command
    }

    pub fn is_closed(&self) -> bool {
        self.session.mode() == Mode::Closed
    }

    /// Leaves command mode and disconnects. Calling it again does nothing.
    pub fn close(&mut self) {
        self.session.close();
    }

    /// Switches the module into command mode.
    ///
    /// If the module stays silent it may already be in command mode; that is
    /// confirmed by reading back the chip name.
    pub fn enter_command_mode(&mut self) -> Result<(), ProtocolError> {
        self.session.enter_command_mode()
    }

    pub fn leave_command_mode(&mut self) -> Result<(), ProtocolError> {
        self.session.leave_command_mode()
    }

    /// Reboots the module. Required for most settings to take effect.
    pub fn reboot(&mut self) -> Result<(), ProtocolError> {
        self.set(&command::REBOOT)
    }

    /// Chip name such as `RNBT-A955`; the suffix is the end of the MAC address.
    pub fn get_chip_name(&mut self) -> Result<String, ProtocolError> {
        self.session.execute(&command::GET_CHIP_NAME)
    }

    /// Firmware version banner. HID needs firmware newer than 6.11.
    pub fn get_firmware_version(&mut self) -> Result<String, ProtocolError> {
        self.session.execute(&command::GET_FIRMWARE_VERSION)
    }

    pub fn get_operation_mode(&mut self) -> Result<Option<OperationMode>, ProtocolError> {
        self.get_decoded(&command::GET_OPERATION_MODE)
    }

    pub fn set_master_mode(&mut self) -> Result<(), ProtocolError> {
        self.set(&command::SET_MASTER_MODE)
    }

    pub fn set_slave_mode(&mut self) -> Result<(), ProtocolError> {
        self.set(&command::SET_SLAVE_MODE)
    }

    pub fn get_authentication_mode(
        &mut self,
    ) -> Result<Option<AuthenticationMode>, ProtocolError> {
        self.get_decoded(&command::GET_AUTHENTICATION_MODE)
    }

    /// No authentication.
    pub fn set_authentication_open_mode(&mut self) -> Result<(), ProtocolError> {
        self.set(&command::SET_AUTHENTICATION_OPEN_MODE)
    }

    /// The host must send a matching pin code.
    pub fn set_authentication_pin_mode(&mut self) -> Result<(), ProtocolError> {
        self.set(&command::SET_AUTHENTICATION_PIN_MODE)
    }

    pub fn get_service_profile(&mut self) -> Result<Option<ServiceProfile>, ProtocolError> {
        self.get_decoded(&command::GET_SERVICE_PROFILE)
    }

    pub fn set_service_profile_spp(&mut self) -> Result<(), ProtocolError> {
        self.set(&command::SET_SERVICE_PROFILE_SPP)
    }

    pub fn set_service_profile_hid(&mut self) -> Result<(), ProtocolError> {
        self.set(&command::SET_SERVICE_PROFILE_HID)
    }

    pub fn get_local_bluetooth_address(&mut self) -> Result<String, ProtocolError> {
        self.session.execute(&command::GET_LOCAL_ADDRESS)
    }

    /// `true` while a remote host is connected.
    pub fn get_connection_status(&mut self) -> Result<bool, ProtocolError> {
        let raw = self.session.execute(&command::GET_CONNECTION_STATUS)?;
        Ok(decode_connection_status(&raw))
    }

    /// Address of the connected remote host, `None` when nothing is connected.
    pub fn get_remote_connected_bluetooth_address(
        &mut self,
    ) -> Result<Option<String>, ProtocolError> {
        let raw = self.session.execute(&command::GET_REMOTE_ADDRESS)?;
        Ok(decode_remote_address(&raw))
    }

    pub fn get_hid_device_type(&mut self) -> Result<Option<HidDeviceType>, ProtocolError> {
        self.get_decoded(&command::GET_HID_DEVICE_TYPE)
    }

    pub fn set_hid_keyboard(&mut self) -> Result<(), ProtocolError> {
        self.set(&command::SET_HID_KEYBOARD)
    }

    pub fn set_hid_gamepad(&mut self) -> Result<(), ProtocolError> {
        self.set(&command::SET_HID_GAMEPAD)
    }

    pub fn set_hid_mouse(&mut self) -> Result<(), ProtocolError> {
        self.set(&command::SET_HID_MOUSE)
    }

    pub fn set_hid_combo(&mut self) -> Result<(), ProtocolError> {
        self.set(&command::SET_HID_COMBO)
    }

    pub fn set_hid_joystick(&mut self) -> Result<(), ProtocolError> {
        self.set(&command::SET_HID_JOYSTICK)
    }

    fn set(&mut self, command: &Command) -> Result<(), ProtocolError> {
        self.session.execute(command).map(|_| ())
    }

    fn get_decoded<V: WireCode>(&mut self, command: &Command) -> Result<Option<V>, ProtocolError> {
        let raw = self.session.execute(command)?;
        Ok(V::from_code(&raw))
    }
}

#[cfg(feature = "serial")]
impl Rn42<SerialTransport> {
    pub fn open(config: &SerialConfig) -> Result<Self, ProtocolError> {
        let transport = SerialTransport::connect(config)
            .map_err(|source| ProtocolError::Connect { source })?;
        tracing::info!(port = %config.port, "connected to the serial port");
        Ok(Self::new(transport))
    }

    pub fn open_port(path: &str) -> Result<Self, ProtocolError> {
        Self::open(&SerialConfig::new(path))
    }
}

impl<T: Transport> Drop for Rn42<T> {
    fn drop(&mut self) {
        if !self.is_closed() {
            debug!("closing device on drop");
        }
        self.close();
    }
}
