use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rn42::Rn42;
use rn42::transport::{SerialConfig, Transport};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Inspect and configure an RN-42 Bluetooth module")]
struct Args {
    /// Serial port the module is attached to, e.g. /dev/ttyUSB0.
    port: String,
    #[arg(long, default_value_t = 115_200)]
    baud: u32,
    /// Service profile to apply.
    #[arg(long, value_enum)]
    profile: Option<Profile>,
    /// HID device class to apply.
    #[arg(long, value_enum)]
    hid: Option<HidClass>,
    /// Reboot after applying settings so they take effect.
    #[arg(long)]
    reboot: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    Spp,
    Hid,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HidClass {
    Keyboard,
    Gamepad,
    Mouse,
    Combo,
    Joystick,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = SerialConfig::new(&args.port).with_baud_rate(args.baud);
    let mut rn42 = Rn42::open(&config)?;
    rn42.enter_command_mode()?;

    print_settings(&mut rn42)?;
    apply_settings(&mut rn42, &args)?;

    if args.reboot {
        rn42.reboot()?;
        println!("Rebooted");
    }

    rn42.close();
    Ok(())
}

fn print_settings<T: Transport>(rn42: &mut Rn42<T>) -> Result<(), Box<dyn Error>> {
    println!("Chip name: {}", rn42.get_chip_name()?);
    println!("Firmware: {}", rn42.get_firmware_version()?);
    println!("Operation mode: {}", display(rn42.get_operation_mode()?));
    println!("Authentication: {}", display(rn42.get_authentication_mode()?));
    println!("Service profile: {}", display(rn42.get_service_profile()?));
    println!("HID device type: {}", display(rn42.get_hid_device_type()?));
    println!("Local address: {}", rn42.get_local_bluetooth_address()?);
    println!("Connected: {}", rn42.get_connection_status()?);
    match rn42.get_remote_connected_bluetooth_address()? {
        Some(address) => println!("Remote address: {address}"),
        None => println!("Remote address: none"),
    }
    Ok(())
}

fn apply_settings<T: Transport>(rn42: &mut Rn42<T>, args: &Args) -> Result<(), Box<dyn Error>> {
    match args.profile {
        Some(Profile::Spp) => rn42.set_service_profile_spp()?,
        Some(Profile::Hid) => rn42.set_service_profile_hid()?,
        None => {}
    }

    match args.hid {
        Some(HidClass::Keyboard) => rn42.set_hid_keyboard()?,
        Some(HidClass::Gamepad) => rn42.set_hid_gamepad()?,
        Some(HidClass::Mouse) => rn42.set_hid_mouse()?,
        Some(HidClass::Combo) => rn42.set_hid_combo()?,
        Some(HidClass::Joystick) => rn42.set_hid_joystick()?,
        None => {}
    }
    Ok(())
}

fn display<V: std::fmt::Display>(value: Option<V>) -> String {
    value.map_or_else(|| "unknown".to_owned(), |v| v.to_string())
}
