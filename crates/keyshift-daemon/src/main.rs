//! keyshift daemon
//!
//! Grabs one physical keyboard, runs every key event through the remap
//! engine and writes the result to a virtual keyboard. Hold LeftCtrl,
//! RightCtrl, F1 and F12 together to stop it.

mod device;
mod error;
mod injector;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use evdev::EventStream;
use keyshift_core::{Engine, Step};
use tokio::signal::unix::{signal, SignalKind};
use tracing_subscriber::EnvFilter;

use crate::error::DaemonError;
use crate::injector::VirtualKeyboard;

/// Physical keyboard to grab; varies between machines.
const DEVICE_PATH: &str = "/dev/input/event0";

const VIRTUAL_DEVICE_NAME: &str = "keyshift virtual keyboard";

#[derive(Parser, Debug)]
#[command(name = "keyshiftd")]
#[command(about = "Keyboard chord remapping daemon")]
#[command(version)]
struct Args {
    /// Path to the physical keyboard's event device
    #[arg(short, long, default_value = DEVICE_PATH)]
    device: PathBuf,

    /// List detected keyboards and exit
    #[arg(short, long)]
    list_devices: bool,
}

/// Why the event loop stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shutdown {
    Killswitch,
    Signal,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.list_devices {
        return list_devices();
    }

    let mut engine = Engine::new();

    // Physical device opens first: the virtual keyboard copies its key set
    let mut physical = device::open(&args.device)?;
    let name = physical.name().unwrap_or("Unknown").to_string();

    if !device::is_keyboard(&physical) {
        tracing::warn!(
            "Device '{}' at {} does not look like a keyboard",
            name,
            args.device.display()
        );
    }

    // Advertise everything the physical board has plus whatever the rules emit
    let keys: Vec<_> = physical
        .supported_keys()
        .map(|keys| keys.iter().collect())
        .unwrap_or_default();
    let mut keyboard = VirtualKeyboard::new(
        VIRTUAL_DEVICE_NAME,
        keys.into_iter().chain(engine.synthetic_keys()),
    )?;

    device::grab(&mut physical, &args.device)?;
    tracing::info!("Grabbed '{}' at {}", name, args.device.display());

    let mut events = physical.into_event_stream().map_err(DaemonError::Read)?;

    match run(&mut engine, &mut events, &mut keyboard).await? {
        Shutdown::Killswitch => tracing::info!("Exiting on killswitch"),
        Shutdown::Signal => tracing::info!("Shutting down..."),
    }

    Ok(())
}

/// Process events until the killswitch, a signal, or a fatal error.
async fn run(
    engine: &mut Engine,
    events: &mut EventStream,
    keyboard: &mut VirtualKeyboard,
) -> Result<Shutdown> {
    let mut terminate =
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;

    loop {
        tokio::select! {
            event = events.next_event() => {
                let event = event.map_err(DaemonError::Read)?;

                let Some(key_event) = device::key_event(&event) else {
                    continue;
                };

                match engine.process(key_event) {
                    Step::Emit(out) => keyboard.emit_all(&out)?,
                    Step::Killswitch => return Ok(Shutdown::Killswitch),
                }
            }
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl-C")?;
                return Ok(Shutdown::Signal);
            }
            _ = terminate.recv() => return Ok(Shutdown::Signal),
        }
    }
}

fn list_devices() -> Result<()> {
    let keyboards = device::enumerate_keyboards().context("Failed to enumerate input devices")?;

    if keyboards.is_empty() {
        println!("No keyboards found (do you have permission to read /dev/input?)");
        return Ok(());
    }

    println!("Available keyboards:\n");
    for info in keyboards {
        println!("  {}", info.name);
        println!("    Path: {}", info.path.display());
        println!("    ID: {}", info.vendor_product());
        println!();
    }

    Ok(())
}
