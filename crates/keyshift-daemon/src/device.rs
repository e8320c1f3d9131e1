//! Physical keyboard discovery and acquisition

use std::path::{Path, PathBuf};

use anyhow::Result;
use evdev::{Device, InputEvent, InputEventKind};
use keyshift_core::KeyEvent;

use crate::error::DaemonError;

/// Information about an input device
#[derive(Debug)]
pub struct DeviceInfo {
    pub path: PathBuf,
    pub name: String,
    pub vendor: u16,
    pub product: u16,
}

impl DeviceInfo {
    /// Get vendor:product string (e.g., "3434:0361")
    pub fn vendor_product(&self) -> String {
        format!("{:04x}:{:04x}", self.vendor, self.product)
    }
}

/// Enumerate every keyboard under /dev/input, sorted by path.
pub fn enumerate_keyboards() -> Result<Vec<DeviceInfo>> {
    let mut keyboards = Vec::new();

    for entry in std::fs::read_dir("/dev/input")? {
        let entry = entry?;
        let path = entry.path();

        // Only look at event* devices
        if !path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with("event"))
            .unwrap_or(false)
        {
            continue;
        }

        match Device::open(&path) {
            Ok(device) if is_keyboard(&device) => {
                let id = device.input_id();
                keyboards.push(DeviceInfo {
                    name: device.name().unwrap_or("Unknown").to_string(),
                    path,
                    vendor: id.vendor(),
                    product: id.product(),
                });
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("Could not open {}: {}", path.display(), e);
            }
        }
    }

    keyboards.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(keyboards)
}

/// Check if a device is a keyboard
pub fn is_keyboard(device: &Device) -> bool {
    device
        .supported_events()
        .contains(evdev::EventType::KEY)
        && device
            .supported_keys()
            .map(|keys| keys.contains(evdev::Key::KEY_A))
            .unwrap_or(false)
}

/// Open the physical keyboard at `path`.
pub fn open(path: &Path) -> Result<Device, DaemonError> {
    Device::open(path).map_err(|source| DaemonError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Grab a device for exclusive access
pub fn grab(device: &mut Device, path: &Path) -> Result<(), DaemonError> {
    device.grab().map_err(|source| DaemonError::Grab {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode a raw evdev event into a key event.
///
/// Non-key events (SYN, MSC scan codes, LEDs) yield `None`; the virtual
/// keyboard produces its own synchronization reports.
pub fn key_event(event: &InputEvent) -> Option<KeyEvent> {
    match event.kind() {
        InputEventKind::Key(key) => KeyEvent::from_raw(key.code(), event.value()),
        _ => None,
    }
}
