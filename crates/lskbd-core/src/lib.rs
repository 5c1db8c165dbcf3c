// Lskbd Core Library
// Input-device enumeration over kernel pseudo-files

pub mod device;
pub mod filter;
pub mod format;
pub mod parser;
pub mod sysfs;

use std::io;
use std::path::Path;

pub use device::Device;
pub use filter::is_keyboard;
pub use parser::{parse_block, parse_devices, split_blocks};
pub use sysfs::{read_vars, SysfsScanner};

/// Kernel listing of every input device
pub const PROC_INPUT_DEVICES: &str = "/proc/bus/input/devices";

/// Result type for enumeration operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur while enumerating devices
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Read a devices listing, parse it, and enrich every device.
///
/// A missing listing file yields an empty list, so hosts without the
/// input procfs node degrade to empty output instead of an error.
/// Per-device enrichment is best-effort throughout.
pub fn list_devices(devices_file: &Path, scanner: &SysfsScanner) -> ScanResult<Vec<Device>> {
    let text = match std::fs::read_to_string(devices_file) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::debug!("{} not found, no input devices", devices_file.display());
            String::new()
        }
        Err(err) => return Err(err.into()),
    };
    let mut devices = parser::parse_devices(&text);
    for dev in &mut devices {
        scanner.enrich(dev);
    }
    Ok(devices)
}
