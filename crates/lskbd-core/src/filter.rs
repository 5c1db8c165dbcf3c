// Lskbd Filter
// Keyboard detection by driver-name convention

use crate::device::Device;

// Every in-tree keyboard driver name ends in "kbd" (atkbd, usbkbd,
// hid-holtek-kbd, sunkbd, ...), so the suffix is the detection contract.
const KBD_SUFFIX: &str = "kbd";

/// True iff the device's sysfs uevent names a driver ending in `kbd`.
///
/// Devices without a `DRIVER` entry are not keyboards; their absence
/// is not an error.
pub fn is_keyboard(dev: &Device) -> bool {
    dev.uevent
        .get("DRIVER")
        .is_some_and(|drv| drv.ends_with(KBD_SUFFIX))
}
