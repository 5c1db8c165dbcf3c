// Lskbd Integration Tests
//
// These tests verify the complete pipeline over a scratch tree:
// devices listing -> parser -> sysfs enrichment -> filter -> formatters

use std::fs::{self, File};
use std::os::unix::fs::symlink;
use std::path::PathBuf;

use lskbd_core::{filter, format, list_devices, SysfsScanner};
use tempfile::TempDir;

const KBD_FRAGMENT: &str = "devices/platform/i8042/serio0/input/input1";
const MOUSE_FRAGMENT: &str = "devices/pci0000:00/usb1/1-1/input/input5";

const LISTING: &str = "\
I: Bus=0011 Vendor=0001 Product=0001 Version=ab41
N: Name=\"AT Translated Set 2 keyboard\"
P: Phys=isa0060/serio0/input0
S: Sysfs=/devices/platform/i8042/serio0/input/input1
U: Uniq=
H: Handlers=sysrq kbd event1 leds
B: EV=120013

I: Bus=0003 Vendor=046d Product=c077 Version=0111
N: Name=\"Logitech USB Optical Mouse\"
S: Sysfs=/devices/pci0000:00/usb1/1-1/input/input5
H: Handlers=mouse0 event5
";

struct Host {
    _root: TempDir,
    listing: PathBuf,
    scanner: SysfsScanner,
    kbd_link: PathBuf,
    mouse_node: PathBuf,
}

/// Build a host tree with one keyboard (event1, with a by-path link)
/// and one mouse (event5, raw path only).
fn make_host() -> Host {
    let root = TempDir::new().unwrap();
    let sys = root.path().join("sys");
    let dev = root.path().join("dev");
    let by_path = dev.join("input/by-path");

    let kbd = sys.join(KBD_FRAGMENT);
    fs::create_dir_all(kbd.join("device")).unwrap();
    fs::write(kbd.join("device/uevent"), "DRIVER=atkbd\n").unwrap();
    fs::create_dir_all(kbd.join("event1")).unwrap();
    fs::write(kbd.join("event1/uevent"), "DEVNAME=input/event1\n").unwrap();

    let mouse = sys.join(MOUSE_FRAGMENT);
    fs::create_dir_all(mouse.join("device")).unwrap();
    fs::write(mouse.join("device/uevent"), "DRIVER=usbmouse\n").unwrap();
    fs::create_dir_all(mouse.join("event5")).unwrap();
    fs::write(mouse.join("event5/uevent"), "DEVNAME=input/event5\n").unwrap();

    fs::create_dir_all(dev.join("input")).unwrap();
    File::create(dev.join("input/event1")).unwrap();
    File::create(dev.join("input/event5")).unwrap();
    fs::create_dir_all(&by_path).unwrap();
    let kbd_link = by_path.join("platform-i8042-serio-0-event-kbd");
    symlink("../event1", &kbd_link).unwrap();

    let listing = root.path().join("devices");
    fs::write(&listing, LISTING).unwrap();

    Host {
        scanner: SysfsScanner::with_roots(sys, dev.clone(), by_path),
        listing,
        kbd_link,
        mouse_node: dev.join("input/event5"),
        _root: root,
    }
}

#[test]
fn test_full_listing_enriched() {
    let host = make_host();
    let devices = list_devices(&host.listing, &host.scanner).unwrap();
    assert_eq!(devices.len(), 2);

    let kbd = &devices[0];
    assert_eq!(kbd.name.as_deref(), Some("AT Translated Set 2 keyboard"));
    assert_eq!(kbd.uevent.get("DRIVER").map(String::as_str), Some("atkbd"));
    assert_eq!(kbd.events, vec![host.kbd_link.clone()]);

    let mouse = &devices[1];
    assert_eq!(
        mouse.uevent.get("DRIVER").map(String::as_str),
        Some("usbmouse")
    );
    assert_eq!(mouse.events, vec![host.mouse_node.clone()]);
}

#[test]
fn test_keyboard_filter_selects_kbd_driver_only() {
    let host = make_host();
    let devices = list_devices(&host.listing, &host.scanner).unwrap();
    let keyboards: Vec<_> = devices.iter().filter(|d| filter::is_keyboard(d)).collect();
    assert_eq!(keyboards.len(), 1);
    assert_eq!(
        keyboards[0].name.as_deref(),
        Some("AT Translated Set 2 keyboard")
    );
}

#[test]
fn test_plain_output_lists_keyboard_events_only() {
    let host = make_host();
    let devices = list_devices(&host.listing, &host.scanner).unwrap();
    let keyboards: Vec<_> = devices
        .into_iter()
        .filter(|d| filter::is_keyboard(d))
        .collect();
    let out = format::plain(&keyboards);
    assert_eq!(out, format!("{}\n", host.kbd_link.display()));
}

#[test]
fn test_json_round_trips_by_id() {
    let host = make_host();
    let devices = list_devices(&host.listing, &host.scanner).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&format::json(&devices)).unwrap();
    let emitted: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["ID"].as_str().unwrap())
        .collect();
    let internal: Vec<String> = devices.iter().filter_map(|d| d.id()).collect();
    assert_eq!(emitted, internal);
}

#[test]
fn test_missing_listing_yields_empty_list() {
    let host = make_host();
    let devices =
        list_devices(&host.listing.with_file_name("absent"), &host.scanner).unwrap();
    assert!(devices.is_empty());
    assert_eq!(format::json(&devices), "[]");
}

#[test]
fn test_hawck_args_for_keyboards() {
    let host = make_host();
    let devices = list_devices(&host.listing, &host.scanner).unwrap();
    let keyboards: Vec<_> = devices
        .into_iter()
        .filter(|d| filter::is_keyboard(d))
        .collect();
    assert_eq!(
        format::hawck_args(&keyboards),
        format!("--kbd-device {}", host.kbd_link.display())
    );
}
