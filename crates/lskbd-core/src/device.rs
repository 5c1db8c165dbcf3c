// Lskbd Device Model
// Parsed representation of one /proc/bus/input/devices block

use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// One input device as reported by the kernel.
///
/// Core fields come from the `I:`/`N:`/`H:` lines of a device block;
/// every other `key=value` line lands in `fields` verbatim, in file
/// order. `uevent` and `events` are filled in by the sysfs scanner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Device {
    /// Bus type from the `I:` line (tokens converted base 16)
    pub bus: Option<u32>,
    /// Vendor ID from the `I:` line
    pub vendor: Option<u32>,
    /// Product ID from the `I:` line
    pub product: Option<u32>,
    /// Version from the `I:` line
    pub version: Option<u32>,
    /// Quoted value of the `N: Name="..."` line
    pub name: Option<String>,
    /// Whitespace-split tokens of the `H: Handlers=` line
    pub handlers: Vec<String>,
    /// Remaining `key=value` captures (Phys, Sysfs, Uniq, bitmaps, ...)
    pub fields: IndexMap<String, String>,
    /// KEY=VALUE pairs from `<sysfs>/<Sysfs>/device/uevent`
    pub uevent: IndexMap<String, String>,
    /// Resolved event-file paths, by-path form preferred
    pub events: Vec<PathBuf>,
}

impl Device {
    /// Create an empty device
    pub fn new() -> Self {
        Self::default()
    }

    /// Sysfs path fragment from the `S:` line, if present.
    pub fn sysfs(&self) -> Option<&str> {
        self.fields.get("Sysfs").map(String::as_str)
    }

    /// Stable identifier: `vendor:product:name` with spaces in the name
    /// replaced by underscores. Vendor and product render in decimal.
    ///
    /// Returns `None` unless vendor, product, and name are all present.
    pub fn id(&self) -> Option<String> {
        match (self.vendor, self.product, self.name.as_deref()) {
            (Some(vendor), Some(product), Some(name)) => {
                Some(format!("{}:{}:{}", vendor, product, name.replace(' ', "_")))
            }
            _ => None,
        }
    }

    /// Convert to an ordered JSON value holding every populated field.
    ///
    /// Insertion order follows the kernel listing: the `I:` quadruple,
    /// name, generic fields, handlers, then the enrichment data and the
    /// derived `ID`. Absent optional fields are omitted entirely.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(bus) = self.bus {
            map.insert("Bus".to_string(), bus.into());
        }
        if let Some(vendor) = self.vendor {
            map.insert("Vendor".to_string(), vendor.into());
        }
        if let Some(product) = self.product {
            map.insert("Product".to_string(), product.into());
        }
        if let Some(version) = self.version {
            map.insert("Version".to_string(), version.into());
        }
        if let Some(name) = &self.name {
            map.insert("Name".to_string(), Value::String(name.clone()));
        }
        for (key, value) in &self.fields {
            map.insert(key.clone(), Value::String(value.clone()));
        }
        if !self.handlers.is_empty() {
            let handlers = self
                .handlers
                .iter()
                .map(|h| Value::String(h.clone()))
                .collect();
            map.insert("Handlers".to_string(), Value::Array(handlers));
        }
        let uevent = self
            .uevent
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect::<Map<String, Value>>();
        map.insert("uevent".to_string(), Value::Object(uevent));
        let events = self
            .events
            .iter()
            .map(|p| Value::String(p.to_string_lossy().into_owned()))
            .collect();
        map.insert("events".to_string(), Value::Array(events));
        if let Some(id) = self.id() {
            map.insert("ID".to_string(), Value::String(id));
        }
        Value::Object(map)
    }
}
