// Lskbd Formatter
// Plain, JSON, structured-dump, and daemon-argument rendering

use serde_json::{Map, Value};

use crate::device::Device;

/// One resolved event path per line, device order preserved.
pub fn plain(devices: &[Device]) -> String {
    let mut out = String::new();
    for dev in devices {
        for event in &dev.events {
            out.push_str(&event.to_string_lossy());
            out.push('\n');
        }
    }
    out
}

/// The full ordered device list as a single JSON array.
pub fn json(devices: &[Device]) -> String {
    Value::Array(devices.iter().map(Device::to_value).collect()).to_string()
}

/// `--kbd-device <path>` tokens, space-joined, for hawck-inputd.
pub fn hawck_args(devices: &[Device]) -> String {
    let mut tokens = Vec::new();
    for dev in devices {
        for event in &dev.events {
            tokens.push(format!("--kbd-device {}", event.display()));
        }
    }
    tokens.join(" ")
}

/// YAML-like dump: one document per device, keyed by the device name.
///
/// The `Name` field is removed (it becomes the document key), fields
/// holding empty strings are pruned at every depth, and every mapping
/// is converted to a sequence of single-key mappings so that insertion
/// order survives serialization.
pub fn structured_dump(devices: &[Device]) -> String {
    let mut out = String::new();
    for dev in devices {
        // Nameless devices are keyed by a YAML null, never a bare ":"
        let name = match dev.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "~",
        };
        let mut value = dev.to_value();
        if let Value::Object(map) = &mut value {
            map.remove("Name");
        }
        let listed = listify(prune_empty(value));
        out.push_str("---\n");
        out.push_str(name);
        out.push_str(":\n");
        render_seq(&listed, 0, &mut out);
    }
    out
}

/// Drop object entries whose value is the empty string, recursively.
fn prune_empty(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !matches!(v, Value::String(s) if s.is_empty()))
                .map(|(k, v)| (k, prune_empty(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(prune_empty).collect()),
        other => other,
    }
}

/// Convert every mapping into a sequence of single-key mappings.
fn listify(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Array(
            map.into_iter()
                .map(|(key, inner)| {
                    let mut entry = Map::new();
                    entry.insert(key, listify(inner));
                    Value::Object(entry)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(listify).collect()),
        other => other,
    }
}

/// Render a listified sequence as indented `- key: value` lines.
fn render_seq(value: &Value, depth: usize, out: &mut String) {
    let Value::Array(items) = value else {
        return;
    };
    for item in items {
        out.push_str(&"  ".repeat(depth));
        match item {
            // Single-key mapping produced by listify
            Value::Object(entry) => {
                for (key, inner) in entry {
                    match inner {
                        Value::Array(_) => {
                            out.push_str("- ");
                            out.push_str(key);
                            out.push_str(":\n");
                            render_seq(inner, depth + 1, out);
                        }
                        scalar => {
                            out.push_str("- ");
                            out.push_str(key);
                            out.push_str(": ");
                            out.push_str(&render_scalar(scalar));
                            out.push('\n');
                        }
                    }
                }
            }
            scalar => {
                out.push_str("- ");
                out.push_str(&render_scalar(scalar));
                out.push('\n');
            }
        }
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
