// Lskbd Parser
// Splits the /proc/bus/input/devices listing into blocks and extracts fields

use std::sync::OnceLock;

use regex::Regex;

use crate::device::Device;

fn line_rx() -> &'static Regex {
    static RX: OnceLock<Regex> = OnceLock::new();
    RX.get_or_init(|| Regex::new(r"^([A-Z]): (.*)$").unwrap())
}

fn id_rx() -> &'static Regex {
    static RX: OnceLock<Regex> = OnceLock::new();
    RX.get_or_init(|| {
        Regex::new(r"Bus=([0-9a-fA-F]+) Vendor=([0-9a-fA-F]+) Product=([0-9a-fA-F]+) Version=([0-9a-fA-F]+)$")
            .unwrap()
    })
}

fn name_rx() -> &'static Regex {
    static RX: OnceLock<Regex> = OnceLock::new();
    RX.get_or_init(|| Regex::new(r#"^Name="(.*)"$"#).unwrap())
}

fn kv_rx() -> &'static Regex {
    static RX: OnceLock<Regex> = OnceLock::new();
    RX.get_or_init(|| Regex::new(r"^([A-Za-z]+)=(.*)$").unwrap())
}

/// Split the listing into blank-line-delimited blocks of non-blank
/// lines, preserving line order within each block.
pub fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Parse one device block.
///
/// Lines are classified by their leading letter: `I` carries the
/// bus/vendor/product/version quadruple (hex tokens), `N` the quoted
/// name, `H` the handler list, and anything else is a generic
/// `key=value` capture. Lines that fail to match are skipped; the
/// kernel format is not versioned and fields may be absent.
pub fn parse_block(lines: &[&str]) -> Device {
    let mut dev = Device::new();
    for line in lines {
        let Some(caps) = line_rx().captures(line) else {
            log::debug!("skipping unrecognized line: {}", line);
            continue;
        };
        let rest = caps.get(2).map_or("", |m| m.as_str());
        match &caps[1] {
            "I" => {
                if let Some(id) = id_rx().captures(rest) {
                    dev.bus = parse_hex(&id[1]);
                    dev.vendor = parse_hex(&id[2]);
                    dev.product = parse_hex(&id[3]);
                    dev.version = parse_hex(&id[4]);
                } else {
                    log::debug!("unparseable I line: {}", rest);
                }
            }
            "N" => {
                if let Some(name) = name_rx().captures(rest) {
                    dev.name = Some(name[1].to_string());
                }
            }
            "H" => {
                if let Some(kv) = kv_rx().captures(rest) {
                    dev.handlers = kv[2].split_whitespace().map(str::to_string).collect();
                }
            }
            _ => {
                if let Some(kv) = kv_rx().captures(rest) {
                    dev.fields.insert(kv[1].to_string(), kv[2].to_string());
                }
            }
        }
    }
    dev
}

/// Parse the full devices listing into an ordered device list.
pub fn parse_devices(text: &str) -> Vec<Device> {
    split_blocks(text)
        .iter()
        .map(|block| parse_block(block))
        .collect()
}

fn parse_hex(token: &str) -> Option<u32> {
    u32::from_str_radix(token, 16).ok()
}
