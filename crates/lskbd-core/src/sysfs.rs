// Lskbd Sysfs Layer
// Per-device enrichment from /sys and /dev/input/by-path resolution

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::device::Device;

/// Linux mandates sysfs at `/sys`; kept as a default so tests can
/// point the scanner at a scratch tree instead.
pub const SYSFS_ROOT: &str = "/sys";
/// Default root for device nodes
pub const DEV_ROOT: &str = "/dev";
/// Stable symlink directory preferred over raw event paths
pub const BY_PATH_DIR: &str = "/dev/input/by-path";

fn var_rx() -> &'static Regex {
    static RX: OnceLock<Regex> = OnceLock::new();
    RX.get_or_init(|| Regex::new(r"^(\w+)=(.+)$").unwrap())
}

/// Read an environment-style `KEY=VALUE` file into an ordered map.
///
/// A missing or unreadable file yields an empty map; these files are
/// optional and their absence is not an error.
pub fn read_vars(path: &Path) -> IndexMap<String, String> {
    let Ok(content) = fs::read_to_string(path) else {
        return IndexMap::new();
    };
    let mut vars = IndexMap::new();
    for line in content.lines() {
        if let Some(caps) = var_rx().captures(line) {
            vars.insert(caps[1].to_string(), caps[2].to_string());
        }
    }
    vars
}

/// Resolves per-device sysfs data and event-file paths.
///
/// All lookups use absolute paths built from the configured roots; the
/// working directory is never changed.
#[derive(Debug, Clone)]
pub struct SysfsScanner {
    sysfs_root: PathBuf,
    dev_root: PathBuf,
    by_path_dir: PathBuf,
}

impl Default for SysfsScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SysfsScanner {
    /// Scanner over the real `/sys` and `/dev` trees
    pub fn new() -> Self {
        Self::with_roots(SYSFS_ROOT, DEV_ROOT, BY_PATH_DIR)
    }

    /// Scanner over arbitrary roots
    pub fn with_roots(
        sysfs_root: impl Into<PathBuf>,
        dev_root: impl Into<PathBuf>,
        by_path_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sysfs_root: sysfs_root.into(),
            dev_root: dev_root.into(),
            by_path_dir: by_path_dir.into(),
        }
    }

    /// Populate `uevent` and `events` for a parsed device.
    ///
    /// Devices without a `Sysfs` field are left untouched. Missing
    /// files yield empty data, never an error.
    pub fn enrich(&self, dev: &mut Device) {
        let Some(fragment) = dev.sysfs().map(str::to_owned) else {
            return;
        };
        let sys_dir = self.sysfs_root.join(fragment.trim_start_matches('/'));
        dev.uevent = read_vars(&sys_dir.join("device").join("uevent"));
        dev.events = self.event_paths(&sys_dir);
    }

    /// `event*` subdirectories in listing order, each mapped to its
    /// device node via the `DEVNAME` of its own uevent file.
    fn event_paths(&self, sys_dir: &Path) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(sys_dir) else {
            log::debug!("cannot list {}", sys_dir.display());
            return Vec::new();
        };
        let mut events = Vec::new();
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            if !file_name.to_string_lossy().starts_with("event") {
                continue;
            }
            let vars = read_vars(&entry.path().join("uevent"));
            let Some(devname) = vars.get("DEVNAME") else {
                log::debug!("no DEVNAME under {}", entry.path().display());
                continue;
            };
            let raw = self.dev_root.join(devname.trim_start_matches('/'));
            events.push(self.prefer_by_path(&raw));
        }
        events
    }

    /// Substitute the stable by-path name when a symlink in the
    /// by-path directory resolves to the same canonical file as `raw`.
    /// No match, or an unresolvable raw path, keeps `raw` as-is.
    fn prefer_by_path(&self, raw: &Path) -> PathBuf {
        let Ok(target) = fs::canonicalize(raw) else {
            return raw.to_path_buf();
        };
        let Ok(entries) = fs::read_dir(&self.by_path_dir) else {
            return raw.to_path_buf();
        };
        for entry in entries.flatten() {
            if let Ok(resolved) = fs::canonicalize(entry.path()) {
                if resolved == target {
                    return entry.path();
                }
            }
        }
        raw.to_path_buf()
    }
}
