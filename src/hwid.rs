// Hardware identity fingerprint
//
// Derives a stable, pseudo-unique machine identifier by hashing a
// concatenation of machine-specific serials. The result is a SHA-256
// digest: non-reversible, suitable for whitelisting. It is NOT suitable
// for hardware banning; drives can be remounted and MAC addresses
// changed, which is also why the MAC component is off by default.

use log::warn;
use sha2::{Digest, Sha256};
#[cfg(target_os = "linux")]
use std::fs;
#[cfg(any(target_os = "linux", target_os = "windows"))]
use std::process::Command;

/// A machine-identifying value that can be queried from the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceClass {
    /// Motherboard / baseboard serial number.
    MotherboardSerial,
    /// Serial number of the primary fixed drive (the provider decides
    /// which drive counts as primary).
    PrimaryDriveSerial,
    /// Serial number of a specific drive, by platform device identifier
    /// (e.g. `sda` on Linux).
    DriveSerial(String),
    /// Processor identification string.
    ProcessorId,
    /// MAC address of a network interface currently in use.
    MacAddress,
}

/// Platform collaborator for serial-number retrieval.
///
/// Contract: return the queried value, or `None` when the platform cannot
/// produce it. Failures are expected and non-fatal: a missing component
/// degrades the fingerprint to fewer inputs, it never fails it. No retries.
pub trait PlatformQuery {
    fn query(&self, class: &DeviceClass) -> Option<String>;
}

/// Compute the hardware fingerprint: SHA-256 over the space-joined
/// motherboard serial, primary drive serial, and processor identifier,
/// with the MAC address appended when `include_mac` is set.
///
/// Components a provider cannot produce contribute an empty string, so a
/// machine where every query fails still yields a deterministic digest of
/// the separators alone rather than an error.
pub fn fingerprint(provider: &dyn PlatformQuery, include_mac: bool) -> [u8; 32] {
    let board = component(provider, &DeviceClass::MotherboardSerial);
    let drive = component(provider, &DeviceClass::PrimaryDriveSerial);
    let cpu = component(provider, &DeviceClass::ProcessorId);

    let mut data = format!("{} {} {}", board, drive, cpu);
    if include_mac {
        data.push_str(&component(provider, &DeviceClass::MacAddress));
    }

    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hasher.finalize().into()
}

/// [`fingerprint`] hex-encoded: the 64-character form callers typically
/// store or compare.
pub fn fingerprint_hex(provider: &dyn PlatformQuery, include_mac: bool) -> String {
    hex::encode(fingerprint(provider, include_mac))
}

fn component(provider: &dyn PlatformQuery, class: &DeviceClass) -> String {
    match provider.query(class) {
        Some(value) => value,
        None => {
            warn!("platform query {:?} unavailable, using empty component", class);
            String::new()
        }
    }
}

/// Default platform provider.
///
/// Linux reads sysfs and procfs, with `smartctl` as a fallback for drive
/// serials; Windows shells out to `wmic` and the `PROCESSOR_IDENTIFIER`
/// environment variable. Every query answers `None` on other platforms.
#[derive(Debug, Default)]
pub struct SystemQuery;

impl PlatformQuery for SystemQuery {
    #[cfg(target_os = "linux")]
    fn query(&self, class: &DeviceClass) -> Option<String> {
        match class {
            DeviceClass::MotherboardSerial => read_trimmed("/sys/class/dmi/id/board_serial"),
            DeviceClass::PrimaryDriveSerial => {
                let device = primary_block_device()?;
                self.query(&DeviceClass::DriveSerial(device))
            }
            DeviceClass::DriveSerial(device) => {
                read_trimmed(&format!("/sys/block/{}/device/serial", device))
                    .or_else(|| smartctl_serial(device))
            }
            DeviceClass::ProcessorId => cpuinfo_model(),
            DeviceClass::MacAddress => first_mac_address(),
        }
    }

    #[cfg(target_os = "windows")]
    fn query(&self, class: &DeviceClass) -> Option<String> {
        match class {
            DeviceClass::MotherboardSerial => wmic_value(&["baseboard", "get", "serialnumber"]),
            DeviceClass::PrimaryDriveSerial => wmic_value(&["diskdrive", "get", "serialnumber"]),
            DeviceClass::DriveSerial(_) => wmic_value(&["diskdrive", "get", "serialnumber"]),
            DeviceClass::ProcessorId => std::env::var("PROCESSOR_IDENTIFIER").ok(),
            DeviceClass::MacAddress => wmic_value(&["nic", "get", "macaddress"])
                .map(|mac| mac.replace(':', "-").to_uppercase()),
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    fn query(&self, _class: &DeviceClass) -> Option<String> {
        None
    }
}

#[cfg(target_os = "linux")]
fn read_trimmed(path: &str) -> Option<String> {
    let value = fs::read_to_string(path).ok()?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// First physical block device under /sys/block, skipping virtual and
/// removable-media device names.
#[cfg(target_os = "linux")]
fn primary_block_device() -> Option<String> {
    let mut names: Vec<String> = fs::read_dir("/sys/block")
        .ok()?
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !is_virtual_device(name))
        .collect();
    names.sort();
    names.into_iter().next()
}

#[cfg(target_os = "linux")]
fn is_virtual_device(name: &str) -> bool {
    const VIRTUAL_PREFIXES: &[&str] = &["loop", "ram", "zram", "dm-", "md", "sr", "fd"];
    VIRTUAL_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Fall back to smartctl for drives that do not expose a serial in sysfs.
#[cfg(target_os = "linux")]
fn smartctl_serial(device: &str) -> Option<String> {
    let output = Command::new("smartctl")
        .args(["-i", &format!("/dev/{}", device)])
        .output()
        .ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    extract_field(&stdout, "Serial Number:")
}

/// Extract a `Label: value` field from tool output.
#[cfg(target_os = "linux")]
fn extract_field(output: &str, field_name: &str) -> Option<String> {
    output
        .lines()
        .find(|line| line.trim_start().starts_with(field_name))
        .map(|line| line.trim_start()[field_name.len()..].trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(target_os = "linux")]
fn cpuinfo_model() -> Option<String> {
    let cpuinfo = fs::read_to_string("/proc/cpuinfo").ok()?;
    extract_cpuinfo_model(&cpuinfo)
}

#[cfg(target_os = "linux")]
fn extract_cpuinfo_model(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .find(|line| line.starts_with("model name"))
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// MAC of the first non-loopback interface, formatted as uppercase hex
/// pairs joined by dashes.
#[cfg(target_os = "linux")]
fn first_mac_address() -> Option<String> {
    let mut interfaces: Vec<_> = fs::read_dir("/sys/class/net")
        .ok()?
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name != "lo")
        .collect();
    interfaces.sort();

    for interface in interfaces {
        if let Some(address) = read_trimmed(&format!("/sys/class/net/{}/address", interface)) {
            if address != "00:00:00:00:00:00" {
                return Some(address.replace(':', "-").to_uppercase());
            }
        }
    }
    None
}

#[cfg(target_os = "windows")]
fn wmic_value(args: &[&str]) -> Option<String> {
    let output = Command::new("wmic").args(args).output().ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    // first line is the column header, the value follows
    stdout
        .lines()
        .skip(1)
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
