// Linux-specific helpers: /etc/os-release, sysfs hardware addresses.

use std::io;

#[cfg(target_os = "linux")]
const OS_RELEASE_PATHS: [&str; 2] = ["/etc/os-release", "/usr/lib/os-release"];

/// Contents of the os-release file, or `None` when no such file exists.
pub(super) fn read_os_release() -> io::Result<Option<String>> {
    #[cfg(target_os = "linux")]
    {
        for path in OS_RELEASE_PATHS {
            match std::fs::read_to_string(path) {
                Ok(content) => return Ok(Some(content)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }
    #[cfg(not(target_os = "linux"))]
    {
        Ok(None)
    }
}

/// Value of `key` in os-release content, unquoted. Empty values count as absent.
pub(super) fn os_release_value(content: &str, key: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let v = line.trim().strip_prefix(key)?.strip_prefix('=')?;
        let v = v.trim().trim_matches(|c| c == '"' || c == '\'');
        if v.is_empty() {
            None
        } else {
            Some(v.to_string())
        }
    })
}

/// Hardware address from /sys/class/net/<interface>/address (Linux).
pub(super) fn read_sysfs_mac(interface_name: &str) -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{}/address", interface_name);
        let content = std::fs::read_to_string(path).ok()?;
        normalize_mac(content.trim())
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = interface_name;
        None
    }
}

/// Uppercase colon-separated form; the all-zero address counts as absent.
pub(super) fn normalize_mac(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.split([':', '-']).all(|octet| octet.chars().all(|c| c == '0')) {
        return None;
    }
    Some(raw.replace('-', ":").to_uppercase())
}
