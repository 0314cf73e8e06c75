// Shared test helpers

#![allow(dead_code)]

use ipcapture::error::{Lookup, LookupError};
use ipcapture::models::{AdapterConfig, OsDescriptor};
use ipcapture::probe::SystemProbe;
use parking_lot::Mutex;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Which probe method should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failing {
    MachineName,
    HostName,
    Resolve,
    Adapters,
    OsDescriptors,
}

#[derive(Debug, Clone, Default)]
pub struct ProbeData {
    pub machine_name: String,
    pub host_name: String,
    pub addresses: Vec<IpAddr>,
    pub adapters: Vec<AdapterConfig>,
    pub os_records: Vec<OsDescriptor>,
}

/// In-memory probe with call counters.
#[derive(Default)]
pub struct FakeProbe {
    pub data: Mutex<ProbeData>,
    pub failing: Mutex<Option<Failing>>,
    pub resolve_calls: AtomicUsize,
    pub adapter_calls: AtomicUsize,
    pub os_calls: AtomicUsize,
}

impl FakeProbe {
    pub fn new(data: ProbeData) -> Self {
        Self {
            data: Mutex::new(data),
            ..Self::default()
        }
    }

    pub fn fail(&self, which: Failing) {
        *self.failing.lock() = Some(which);
    }

    pub fn heal(&self) {
        *self.failing.lock() = None;
    }

    fn check(&self, which: Failing, lookup: Lookup) -> Result<(), LookupError> {
        if *self.failing.lock() == Some(which) {
            return Err(LookupError::unavailable(
                lookup,
                std::io::Error::other("facility offline"),
            ));
        }
        Ok(())
    }
}

impl SystemProbe for FakeProbe {
    fn machine_name(&self) -> Result<String, LookupError> {
        self.check(Failing::MachineName, Lookup::MachineName)?;
        Ok(self.data.lock().machine_name.clone())
    }

    fn host_name(&self) -> Result<String, LookupError> {
        self.check(Failing::HostName, Lookup::Ipv4)?;
        Ok(self.data.lock().host_name.clone())
    }

    fn resolve_host(&self, _host: &str) -> Result<Vec<IpAddr>, LookupError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Failing::Resolve, Lookup::Ipv4)?;
        Ok(self.data.lock().addresses.clone())
    }

    fn adapter_configs(&self) -> Result<Vec<AdapterConfig>, LookupError> {
        self.adapter_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Failing::Adapters, Lookup::MacAddress)?;
        Ok(self.data.lock().adapters.clone())
    }

    fn os_descriptors(&self) -> Result<Vec<OsDescriptor>, LookupError> {
        self.os_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Failing::OsDescriptors, Lookup::OperatingSystem)?;
        Ok(self.data.lock().os_records.clone())
    }
}

pub fn adapter(name: &str, mac: Option<&str>, subnets: &[&str]) -> AdapterConfig {
    AdapterConfig {
        name: name.into(),
        mac_address: mac.map(String::from),
        subnets: subnets.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

/// A typical workstation: one wired and one wireless adapter, dual stack.
pub fn workstation() -> ProbeData {
    ProbeData {
        machine_name: "WORKSTATION-7".into(),
        host_name: "workstation-7".into(),
        addresses: vec![
            ip("fe80::1c2b:3a4d:5e6f:7081"),
            ip("10.0.0.17"),
            ip("2001:db8::17"),
            ip("192.168.1.17"),
        ],
        adapters: vec![
            adapter(
                "eth0",
                Some("00:1A:2B:3C:4D:5E"),
                &["255.255.255.0", "64"],
            ),
            adapter(
                "wlan0",
                Some("00:AA:BB:CC:DD:EE"),
                &["255.255.0.0", "64"],
            ),
        ],
        os_records: vec![OsDescriptor {
            caption: Some("Debian GNU/Linux 12 (bookworm)".into()),
            architecture: Some("x86_64".into()),
            manufacturer: Some("Debian GNU/Linux".into()),
        }],
    }
}
