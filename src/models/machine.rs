// Machine identity and network field models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder for "no value found". Distinct from a failed lookup.
pub const SENTINEL: &str = "-";

/// One of the eight observable snapshot fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineField {
    MachineName,
    OperatingSystem,
    #[serde(rename = "OSArchitecture")]
    OsArchitecture,
    #[serde(rename = "OSManufacturer")]
    OsManufacturer,
    #[serde(rename = "IPv4")]
    Ipv4,
    #[serde(rename = "IPv6")]
    Ipv6,
    #[serde(rename = "MACAddress")]
    MacAddress,
    SubnetMask,
}

impl MachineField {
    pub const ALL: [MachineField; 8] = [
        MachineField::MachineName,
        MachineField::OperatingSystem,
        MachineField::OsArchitecture,
        MachineField::OsManufacturer,
        MachineField::Ipv4,
        MachineField::Ipv6,
        MachineField::MacAddress,
        MachineField::SubnetMask,
    ];

    /// Name carried by change notifications.
    pub fn name(self) -> &'static str {
        match self {
            MachineField::MachineName => "MachineName",
            MachineField::OperatingSystem => "OperatingSystem",
            MachineField::OsArchitecture => "OSArchitecture",
            MachineField::OsManufacturer => "OSManufacturer",
            MachineField::Ipv4 => "IPv4",
            MachineField::Ipv6 => "IPv6",
            MachineField::MacAddress => "MACAddress",
            MachineField::SubnetMask => "SubnetMask",
        }
    }
}

impl fmt::Display for MachineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown machine field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for MachineField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MachineField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Plain value copy of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineInfo {
    pub machine_name: String,
    pub operating_system: String,
    pub os_architecture: String,
    pub os_manufacturer: String,
    pub ipv4: String,
    pub ipv6: String,
    pub mac_address: String,
    pub subnet_mask: String,
}

impl Default for MachineInfo {
    fn default() -> Self {
        Self {
            machine_name: SENTINEL.into(),
            operating_system: SENTINEL.into(),
            os_architecture: SENTINEL.into(),
            os_manufacturer: SENTINEL.into(),
            ipv4: SENTINEL.into(),
            ipv6: SENTINEL.into(),
            mac_address: SENTINEL.into(),
            subnet_mask: SENTINEL.into(),
        }
    }
}

impl MachineInfo {
    pub fn get(&self, field: MachineField) -> &str {
        match field {
            MachineField::MachineName => &self.machine_name,
            MachineField::OperatingSystem => &self.operating_system,
            MachineField::OsArchitecture => &self.os_architecture,
            MachineField::OsManufacturer => &self.os_manufacturer,
            MachineField::Ipv4 => &self.ipv4,
            MachineField::Ipv6 => &self.ipv6,
            MachineField::MacAddress => &self.mac_address,
            MachineField::SubnetMask => &self.subnet_mask,
        }
    }

    pub(crate) fn slot_mut(&mut self, field: MachineField) -> &mut String {
        match field {
            MachineField::MachineName => &mut self.machine_name,
            MachineField::OperatingSystem => &mut self.operating_system,
            MachineField::OsArchitecture => &mut self.os_architecture,
            MachineField::OsManufacturer => &mut self.os_manufacturer,
            MachineField::Ipv4 => &mut self.ipv4,
            MachineField::Ipv6 => &mut self.ipv6,
            MachineField::MacAddress => &mut self.mac_address,
            MachineField::SubnetMask => &mut self.subnet_mask,
        }
    }

    /// Fields whose values differ between `self` and `other`.
    pub fn diff(&self, other: &MachineInfo) -> Vec<MachineField> {
        MachineField::ALL
            .into_iter()
            .filter(|f| self.get(*f) != other.get(*f))
            .collect()
    }
}

/// Notification payload: which field changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyChanged {
    pub field: MachineField,
}
