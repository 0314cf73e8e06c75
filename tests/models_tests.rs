// Model serialization and field naming tests

use ipcapture::error::{Lookup, LookupError};
use ipcapture::models::*;

#[test]
fn test_machine_info_defaults_to_sentinel() {
    let info = MachineInfo::default();
    for field in MachineField::ALL {
        assert_eq!(info.get(field), SENTINEL);
    }
}

#[test]
fn test_machine_info_serialization_camel_case() {
    let info = MachineInfo {
        machine_name: "HOST".into(),
        mac_address: "00:11:22:33:44:55".into(),
        ..MachineInfo::default()
    };
    let json = serde_json::to_string(&info).unwrap();
    assert!(json.contains("\"machineName\":\"HOST\""));
    assert!(json.contains("\"macAddress\""));
    assert!(json.contains("\"osArchitecture\":\"-\""));
    let back: MachineInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(back, info);
}

#[test]
fn test_field_names_parse_back() {
    for field in MachineField::ALL {
        assert_eq!(field.name().parse::<MachineField>().unwrap(), field);
    }
    assert_eq!("IPv4".parse::<MachineField>().unwrap(), MachineField::Ipv4);
    let err = "Hostname".parse::<MachineField>().unwrap_err();
    assert_eq!(err, UnknownField("Hostname".into()));
}

#[test]
fn test_property_changed_serializes_field_name() {
    let event = PropertyChanged {
        field: MachineField::MacAddress,
    };
    assert_eq!(
        serde_json::to_string(&event).unwrap(),
        r#"{"field":"MACAddress"}"#
    );
}

#[test]
fn test_machine_info_diff() {
    let a = MachineInfo::default();
    let b = MachineInfo {
        ipv4: "10.0.0.1".into(),
        subnet_mask: "255.0.0.0".into(),
        ..MachineInfo::default()
    };
    assert_eq!(a.diff(&b), vec![MachineField::Ipv4, MachineField::SubnetMask]);
    assert!(a.diff(&a).is_empty());
}

#[test]
fn test_lookup_error_classes() {
    let unavailable = LookupError::unavailable(
        Lookup::SubnetMask,
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );
    assert!(unavailable.is_retryable());
    assert_eq!(unavailable.lookup(), Some(Lookup::SubnetMask));
    assert_eq!(
        unavailable.to_string(),
        "subnet mask lookup failed: denied"
    );

    let invalid = LookupError::invalid_record(Lookup::MachineName, "empty");
    assert!(!invalid.is_retryable());

    let task = LookupError::Task("cancelled".into());
    assert_eq!(task.lookup(), None);
}
