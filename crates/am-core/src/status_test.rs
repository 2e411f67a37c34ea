use super::*;

#[test]
fn test_parse_every_status() {
    for status in AssetStatus::ALL {
        assert_eq!(status.as_str().parse::<AssetStatus>().unwrap(), status);
    }
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!(
        "deploymentrequested".parse::<AssetStatus>().unwrap(),
        AssetStatus::DeploymentRequested
    );
    assert_eq!(" RETIRED ".parse::<AssetStatus>().unwrap(), AssetStatus::Retired);
}

#[test]
fn test_parse_unknown_status() {
    let err = "Decommissioned".parse::<AssetStatus>().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("[C004]"));
    assert!(msg.contains("Decommissioned"));
    assert!(msg.contains("PurchaseRequested"));
}

#[test]
fn test_enumeration_path() {
    assert_eq!(
        AssetStatus::Deployed.enumeration_path("System.AssetStatus"),
        "System.AssetStatus.Deployed"
    );
}

#[test]
fn test_display_matches_member_name() {
    assert_eq!(AssetStatus::PurchaseRequested.to_string(), "PurchaseRequested");
}
