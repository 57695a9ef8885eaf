use std::collections::HashMap;
use std::path::PathBuf;

use mapek_core::knowledge::{AdaptationRules, SpecialtyDefaults};
use mapek_core::models::section::Section;
use mapek_lambda::config::{load_rules, parse_rules, ServiceConfig, StoreKind};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn service_config_defaults() {
    let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.bucket, "mapek");
    assert_eq!(config.store, StoreKind::S3);
    assert!(config.region.is_none());
    assert!(config.rules_path.is_none());
}

#[test]
fn service_config_reads_overrides() {
    let config = ServiceConfig::from_lookup(lookup(&[
        ("MAPEK_BUCKET", "clinic-adaptation"),
        ("AWS_REGION", "us-west-2"),
        ("MAPEK_STORE", "memory"),
        ("MAPEK_RULES_PATH", "/opt/rules.json"),
    ]))
    .unwrap();
    assert_eq!(config.bucket, "clinic-adaptation");
    assert_eq!(config.region.as_deref(), Some("us-west-2"));
    assert_eq!(config.store, StoreKind::Memory);
    assert_eq!(config.rules_path, Some(PathBuf::from("/opt/rules.json")));
}

#[test]
fn unknown_store_kind_is_rejected() {
    let err = ServiceConfig::from_lookup(lookup(&[("MAPEK_STORE", "dynamo")])).unwrap_err();
    assert!(err.to_string().contains("dynamo"));
}

#[test]
fn partial_rules_file_keeps_other_defaults() {
    let rules_file = parse_rules(
        r#"{
            "config_version": 1,
            "rules": { "navigation_promote_threshold": 3 },
            "specialties": {
                "specialties": { "cardiology": ["vitals", "medications"] },
                "assignments": { "dr-heart": "cardiology" }
            }
        }"#,
    )
    .unwrap();

    assert_eq!(rules_file.rules.navigation_promote_threshold, 3);
    assert_eq!(rules_file.rules.default_window_days, 30);
    assert_eq!(
        rules_file.specialties.cold_start_sections("dr-heart"),
        Some(vec![Section::Vitals, Section::Medications])
    );
}

#[test]
fn unversioned_rules_file_is_accepted() {
    let rules_file = parse_rules("{}").unwrap();
    assert_eq!(rules_file.config_version, 1);
    assert_eq!(rules_file.rules, AdaptationRules::default());
}

#[test]
fn newer_rules_version_is_rejected() {
    let err = parse_rules(r#"{ "config_version": 2 }"#).unwrap_err();
    assert!(err.to_string().contains("newer"));
}

#[test]
fn out_of_range_values_are_rejected() {
    assert!(parse_rules(r#"{ "rules": { "accept_rate_high_density": 1.5 } }"#).is_err());
    assert!(parse_rules(r#"{ "rules": { "ignore_rate_low_density": -0.1 } }"#).is_err());
    assert!(parse_rules(r#"{ "rules": { "default_window_days": 0 } }"#).is_err());
    assert!(parse_rules(r#"{ "rules": { "risk_priority_sections": ["billing"] } }"#).is_err());
}

#[test]
fn load_rules_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("mapek-rules-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, r#"{ "rules": { "default_window_days": 14 } }"#).unwrap();

    let rules_file = load_rules(&path).unwrap();
    assert_eq!(rules_file.rules.default_window_days, 14);

    std::fs::remove_file(&path).unwrap();
    assert!(load_rules(&path).is_err());
}
