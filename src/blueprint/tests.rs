//! Tests for blueprint parsing.

use crate::blueprint::{Blueprint, Module, ModuleKind, ValidationLevel, is_valid_kind};
use crate::error::BlueprintError;
use crate::value::TypedValue;
use std::io::Write;
use tempfile::NamedTempFile;

const FULL: &str = r#"
blueprint_name: hpc-cluster
validation_level: WARNING
validators:
  - validator: test_project_exists
    inputs:
      project_id: ((var.project_id))
vars:
  project_id: p1
  region: us-central1
  labels:
    owner: ops
deployment_groups:
  - group: primary
    modules:
      - id: network1
        source: modules/network/vpc
        outputs: [subnetwork_name]
      - id: homefs
        source: modules/file-system/filestore
        kind: terraform
        use: [network1]
        settings:
          local_mount: /home
          size_gb: 1024
  - group: packer
    modules:
      - id: image
        source: modules/packer/custom-image
        kind: packer
future_option: ignored
"#;

#[test]
fn test_parse_minimal_yaml() {
    let bp = Blueprint::from_yaml("").unwrap();

    assert_eq!(bp.validation_level, ValidationLevel::Error);
    assert!(bp.validators.is_none());
    assert!(bp.vars.is_empty());
    assert!(bp.deployment_groups.is_empty());
}

#[test]
fn test_parse_full_yaml() {
    let bp = Blueprint::from_yaml(FULL).unwrap();

    assert_eq!(bp.blueprint_name, "hpc-cluster");
    assert_eq!(bp.validation_level, ValidationLevel::Warning);
    let validators = bp.validators.as_ref().unwrap();
    assert_eq!(validators.len(), 1);
    assert_eq!(validators[0].validator, "test_project_exists");
    assert_eq!(
        validators[0].inputs.get("project_id"),
        Some(&TypedValue::from("((var.project_id))"))
    );

    assert_eq!(bp.vars.get("project_id"), Some(&TypedValue::from("p1")));
    assert!(bp.vars.get("labels").unwrap().is_object());

    assert_eq!(bp.deployment_groups.len(), 2);
    let primary = &bp.deployment_groups[0];
    assert_eq!(primary.name, "primary");
    assert_eq!(primary.modules[0].id, "network1");
    assert_eq!(primary.modules[0].outputs, vec!["subnetwork_name"]);
    assert_eq!(primary.modules[1].uses, vec!["network1"]);
    assert_eq!(
        primary.modules[1].settings.get("size_gb"),
        Some(&TypedValue::from(1024i64))
    );
    assert_eq!(bp.deployment_groups[1].modules[0].kind, "packer");
}

#[test]
fn test_module_kind_defaults_to_terraform() {
    let bp = Blueprint::from_yaml(FULL).unwrap();
    assert_eq!(bp.deployment_groups[0].modules[0].kind, "terraform");
}

#[test]
fn test_modules_iterates_in_document_order() {
    let bp = Blueprint::from_yaml(FULL).unwrap();
    let ids: Vec<(&str, &str)> = bp
        .modules()
        .map(|(g, m)| (g.name.as_str(), m.id.as_str()))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("primary", "network1"),
            ("primary", "homefs"),
            ("packer", "image")
        ]
    );
}

#[test]
fn test_parse_validation_levels() {
    for (text, level) in [
        ("ERROR", ValidationLevel::Error),
        ("WARNING", ValidationLevel::Warning),
        ("IGNORE", ValidationLevel::Ignore),
    ] {
        let bp = Blueprint::from_yaml(&format!("validation_level: {}", text)).unwrap();
        assert_eq!(bp.validation_level, level);
        assert_eq!(level.to_string(), text);
    }

    assert_eq!(ValidationLevel::from_str("warning"), Some(ValidationLevel::Warning));
    assert_eq!(ValidationLevel::from_str("loud"), None);
}

#[test]
fn test_invalid_validation_level_is_decode_error() {
    let err = Blueprint::from_yaml("validation_level: LOUD").unwrap_err();
    assert!(matches!(err, BlueprintError::Decode { .. }));
}

#[test]
fn test_decode_error_reports_line() {
    let yaml = "vars:\n  project_id: p1\ndeployment_groups: 5\n";
    let err = Blueprint::from_yaml(yaml).unwrap_err();
    match err {
        BlueprintError::Decode { line, reason } => {
            assert!(line.is_some());
            assert!(reason.contains("invalid type"), "unexpected reason: {}", reason);
        }
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[test]
fn test_module_kinds() {
    assert!(is_valid_kind("terraform"));
    assert!(is_valid_kind("packer"));
    assert!(!is_valid_kind(""));
    assert!(!is_valid_kind("ansible"));
    assert_eq!(ModuleKind::from_str("packer"), Some(ModuleKind::Packer));
}

#[test]
fn test_default_validators_follow_vars() {
    let bp = Blueprint::from_yaml("vars:\n  project_id: p1\n").unwrap();
    let names: Vec<String> = bp
        .effective_validators()
        .into_iter()
        .map(|v| v.validator)
        .collect();
    assert_eq!(names, vec!["test_project_exists"]);

    let bp = Blueprint::from_yaml(
        "vars:\n  project_id: p1\n  region: us-central1\n  zone: us-central1-a\n",
    )
    .unwrap();
    let validators = bp.effective_validators();
    let names: Vec<&str> = validators.iter().map(|v| v.validator.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "test_project_exists",
            "test_region_exists",
            "test_zone_exists",
            "test_zone_in_region"
        ]
    );
    assert_eq!(
        validators[3].inputs.get("zone"),
        Some(&TypedValue::from("((var.zone))"))
    );
}

#[test]
fn test_no_default_validators_without_project() {
    let bp = Blueprint::from_yaml("vars:\n  region: us-central1\n").unwrap();
    assert!(bp.effective_validators().is_empty());
}

#[test]
fn test_explicit_empty_validators_disable_defaults() {
    let bp = Blueprint::from_yaml("validators: []\nvars:\n  project_id: p1\n").unwrap();
    assert!(bp.effective_validators().is_empty());
}

#[test]
fn test_to_yaml_round_trip() {
    let bp = Blueprint::from_yaml(FULL).unwrap();
    let yaml = bp.to_yaml().unwrap();
    let back = Blueprint::from_yaml(&yaml).unwrap();

    assert_eq!(back.vars, bp.vars);
    assert_eq!(back.deployment_groups.len(), 2);
    assert_eq!(
        back.deployment_groups[0].modules[1].settings,
        bp.deployment_groups[0].modules[1].settings
    );
    assert!(!yaml.contains("future_option"));
}

#[test]
fn test_module_dump_is_yaml() {
    let module = Module {
        id: "network1".to_string(),
        source: "modules/network/vpc".to_string(),
        kind: "terraform".to_string(),
        ..Default::default()
    };
    let dump = module.dump();
    assert!(dump.contains("id: network1"));
    assert!(dump.contains("source: modules/network/vpc"));
}

#[test]
fn test_module_dump_omits_unmarshallable_settings() {
    let mut module = Module {
        id: "network1".to_string(),
        source: "modules/network/vpc".to_string(),
        kind: "terraform".to_string(),
        ..Default::default()
    };
    module.settings.set("mtu", f64::INFINITY).set("region", "us-central1");

    let dump = module.dump();
    assert!(dump.contains("id: network1"));
    assert!(dump.contains("# settings omitted:"));
    assert!(dump.contains("mtu"));
    assert!(!dump.contains("Module {"));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FULL.as_bytes()).unwrap();

    let bp = Blueprint::load(file.path()).unwrap();
    assert_eq!(bp.blueprint_name, "hpc-cluster");
}

#[test]
fn test_load_missing_file() {
    let err = Blueprint::load("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, BlueprintError::Io { .. }));
}
