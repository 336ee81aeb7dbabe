use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Abstraction for managing the rowguard test environment: a temp dir with a
/// schema and a deliberately dirty dataset.
struct RowguardTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl RowguardTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().to_path_buf();

        fs::write(
            root.join("schema.yaml"),
            r#"
columns:
  - name: bytes
    dtype: float
    minimum: 0.0
    non_negative: true
  - name: packets
    dtype: int
    minimum: 0.0
"#,
        )?;
        // row 0 is clean, row 1 has a negative and a fractional count,
        // row 2 has a null
        fs::write(
            root.join("rows.json"),
            r#"[
  {"bytes": 1200.0, "packets": 3},
  {"bytes": -50.0, "packets": 2.5},
  {"bytes": null, "packets": 1}
]"#,
        )?;

        Ok(Self { _tmp: tmp, root })
    }

    fn rowguard(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rowguard"));
        cmd.current_dir(&self.root);
        cmd
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[test]
fn test_validate_exits_2_on_error_severity() -> Result<()> {
    let env = RowguardTestEnv::new()?;

    // telemetry_strict rejects nulls and maps range violations to error
    env.rowguard()
        .args([
            "validate",
            "--data",
            "rows.json",
            "--schema",
            "schema.yaml",
            "--profile",
            "telemetry_strict",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error-severity"));
    Ok(())
}

#[test]
fn test_validate_clean_dataset_succeeds() -> Result<()> {
    let env = RowguardTestEnv::new()?;
    fs::write(
        env.path("clean.json"),
        r#"[{"bytes": 10.0, "packets": 1}]"#,
    )?;

    env.rowguard()
        .args([
            "validate",
            "--data",
            "clean.json",
            "--schema",
            "schema.yaml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No violations detected"));
    Ok(())
}

#[test]
fn test_validate_writes_json_report() -> Result<()> {
    let env = RowguardTestEnv::new()?;

    env.rowguard()
        .args([
            "validate",
            "--data",
            "rows.json",
            "--schema",
            "schema.yaml",
            "--out",
            "report.json",
        ])
        .assert()
        .success(); // warn-severity findings only under telemetry_safe

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(env.path("report.json"))?)?;
    assert_eq!(report["total_rows"], 3);
    assert!(report["total_violations"].as_u64().unwrap() > 0);
    Ok(())
}

#[test]
fn test_repair_round_trip_through_validate() -> Result<()> {
    let env = RowguardTestEnv::new()?;

    env.rowguard()
        .args([
            "repair",
            "--data",
            "rows.json",
            "--schema",
            "schema.yaml",
            "--out",
            "repaired.json",
            "--report",
            "repair_report.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Repair finished"));

    // the repaired dataset validates without error-severity violations
    env.rowguard()
        .args([
            "validate",
            "--data",
            "repaired.json",
            "--schema",
            "schema.yaml",
        ])
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(env.path("repair_report.json"))?)?;
    assert!(report["total_actions"].as_u64().unwrap() > 0);
    assert!(report["actions"].is_array());
    Ok(())
}

#[test]
fn test_fit_then_repair_with_state() -> Result<()> {
    let env = RowguardTestEnv::new()?;
    fs::write(
        env.path("train.json"),
        r#"[{"bytes": 100.0, "packets": 1}, {"bytes": 300.0, "packets": 3}, {"bytes": 500.0, "packets": 5}]"#,
    )?;

    env.rowguard()
        .args([
            "fit",
            "--data",
            "train.json",
            "--schema",
            "schema.yaml",
            "--out",
            "stats.json",
        ])
        .assert()
        .success();

    let stats: serde_json::Value = serde_json::from_str(&fs::read_to_string(env.path("stats.json"))?)?;
    assert_eq!(stats["impute_stats"]["bytes"], 300.0);

    env.rowguard()
        .args([
            "repair",
            "--data",
            "rows.json",
            "--schema",
            "schema.yaml",
            "--state",
            "stats.json",
            "--out",
            "repaired.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Using fitted statistics"));

    // the null byte count was imputed with the fitted median, not 0
    let repaired: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(env.path("repaired.json"))?)?;
    assert_eq!(repaired[2]["bytes"], 300.0);
    Ok(())
}

#[test]
fn test_init_schema_scaffolds_valid_yaml() -> Result<()> {
    let env = RowguardTestEnv::new()?;

    env.rowguard()
        .args(["init-schema", "--columns", "a,b,c", "--out", "starter.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 column(s)"));

    let raw = fs::read_to_string(env.path("starter.yaml"))?;
    let schema: serde_yaml::Value = serde_yaml::from_str(&raw)?;
    let columns = schema["columns"].as_sequence().unwrap();
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0]["name"], "a");

    // the scaffolded schema is directly usable
    env.rowguard()
        .args([
            "validate",
            "--data",
            "rows.json",
            "--schema",
            "starter.yaml",
        ])
        .assert()
        .code(2); // bytes/packets columns are absent -> missing_column errors
    Ok(())
}

#[test]
fn test_profiles_lists_builtins() -> Result<()> {
    let env = RowguardTestEnv::new()?;

    env.rowguard()
        .arg("profiles")
        .assert()
        .success()
        .stdout(predicate::str::contains("telemetry_safe"))
        .stdout(predicate::str::contains("telemetry_strict"))
        .stdout(predicate::str::contains("telemetry_noisy"));
    Ok(())
}

#[test]
fn test_missing_schema_fails_cleanly() -> Result<()> {
    let env = RowguardTestEnv::new()?;

    env.rowguard()
        .args([
            "validate",
            "--data",
            "rows.json",
            "--schema",
            "nope.yaml",
        ])
        .assert()
        .failure()
        .code(1);
    Ok(())
}

#[test]
fn test_unsupported_dataset_extension_is_rejected() -> Result<()> {
    let env = RowguardTestEnv::new()?;
    fs::copy(env.path("rows.json"), env.path("rows.csv"))?;

    env.rowguard()
        .args([
            "validate",
            "--data",
            "rows.csv",
            "--schema",
            "schema.yaml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported"));
    Ok(())
}
