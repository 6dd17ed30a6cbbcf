//! Integration tests for the `init`, `validate` and `check` commands, driven
//! through the same argument parsing the binary uses.

use admission_audit_lib::Host;
use camino::Utf8PathBuf;

/// Test host that captures output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            exit_code: None,
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
    (dir, root)
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_init_then_validate() {
    let (_dir, root) = temp_root();
    let config = root.join("audit.toml");

    let mut host = TestHost::new();
    admission_audit_lib::run(&mut host, ["admission-audit", "init", config.as_str()]).await.unwrap();
    assert!(host.output_str().contains("Generated default configuration file"));

    let mut host = TestHost::new();
    admission_audit_lib::run(&mut host, ["admission-audit", "validate", "--config", config.as_str()])
        .await
        .unwrap();

    let output = host.output_str();
    assert!(output.contains("Configuration file is valid"), "got: {output}");
    assert!(output.contains("Rules: 2"), "got: {output}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_check_with_default_rules() {
    let (_dir, root) = temp_root();
    let config = root.join("audit.toml");
    let mut host = TestHost::new();
    admission_audit_lib::run(&mut host, ["admission-audit", "init", config.as_str()]).await.unwrap();

    let request = root.join("configmap.json");
    std::fs::write(
        &request,
        serde_json::json!({
            "apiVersion": "admission.k8s.io/v1",
            "kind": "AdmissionReview",
            "request": {
                "uid": "a1",
                "kind": {"group": "", "version": "v1", "kind": "ConfigMap"},
                "operation": "CREATE",
                "dryRun": true,
                "name": "flags",
                "object": {
                    "metadata": {"name": "flags", "uid": "cm-9"},
                    "data": {"config": "features:\n  - search\n  - billing\n"}
                }
            }
        })
        .to_string(),
    )
    .unwrap();

    let mut host = TestHost::new();
    admission_audit_lib::run(
        &mut host,
        [
            "admission-audit",
            "check",
            "--config",
            config.as_str(),
            "--error-if-failed",
            request.as_str(),
        ],
    )
    .await
    .unwrap();

    let output = host.output_str();
    assert!(output.contains("PASS   has_name"), "got: {output}");
    assert!(output.contains("PASS   embedded_yaml_is_valid"), "got: {output}");
    assert!(output.contains("validate report: not needed (dry_run)"), "got: {output}");
    assert_eq!(host.exit_code, None, "stderr: {}", host.error_str());
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_check_missing_file() {
    let (_dir, root) = temp_root();
    let config = root.join("audit.toml");
    std::fs::write(&config, "reporting = [\"validate\"]\n").unwrap();
    let missing = root.join("nope.json");

    let mut host = TestHost::new();
    admission_audit_lib::run(
        &mut host,
        [
            "admission-audit",
            "check",
            "--config",
            config.as_str(),
            "--error-if-failed",
            missing.as_str(),
        ],
    )
    .await
    .unwrap();

    assert!(host.error_str().contains("nope.json"));
    assert_eq!(host.exit_code, Some(1));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_validate_rejects_unknown_category() {
    let (_dir, root) = temp_root();
    let config = root.join("audit.toml");
    std::fs::write(&config, "reporting = [\"validate\", \"audit\"]\n").unwrap();

    let mut host = TestHost::new();
    let result = admission_audit_lib::run(&mut host, ["admission-audit", "validate", "--config", config.as_str()]).await;

    let _ = result.unwrap_err();
    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("Configuration validation failed"));
}
