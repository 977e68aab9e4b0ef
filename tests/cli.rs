//! 命令行集成测试

use std::fs;

use assert_cmd::Command;

const PAGE: &str =
    "<html><head><title>Workflows — App</title></head><body><p>Start Workflow</p></body></html>";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("dom-i18n").unwrap();
    cmd.env_remove("DOM_I18N_LOCALE")
        .env_remove("DOM_I18N_PREFS")
        .env_remove("DOM_I18N_CONFIG")
        .env_remove("DOM_I18N_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_stdin_to_stdout_source_locale() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("prefs.json");

    let output = cmd()
        .arg("--prefs")
        .arg(&prefs)
        .arg("-")
        .write_stdin(PAGE)
        .output()
        .unwrap();
    assert!(output.status.success());

    let html = String::from_utf8(output.stdout).unwrap();
    assert!(html.contains("<p>Start Workflow</p>"));
    assert!(html.contains(">中文</button>"));
    assert!(!prefs.exists());
}

#[test]
fn test_toggle_writes_preference_and_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("prefs.json");
    let input = dir.path().join("page.html");
    fs::write(&input, PAGE).unwrap();
    let output = dir.path().join("zh.html");

    cmd()
        .arg("--prefs")
        .arg(&prefs)
        .arg("--toggle")
        .arg("--output")
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<p>发起工作流</p>"));
    assert!(html.contains("<title>工作流 — App</title>"));
    assert!(html.contains("lang=\"zh-CN\""));

    let stored = fs::read_to_string(&prefs).unwrap();
    assert!(stored.contains("\"temporal_ui_locale\": \"zh\""));

    // 再次运行时读取已保存的语言
    let output = cmd().arg("--prefs").arg(&prefs).arg(&input).output().unwrap();
    let html = String::from_utf8(output.stdout).unwrap();
    assert!(html.contains("<p>发起工作流</p>"));
}

#[test]
fn test_output_path_is_used_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("%title%.html");

    cmd()
        .arg("--prefs")
        .arg(dir.path().join("prefs.json"))
        .arg("--output")
        .arg(&output)
        .arg("-")
        .write_stdin(PAGE)
        .assert()
        .success();

    assert!(output.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_locale_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let output = cmd()
        .env("DOM_I18N_LOCALE", "zh")
        .env("DOM_I18N_PREFS", dir.path().join("prefs.json"))
        .arg("-")
        .write_stdin(PAGE)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("发起工作流"));
}

#[test]
fn test_config_file_entries() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("dom-i18n.toml");
    fs::write(
        &config,
        "[[entries]]\nsource = \"Task Queue\"\ntarget = \"任务队列\"\n",
    )
    .unwrap();

    let output = cmd()
        .arg("--prefs")
        .arg(dir.path().join("prefs.json"))
        .arg("--config")
        .arg(&config)
        .arg("--locale")
        .arg("zh")
        .arg("-")
        .write_stdin("<html><body><p>Task Queue</p></body></html>")
        .output()
        .unwrap();
    assert!(String::from_utf8(output.stdout).unwrap().contains("<p>任务队列</p>"));
}

#[test]
fn test_invalid_locale_is_rejected() {
    cmd().arg("--locale").arg("fr").arg("-").assert().failure();
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .arg("--prefs")
        .arg(dir.path().join("prefs.json"))
        .arg(dir.path().join("missing.html"))
        .assert()
        .failure();
}

#[test]
fn test_invalid_env_log_level_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = cmd()
        .env("DOM_I18N_LOG_LEVEL", "verbose")
        .arg("--log-level")
        .arg("error")
        .arg("--prefs")
        .arg(dir.path().join("prefs.json"))
        .arg("-")
        .write_stdin(PAGE)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("<p>Start Workflow</p>"));

    let output = cmd()
        .env("DOM_I18N_LOG_LEVEL", "verbose")
        .arg("--prefs")
        .arg(dir.path().join("prefs.json"))
        .arg("-")
        .write_stdin(PAGE)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("DOM_I18N_LOG_LEVEL"));
}

#[test]
fn test_env_help() {
    let output = cmd().arg("--env-help").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("DOM_I18N_PREFS"));
}
