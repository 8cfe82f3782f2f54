//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("connect-config"))
}

fn utf8(path: &std::path::Path) -> &str {
    path.to_str().expect("utf8 path")
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success().stdout(predicate::str::contains("connect-config"));
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("worker"));
}

#[test]
fn test_get_reads_file_under_root() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("config.properties"), "testKey3=testResult3\ntestKey4=testResult4")
        .expect("write");

    cmd()
        .args(["get", "config.properties", "--root", utf8(tmp.path())])
        .assert()
        .success()
        .stdout("testKey3=testResult3\ntestKey4=testResult4\n");
}

#[test]
fn test_get_filters_keys_as_json() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("config.properties"), "testKey=testResult\ntestKey2=testResult2")
        .expect("write");

    cmd()
        .args(["get", "config.properties", "--root", utf8(tmp.path()), "-k", "testKey"])
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"testKey\": \"testResult\""))
        .stdout(predicate::str::contains("testKey2").not())
        .stdout(predicate::str::contains("\"ttl\": null"));
}

#[test]
fn test_get_empty_path_prints_nothing() {
    cmd().args(["get", ""]).assert().success().stdout("");
}

#[test]
fn test_get_rejects_root_escape() {
    let tmp = TempDir::new().expect("tmp");
    let root = tmp.path().join("parent");
    fs::create_dir_all(&root).expect("mkdir");
    fs::write(tmp.path().join("outside.properties"), "secret=1").expect("write");

    cmd()
        .args(["get", "../outside.properties", "--root", utf8(&root)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Access denied"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn test_get_missing_file_fails() {
    let tmp = TempDir::new().expect("tmp");
    cmd()
        .args(["get", "missing.properties", "--root", utf8(tmp.path())])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed reading"));
}

#[test]
fn test_get_directory_kind() {
    let tmp = TempDir::new().expect("tmp");
    let secrets = tmp.path().join("secrets");
    fs::create_dir_all(&secrets).expect("mkdir");
    fs::write(secrets.join("db.password"), "hunter2").expect("write");

    cmd()
        .args(["get", "secrets", "--kind", "directory", "--root", utf8(tmp.path())])
        .assert()
        .success()
        .stdout("db.password=hunter2\n");
}

#[test]
fn test_get_named_provider_from_settings() {
    let tmp = TempDir::new().expect("tmp");
    let conf = tmp.path().join("conf");
    fs::create_dir_all(&conf).expect("mkdir");
    fs::write(conf.join("app.properties"), "mode=prod\n").expect("write");
    let settings = tmp.path().join("settings.toml");
    fs::write(
        &settings,
        format!("[providers.app]\nclass = \"file\"\nparams = {{ root = {:?} }}\n", utf8(&conf)),
    )
    .expect("write settings");

    cmd()
        .args(["get", "app.properties", "--provider", "app", "--settings", utf8(&settings)])
        .assert()
        .success()
        .stdout("mode=prod\n");
}

#[test]
fn test_get_unknown_named_provider_fails() {
    let tmp = TempDir::new().expect("tmp");
    let settings = tmp.path().join("settings.toml");
    fs::write(&settings, "").expect("write settings");

    cmd()
        .args(["get", "a.properties", "--provider", "nope", "--settings", utf8(&settings)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No provider named 'nope'"));
}

#[test]
fn test_worker_applies_overrides() {
    let tmp = TempDir::new().expect("tmp");
    let base = tmp.path().join("connect-distributed.properties");
    fs::write(&base, "bootstrap.servers=localhost:9092\ngroup.id=connect-cluster\n")
        .expect("write");

    cmd()
        .args(["worker", utf8(&base)])
        .args(["--override", "bootstrap.servers=localhost:9192"])
        .args(["--override", "plugin.path=/opt/plugins"])
        .assert()
        .success()
        .stdout(predicate::str::contains("group.id=connect-cluster"))
        .stdout(predicate::str::contains("bootstrap.servers=localhost:9192"))
        .stdout(predicate::str::contains("plugin.path=/opt/plugins"))
        .stdout(predicate::str::contains("localhost:9092").not());
}

#[test]
fn test_worker_rejects_dangling_override() {
    let tmp = TempDir::new().expect("tmp");
    let base = tmp.path().join("worker.properties");
    fs::write(&base, "group.id=connect-cluster\n").expect("write");

    cmd()
        .args(["worker", utf8(&base), "--override"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed override arguments"))
        .stdout("");
}

#[test]
fn test_worker_missing_base_file_fails() {
    let tmp = TempDir::new().expect("tmp");
    cmd()
        .args(["worker", utf8(&tmp.path().join("missing.properties"))])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to assemble worker configuration"));
}

#[test]
fn test_worker_resolve_substitutes_provider_references() {
    let tmp = TempDir::new().expect("tmp");
    let secrets = tmp.path().join("secrets");
    fs::create_dir_all(&secrets).expect("mkdir");
    fs::write(secrets.join("db.properties"), "password=hunter2\n").expect("write secrets");

    let base = tmp.path().join("worker.properties");
    fs::write(
        &base,
        format!(
            "config.providers=file\nconfig.providers.file.class=FileConfigProvider\nconfig.providers.file.param.root={}\n",
            utf8(&secrets)
        ),
    )
    .expect("write base");

    cmd()
        .args(["worker", "--resolve", utf8(&base)])
        .args(["--override", "db.password=${file:db.properties:password}"])
        .assert()
        .success()
        .stdout(predicate::str::contains("db.password=hunter2"));
}

#[test]
fn test_worker_resolve_logs_only_when_verbose() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("db.properties"), "password=hunter2\n").expect("write secrets");
    let base = tmp.path().join("worker.properties");
    fs::write(
        &base,
        format!(
            "config.providers=file\nconfig.providers.file.class=file\nconfig.providers.file.param.root={}\n",
            utf8(tmp.path())
        ),
    )
    .expect("write base");

    cmd()
        .env_remove("RUST_LOG")
        .args(["worker", "--resolve", utf8(&base)])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    cmd()
        .env_remove("RUST_LOG")
        .args(["-v", "worker", "--resolve", utf8(&base)])
        .assert()
        .success()
        .stderr(predicate::str::contains("Registered"));
}
