use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

struct TestEnv {
    home: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            home: TempDir::new().expect("create temp home"),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("pasteup").unwrap();
        cmd.env("HOME", self.home.path())
            .env_remove("PASTEUP_API_URL")
            .env_remove("PASTEUP_MANIFEST_URL")
            .env_remove("PASTEUP_ARTIFACT_URL");
        cmd
    }

    fn init(&self) {
        self.cmd()
            .args(["init", "--api-key", "K", "--private", "1", "--expire", "N"])
            .assert()
            .success()
            .stdout(contains("Config saved to"));
    }
}

#[test]
fn help_prints_usage() {
    TestEnv::new()
        .cmd()
        .arg("help")
        .assert()
        .success()
        .stdout(contains("show-config"))
        .stdout(contains("--expire"));
}

#[test]
fn show_config_before_init_fails_with_hint() {
    TestEnv::new()
        .cmd()
        .arg("show-config")
        .assert()
        .code(1)
        .stderr(contains("config not found"))
        .stderr(contains("pasteup init"));
}

#[test]
fn init_then_show_config_is_stable() {
    let env = TestEnv::new();
    env.init();

    let first = env.cmd().arg("show-config").assert().success().get_output().stdout.clone();
    let second = env.cmd().arg("show-config").assert().success().get_output().stdout.clone();
    assert_eq!(first, second);

    let json: Value = serde_json::from_slice(&first).expect("valid json output");
    assert_eq!(json["api_dev_key"], "K");
    assert_eq!(json["default_private"], 1);
    assert_eq!(json["default_expire"], "N");
}

#[test]
fn init_rejects_bad_visibility() {
    let env = TestEnv::new();
    env.cmd()
        .args(["init", "--api-key", "K", "--private", "public", "--expire", "N"])
        .assert()
        .code(1)
        .stderr(contains("invalid visibility"));
    assert!(!env.home.path().join(".pasteup_config.json").exists());
}

#[test]
fn up_without_content_fails() {
    let env = TestEnv::new();
    env.init();
    env.cmd()
        .arg("up")
        .assert()
        .code(1)
        .stderr(contains("either --file or --text"));
}

#[test]
fn up_with_empty_text_fails() {
    let env = TestEnv::new();
    env.init();
    env.cmd()
        .args(["up", "-t", ""])
        .assert()
        .code(1)
        .stderr(contains("either --file or --text"));
}

#[test]
fn up_with_missing_file_fails() {
    let env = TestEnv::new();
    env.init();
    env.cmd()
        .args(["up", "-f", "does-not-exist.txt"])
        .assert()
        .code(1)
        .stderr(contains("file not found"));
}

#[test]
fn up_prints_paste_url() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/api_post.php")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("api_dev_key".into(), "K".into()),
            Matcher::UrlEncoded("api_paste_code".into(), "hello".into()),
            Matcher::UrlEncoded("api_paste_name".into(), "t".into()),
            Matcher::UrlEncoded("api_paste_private".into(), "0".into()),
            Matcher::UrlEncoded("api_paste_expire_date".into(), "N".into()),
        ]))
        .with_status(200)
        .with_body("https://paste.example/abc123")
        .create();

    let env = TestEnv::new();
    env.init();
    env.cmd()
        .env("PASTEUP_API_URL", format!("{}/api/api_post.php", server.url()))
        .args(["upload", "-t", "hello", "--title", "t", "--private", "0"])
        .assert()
        .success()
        .stdout(contains("Paste created"))
        .stdout(contains("https://paste.example/abc123"));
    mock.assert();
}

#[test]
fn up_reports_api_error_body() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/api/api_post.php")
        .with_status(200)
        .with_body("Bad API request, invalid api_dev_key")
        .create();

    let env = TestEnv::new();
    env.init();
    env.cmd()
        .env("PASTEUP_API_URL", format!("{}/api/api_post.php", server.url()))
        .args(["up", "-t", "hello"])
        .assert()
        .code(1)
        .stderr(contains("Bad API request, invalid api_dev_key"));
}

#[test]
fn up_without_init_never_calls_the_api() {
    let mut server = Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();

    let env = TestEnv::new();
    env.cmd()
        .env("PASTEUP_API_URL", server.url())
        .args(["up", "-t", "hello"])
        .assert()
        .code(1)
        .stderr(contains("pasteup init"));
    mock.assert();
}

#[test]
fn update_reports_unreachable_manifest() {
    let mut server = Server::new();
    let _mock = server.mock("GET", "/latest.toml").with_status(404).create();

    TestEnv::new()
        .cmd()
        .env("PASTEUP_MANIFEST_URL", format!("{}/latest.toml", server.url()))
        .arg("update")
        .assert()
        .code(1)
        .stderr(contains("failed to fetch release"));
}

#[test]
fn update_when_current_is_a_no_op() {
    let mut server = Server::new();
    let _manifest = server
        .mock("GET", "/latest.toml")
        .with_body(format!("version = \"{}\"\n", env!("CARGO_PKG_VERSION")))
        .create();
    let artifact = server.mock("GET", "/pasteup").expect(0).create();

    TestEnv::new()
        .cmd()
        .env("PASTEUP_MANIFEST_URL", format!("{}/latest.toml", server.url()))
        .env("PASTEUP_ARTIFACT_URL", format!("{}/pasteup", server.url()))
        .arg("update")
        .assert()
        .success()
        .stdout(contains("latest version"));
    artifact.assert();
}

#[test]
fn version_flag_prints_crate_version() {
    TestEnv::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}
