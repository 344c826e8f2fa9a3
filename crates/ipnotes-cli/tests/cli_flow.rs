use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use chrono::Utc;
use ipnotes_core::crypto::PayloadCipher;
use ipnotes_core::payload::NotePayload;
use ipnotes_core::EncryptionKey;
use tempfile::TempDir;

const SIGNATURE: &str = "0xabc123";
const ADDRESS: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ipnotes"))
}

struct TestEnv {
    _dir: TempDir,
    config_home: PathBuf,
    data_home: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_home = dir.path().join("config");
        let data_home = dir.path().join("data");
        std::fs::create_dir_all(&config_home).expect("create config dir");
        std::fs::create_dir_all(&data_home).expect("create data dir");
        Self {
            _dir: dir,
            config_home,
            data_home,
        }
    }

    fn config_path(&self) -> PathBuf {
        self.config_home.join("ipnotes").join("config.toml")
    }

    fn refs_path(&self) -> PathBuf {
        self.data_home.join("ipnotes").join("notes.json")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("XDG_CONFIG_HOME", &self.config_home)
            .env("XDG_DATA_HOME", &self.data_home)
            .env_remove("IPNOTES_CONFIG")
            .env_remove("IPNOTES_REFS")
            .env_remove("IPNOTES_PINNING_JWT")
            .env_remove("IPNOTES_SIGNATURE")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .stdin(Stdio::null());
        cmd
    }

    fn signed_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.env("IPNOTES_SIGNATURE", SIGNATURE);
        cmd
    }

    fn init(&self, server_url: &str) {
        let gateway = format!("{}/ipfs/{{cid}}", server_url);
        let output = self
            .command()
            .args([
                "init",
                "--address",
                ADDRESS,
                "--rpc-url",
                "http://127.0.0.1:1",
                "--pinning-endpoint",
                server_url,
                "--gateway",
                gateway.as_str(),
                "--gateway-timeout",
                "5",
            ])
            .output()
            .expect("run init");
        assert!(output.status.success(), "init failed: {}", stderr(&output));
    }

    fn write_refs(&self, cids: &[&str]) {
        let path = self.refs_path();
        std::fs::create_dir_all(path.parent().expect("refs parent")).expect("create refs dir");
        let refs: Vec<serde_json::Value> = cids
            .iter()
            .map(|cid| serde_json::json!({ "cid": cid }))
            .collect();
        std::fs::write(&path, serde_json::to_string(&refs).expect("refs json")).expect("write refs");
    }

    fn read_refs(&self) -> Vec<String> {
        read_refs_at(&self.refs_path())
    }
}

fn read_refs_at(path: &Path) -> Vec<String> {
    let contents = std::fs::read_to_string(path).expect("read refs");
    let value: serde_json::Value = serde_json::from_str(&contents).expect("refs json");
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|entry| entry["cid"].as_str().expect("cid").to_string())
        .collect()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// A payload sealed with the key for `SIGNATURE`.
fn sealed_payload(text: &str) -> String {
    let key = EncryptionKey::from_signature(SIGNATURE).expect("key");
    let sealed = PayloadCipher::new(&key).seal(text).expect("seal");
    NotePayload::new(sealed, None, Utc::now())
        .to_json()
        .expect("payload json")
}

#[test]
fn test_cli_init_writes_config() {
    let env = TestEnv::new();
    let output = env
        .command()
        .args(["init", "--address", ADDRESS])
        .output()
        .expect("run init");
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let contents = std::fs::read_to_string(env.config_path()).expect("config written");
    assert!(contents.contains("[wallet]"));
    assert!(contents.contains(ADDRESS));
    assert!(contents.contains("[gateways]"));
    assert!(stdout(&output).contains("status=ok"));

    let again = env
        .command()
        .args(["init"])
        .output()
        .expect("run init again");
    assert_eq!(again.status.code(), Some(4));
    assert!(stderr(&again).contains("--force"));
}

#[test]
fn test_cli_init_rejects_bad_gateway() {
    let env = TestEnv::new();
    let output = env
        .command()
        .args(["init", "--gateway", "https://ipfs.io/ipfs/"])
        .output()
        .expect("run init");
    assert_eq!(output.status.code(), Some(4));
    assert!(!env.config_path().exists());
}

#[test]
fn test_cli_add_list_show_roundtrip() {
    let mut server = mockito::Server::new();
    let env = TestEnv::new();
    env.init(&server.url());

    let pin = server
        .mock("POST", "/pinning/pinFileToIPFS")
        .match_header("authorization", "Bearer test-jwt")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"IpfsHash":"QmCliNote","PinSize":120,"Timestamp":"2024-01-01T00:00:00Z"}"#)
        .expect(1)
        .create();
    let fetch = server
        .mock("GET", "/ipfs/QmCliNote")
        .with_status(200)
        .with_body(sealed_payload("Shipped the release today"))
        .expect(2)
        .create();

    let add = env
        .signed_command()
        .env("IPNOTES_PINNING_JWT", "test-jwt")
        .args(["add", "--body", "Shipped the release today", "--enhance", "--no-input"])
        .output()
        .expect("run add");
    assert!(add.status.success(), "add failed: {}", stderr(&add));
    assert!(stdout(&add).contains("cid=QmCliNote"));
    assert!(stdout(&add).contains("tone="));
    pin.assert();
    assert_eq!(env.read_refs(), vec!["QmCliNote"]);

    let list = env
        .signed_command()
        .args(["list", "--json", "--no-input"])
        .output()
        .expect("run list");
    assert!(list.status.success(), "list failed: {}", stderr(&list));
    let notes: serde_json::Value = serde_json::from_str(&stdout(&list)).expect("list json");
    let notes = notes.as_array().expect("array");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["cid"], "QmCliNote");
    assert_eq!(notes[0]["status"], "decrypted");
    assert_eq!(notes[0]["content"], "Shipped the release today");

    let show = env
        .signed_command()
        .args(["show", "QmCliNote", "--no-input"])
        .output()
        .expect("run show");
    assert!(show.status.success(), "show failed: {}", stderr(&show));
    let text = stdout(&show);
    assert!(text.contains("cid=QmCliNote"));
    assert!(text.contains("Shipped the release today"));
    fetch.assert();
}

#[test]
fn test_cli_list_isolates_unreadable_notes() {
    let mut server = mockito::Server::new();
    let env = TestEnv::new();
    env.init(&server.url());
    env.write_refs(&["QmGood", "QmMissing", "QmGarbage"]);

    let _good = server
        .mock("GET", "/ipfs/QmGood")
        .with_status(200)
        .with_body(sealed_payload("still readable"))
        .create();
    let _missing = server
        .mock("GET", "/ipfs/QmMissing")
        .with_status(404)
        .create();
    let _garbage = server
        .mock("GET", "/ipfs/QmGarbage")
        .with_status(200)
        .with_body("not json at all")
        .create();

    let list = env
        .signed_command()
        .args(["list", "--json", "--no-input"])
        .output()
        .expect("run list");
    assert!(list.status.success(), "list failed: {}", stderr(&list));

    let notes: serde_json::Value = serde_json::from_str(&stdout(&list)).expect("list json");
    let notes = notes.as_array().expect("array");
    let cids: Vec<&str> = notes.iter().map(|n| n["cid"].as_str().expect("cid")).collect();
    assert_eq!(cids, vec!["QmGood", "QmMissing", "QmGarbage"]);
    assert_eq!(notes[0]["content"], "still readable");
    assert_eq!(notes[1]["status"], "failed");
    assert_eq!(notes[1]["content"], "[Error decrypting note]");
    assert_eq!(notes[2]["status"], "failed");
}

#[test]
fn test_cli_list_unlocks_through_json_rpc_wallet() {
    let mut server = mockito::Server::new();
    let env = TestEnv::new();
    let config = format!(
        "[notes]\nrefs_path = \"{}\"\n\n[wallet]\nrpc_url = \"{}\"\n\n[gateways]\nurls = [\"{}/ipfs/{{cid}}\"]\ntimeout_seconds = 5\n",
        env.refs_path().display(),
        server.url(),
        server.url()
    );
    std::fs::create_dir_all(env.config_path().parent().expect("config parent"))
        .expect("create config dir");
    std::fs::write(env.config_path(), config).expect("write config");
    env.write_refs(&["QmRpcNote"]);

    let _accounts = server
        .mock("POST", "/")
        .match_body(mockito::Matcher::PartialJson(
            serde_json::json!({ "method": "eth_accounts" }),
        ))
        .with_status(200)
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":["0xabc"]}"#)
        .create();
    let sign = server
        .mock("POST", "/")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "method": "personal_sign",
            "params": ["0x556e6c6f636b206e6f74657320666f72203078616263", "0xabc", ""]
        })))
        .with_status(200)
        .with_body(format!(r#"{{"jsonrpc":"2.0","id":2,"result":"{}"}}"#, SIGNATURE))
        .expect(1)
        .create();
    let _note = server
        .mock("GET", "/ipfs/QmRpcNote")
        .with_status(200)
        .with_body(sealed_payload("signed over rpc"))
        .create();

    let list = env
        .command()
        .args(["list", "--json", "--no-input"])
        .output()
        .expect("run list");
    assert!(list.status.success(), "list failed: {}", stderr(&list));
    assert!(stdout(&list).contains("signed over rpc"));
    sign.assert();
}

#[test]
fn test_cli_unreachable_wallet_exits_auth_failed() {
    let server = mockito::Server::new();
    let env = TestEnv::new();
    env.init(&server.url());
    env.write_refs(&["QmLocked"]);

    let list = env
        .command()
        .args(["list", "--no-input"])
        .output()
        .expect("run list");
    assert_eq!(list.status.code(), Some(5));
    assert!(stderr(&list).contains("Wallet unavailable"));
}

#[test]
fn test_cli_add_requires_pinning_token() {
    let server = mockito::Server::new();
    let env = TestEnv::new();
    env.init(&server.url());

    let add = env
        .signed_command()
        .args(["add", "--body", "hello", "--no-input"])
        .output()
        .expect("run add");
    assert_eq!(add.status.code(), Some(4));
    assert!(stderr(&add).contains("IPNOTES_PINNING_JWT"));
    assert!(!env.refs_path().exists());
}

#[test]
fn test_cli_add_rejects_blank_body() {
    let env = TestEnv::new();
    let add = env
        .signed_command()
        .env("IPNOTES_PINNING_JWT", "test-jwt")
        .args(["add", "--body", "   ", "--no-input"])
        .output()
        .expect("run add");
    assert_eq!(add.status.code(), Some(4));
}

#[test]
fn test_cli_failed_upload_keeps_refs_and_exits_network() {
    let mut server = mockito::Server::new();
    let env = TestEnv::new();
    env.init(&server.url());
    env.write_refs(&["QmExisting"]);

    let _pin = server
        .mock("POST", "/pinning/pinFileToIPFS")
        .with_status(401)
        .with_body("invalid token")
        .create();

    let add = env
        .signed_command()
        .env("IPNOTES_PINNING_JWT", "bad-jwt")
        .args(["add", "--body", "will not land", "--no-input"])
        .output()
        .expect("run add");
    assert_eq!(add.status.code(), Some(6));
    assert!(stderr(&add).contains("invalid token"));
    assert_eq!(env.read_refs(), vec!["QmExisting"]);
}

#[test]
fn test_cli_show_unavailable_note_exits_network() {
    let mut server = mockito::Server::new();
    let env = TestEnv::new();
    env.init(&server.url());

    let _missing = server
        .mock("GET", "/ipfs/QmNowhere")
        .with_status(404)
        .create();

    let show = env
        .signed_command()
        .args(["show", "QmNowhere", "--no-input"])
        .output()
        .expect("run show");
    assert_eq!(show.status.code(), Some(6));
}

#[test]
fn test_cli_refs_and_delete() {
    let env = TestEnv::new();
    env.write_refs(&["QmOne", "QmTwo"]);

    let refs = env
        .command()
        .args(["refs", "--json"])
        .output()
        .expect("run refs");
    assert!(refs.status.success(), "refs failed: {}", stderr(&refs));
    let cids: Vec<String> = serde_json::from_str(&stdout(&refs)).expect("refs json");
    assert_eq!(cids, vec!["QmOne", "QmTwo"]);

    let refused = env
        .command()
        .args(["delete", "QmOne"])
        .output()
        .expect("run delete");
    assert_eq!(refused.status.code(), Some(4));
    assert_eq!(env.read_refs(), vec!["QmOne", "QmTwo"]);

    let deleted = env
        .command()
        .args(["delete", "QmOne", "--yes"])
        .output()
        .expect("run delete");
    assert!(deleted.status.success(), "delete failed: {}", stderr(&deleted));
    assert_eq!(env.read_refs(), vec!["QmTwo"]);

    let noop = env
        .command()
        .args(["delete", "QmOne", "--yes"])
        .output()
        .expect("run delete again");
    assert!(noop.status.success());
    assert_eq!(env.read_refs(), vec!["QmTwo"]);
}

#[test]
fn test_cli_refs_flag_overrides_config() {
    let env = TestEnv::new();
    let custom = env.data_home.join("elsewhere.json");
    std::fs::write(&custom, r#"[{"cid":"QmCustom"}]"#).expect("write refs");

    let refs = env
        .command()
        .args(["--refs", custom.to_str().expect("utf8 path"), "refs"])
        .output()
        .expect("run refs");
    assert!(refs.status.success());
    assert_eq!(stdout(&refs).trim(), "QmCustom");
    assert_eq!(read_refs_at(&custom), vec!["QmCustom"]);
}

#[test]
fn test_cli_list_empty_message() {
    let env = TestEnv::new();
    let list = env
        .command()
        .args(["list", "--no-input"])
        .output()
        .expect("run list");
    assert!(list.status.success());
    assert!(stdout(&list).contains("No notes yet"));
}

#[test]
fn test_cli_enhance_reports_tone() {
    let env = TestEnv::new();
    let output = env
        .command()
        .args([
            "enhance",
            "--body",
            "I love this wonderful great day",
            "--json",
        ])
        .output()
        .expect("run enhance");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(value["tone"], "POSITIVE");
    assert!(value["stored_summary"]
        .as_str()
        .expect("summary")
        .ends_with("(Tone: POSITIVE)"));
}

#[test]
fn test_cli_doctor_without_config_warns() {
    let env = TestEnv::new();
    let output = env
        .command()
        .args(["doctor"])
        .output()
        .expect("run doctor");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("check=config warn"));
    assert!(text.contains("check=pinning warn"));
    assert!(text.contains("check=refs ok"));
    assert!(text.contains("status=ok"));
}

#[test]
fn test_cli_completions_bash() {
    let output = Command::new(bin())
        .args(["completions", "bash"])
        .output()
        .expect("run completions");
    assert!(output.status.success());
    assert!(stdout(&output).contains("ipnotes"));
}

#[test]
fn test_cli_explicit_missing_config_is_not_found() {
    let env = TestEnv::new();
    let missing = env.config_home.join("absent.toml");
    let output = env
        .command()
        .env("IPNOTES_CONFIG", &missing)
        .args(["list", "--no-input"])
        .output()
        .expect("run list");
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Config file not found"));
}
