//! End-to-end runs of the `vflow-index` binary against temporary repositories.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

struct Repo {
  _root: TempDir,
  workflows: PathBuf,
  modules: PathBuf,
}

impl Repo {
  fn new() -> Self {
    let root = TempDir::new().expect("create temp dir");
    let workflows = root.path().join("workflows");
    let modules = root.path().join("modules");
    fs::create_dir(&workflows).unwrap();
    fs::create_dir(&modules).unwrap();
    Self {
      _root: root,
      workflows,
      modules,
    }
  }

  fn run(&self) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vflow-index"))
      .arg(&self.workflows)
      .arg(&self.modules)
      .env("RUST_LOG", "off")
      .output()
      .expect("run vflow-index")
  }

  fn write_workflow(&self, name: &str, value: &Value) {
    fs::write(
      self.workflows.join(name),
      serde_json::to_string_pretty(value).unwrap(),
    )
    .unwrap();
  }

  fn write_module(&self, name: &str, entries: &[(&str, &str)]) {
    let mut writer = ZipWriter::new(File::create(self.modules.join(name)).unwrap());
    for (path, content) in entries {
      writer.start_file(*path, SimpleFileOptions::default()).unwrap();
      writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
  }
}

fn read_json(path: &Path) -> Value {
  serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn workflow(id: &str) -> Value {
  json!({
    "_meta": {
      "id": id,
      "name": "Hello",
      "description": "d",
      "author": "a",
      "version": "1.0.0",
      "vFlowLevel": 1
    },
    "isEnabled": true,
    "steps": []
  })
}

fn manifest(id: &str) -> String {
  json!({
    "id": id,
    "name": "Module",
    "description": "d",
    "author": "a",
    "version": "1.0.0",
    "category": "text"
  })
  .to_string()
}

#[test]
fn test_valid_workflow_is_indexed_and_sanitized() {
  let repo = Repo::new();
  repo.write_workflow("hello.json", &workflow("hello"));

  let output = repo.run();
  assert!(output.status.success());

  let index = read_json(&repo.workflows.join("index.json"));
  assert_eq!(index["version"], "1.0");
  assert_eq!(index["total_count"], 1);
  assert_eq!(index["workflows"][0]["id"], "hello");
  assert_eq!(index["workflows"][0]["vFlowLevel"], 1);

  let rewritten = read_json(&repo.workflows.join("hello.json"));
  assert_eq!(rewritten["isEnabled"], false);
  assert_eq!(rewritten["isFavorite"], false);
  assert_eq!(rewritten["wasEnabledBeforePermissionsLost"], false);

  let modules_index = read_json(&repo.modules.join("index.json"));
  assert_eq!(modules_index["total_count"], 0);
  assert_eq!(modules_index["modules"], json!([]));
}

#[test]
fn test_second_run_leaves_workflows_identical() {
  let repo = Repo::new();
  repo.write_workflow("hello.json", &workflow("hello"));

  assert!(repo.run().status.success());
  let first = fs::read(repo.workflows.join("hello.json")).unwrap();

  assert!(repo.run().status.success());
  let second = fs::read(repo.workflows.join("hello.json")).unwrap();

  assert_eq!(first, second);
}

#[test]
fn test_hand_written_workflow_keeps_its_content() {
  let repo = Repo::new();
  let source = r#"{
  "_meta": {"id": "calc", "name": "计算器", "description": "Größe", "author": "a", "version": "2.0.0", "vFlowLevel": 3},
  "precision": 123456789012345678901234567890,
  "epsilon": 1.0715660391465826e-75,
  "isFavorite": true
}"#;
  fs::write(repo.workflows.join("calc.json"), source).unwrap();

  assert!(repo.run().status.success());
  let first = fs::read_to_string(repo.workflows.join("calc.json")).unwrap();
  assert!(first.contains("123456789012345678901234567890"));
  assert!(first.contains("1.0715660391465826e-75"));
  assert!(first.contains("计算器"));

  let mut rewritten: Value = serde_json::from_str(&first).unwrap();
  let mut original: Value = serde_json::from_str(source).unwrap();
  for value in [&mut rewritten, &mut original] {
    let object = value.as_object_mut().unwrap();
    for flag in ["isEnabled", "isFavorite", "wasEnabledBeforePermissionsLost"] {
      object.remove(flag);
    }
  }
  assert_eq!(rewritten, original);

  let index = read_json(&repo.workflows.join("index.json"));
  assert_eq!(index["workflows"][0]["name"], "计算器");

  assert!(repo.run().status.success());
  assert_eq!(
    fs::read_to_string(repo.workflows.join("calc.json")).unwrap(),
    first
  );
}

#[test]
fn test_mismatched_workflow_fails_and_is_untouched() {
  let repo = Repo::new();
  let original = serde_json::to_string_pretty(&workflow("b")).unwrap();
  fs::write(repo.workflows.join("a.json"), &original).unwrap();

  let output = repo.run();
  assert_eq!(output.status.code(), Some(1));

  let index = read_json(&repo.workflows.join("index.json"));
  assert_eq!(index["total_count"], 0);
  assert_eq!(
    fs::read_to_string(repo.workflows.join("a.json")).unwrap(),
    original
  );

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("a.json: _meta.id does not match filename"));
}

#[test]
fn test_module_without_manifest_fails() {
  let repo = Repo::new();
  repo.write_module("bad.zip", &[("main.lua", "return 1")]);

  let output = repo.run();
  assert_eq!(output.status.code(), Some(1));

  let index = read_json(&repo.modules.join("index.json"));
  assert_eq!(index["total_count"], 0);
  assert!(String::from_utf8_lossy(&output.stdout).contains("bad.zip: no manifest.json entry"));
}

#[test]
fn test_entries_sorted_by_id() {
  let repo = Repo::new();
  for id in ["delta", "alpha", "charlie", "bravo"] {
    let content = manifest(id);
    repo.write_module(&format!("{id}.zip"), &[("manifest.json", content.as_str())]);
  }

  assert!(repo.run().status.success());

  let index = read_json(&repo.modules.join("index.json"));
  let ids: Vec<&str> = index["modules"]
    .as_array()
    .unwrap()
    .iter()
    .map(|e| e["id"].as_str().unwrap())
    .collect();
  assert_eq!(ids, vec!["alpha", "bravo", "charlie", "delta"]);
  assert_eq!(index["total_count"], 4);
}

#[test]
fn test_missing_directories_succeed() {
  let root = TempDir::new().unwrap();

  let output = Command::new(env!("CARGO_BIN_EXE_vflow-index"))
    .arg(root.path().join("no-workflows"))
    .arg(root.path().join("no-modules"))
    .env("RUST_LOG", "off")
    .output()
    .unwrap();

  assert!(output.status.success());
  assert!(!root.path().join("no-workflows").exists());
}

#[test]
fn test_default_directories_are_relative_to_cwd() {
  let repo = Repo::new();
  repo.write_workflow("hello.json", &workflow("hello"));
  let root = repo.workflows.parent().unwrap();

  let output = Command::new(env!("CARGO_BIN_EXE_vflow-index"))
    .current_dir(root)
    .env("RUST_LOG", "off")
    .output()
    .unwrap();

  assert!(output.status.success());
  let index = read_json(&repo.workflows.join("index.json"));
  assert_eq!(index["workflows"][0]["local_path"], "workflows/hello.json");
}

#[test]
fn test_custom_output_file() {
  let repo = Repo::new();
  repo.write_workflow("hello.json", &workflow("hello"));

  let output = Command::new(env!("CARGO_BIN_EXE_vflow-index"))
    .arg(&repo.workflows)
    .arg(&repo.modules)
    .args(["--output-file", "catalog.json"])
    .env("RUST_LOG", "off")
    .output()
    .unwrap();

  assert!(output.status.success());
  assert!(repo.workflows.join("catalog.json").exists());
  assert!(!repo.workflows.join("index.json").exists());
}
