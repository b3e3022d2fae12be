use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

pub fn overlapper() -> Command {
    let mut cmd = cargo_bin_cmd!("overlapper");
    // Keep the user's own config out of the tests
    cmd.env_remove("OVERLAPPER_CONFIG")
        .env("XDG_CONFIG_HOME", std::env::temp_dir().join("overlapper-tests-no-config"));
    cmd
}

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[allow(dead_code)]
pub fn note_json(original: &str, options: &str) -> String {
    serde_json::json!({
        "type": "Overlapping Cloze",
        "fields": {
            "Original": original,
            "Options": options,
        }
    })
    .to_string()
}
