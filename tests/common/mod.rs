#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::predicate;

pub const BIN: &str = "dircache";

pub fn dircache(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN).expect("binary is built");
    cmd.current_dir(dir.path()).env_remove("SHA1_FILE_DIRECTORY");
    cmd
}

pub fn init_repository() -> Result<TempDir, Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    dircache(&dir)
        .arg("init-db")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized empty dircache in"));

    Ok(dir)
}

/// First line of the command's stdout, which holds an object ID
pub fn object_id_from(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
