use assert_fs::prelude::*;
use fake::Fake;
use fake::faker::lorem::en::{Word, Words};
use predicates::prelude::*;
use pretty_assertions::assert_eq;

mod common;

use common::{dircache, init_repository, object_id_from};

#[test]
fn init_db_creates_fan_out_directories() -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository()?;

    dir.child(".dircache/objects/00").assert(predicate::path::is_dir());
    dir.child(".dircache/objects/ff").assert(predicate::path::is_dir());
    dir.child(".dircache/index").assert(predicate::path::missing());

    Ok(())
}

#[test]
fn update_cache_then_write_and_read_tree() -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository()?;

    let dir_name = Word().fake::<String>();
    dir.child(&dir_name).create_dir_all()?;
    let nested = format!("{dir_name}/nested.txt");
    dir.child(&nested)
        .write_str(&Words(5..10).fake::<Vec<String>>().join(" "))?;
    dir.child("top.txt").write_str("top level")?;

    dircache(&dir)
        .arg("update-cache")
        .arg("top.txt")
        .arg(&nested)
        .assert()
        .success();
    dir.child(".dircache/index").assert(predicate::path::is_file());
    dir.child(".dircache/index.lock").assert(predicate::path::missing());

    let output = dircache(&dir).arg("write-tree").output()?;
    assert!(output.status.success());
    let tree_id = object_id_from(&output);
    assert!(predicate::str::is_match(r"^[0-9a-f]{40}$")?.eval(tree_id.as_str()));

    let listing = dircache(&dir).arg("read-tree").arg(&tree_id).output()?;
    assert!(listing.status.success());
    let listing = String::from_utf8(listing.stdout)?;
    let lines = listing.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 2);
    let mut expected = vec![nested.clone(), String::from("top.txt")];
    expected.sort();
    for (line, name) in lines.iter().zip(&expected) {
        assert!(line.starts_with("100"), "unexpected mode in {line}");
        assert!(line.contains(&format!(" {name} (")), "{line} should list {name}");
    }

    Ok(())
}

#[test]
fn write_tree_on_empty_index_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository()?;

    dircache(&dir)
        .arg("write-tree")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No file-cache to create a tree of"));

    Ok(())
}

#[test]
fn invalid_paths_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository()?;
    dir.child(".hidden").write_str("secret")?;

    dircache(&dir)
        .arg("update-cache")
        .arg(".hidden")
        .assert()
        .success()
        .stderr(predicate::str::contains("Ignoring path .hidden"));

    dircache(&dir)
        .arg("write-tree")
        .assert()
        .failure();

    Ok(())
}

#[test]
fn deleted_file_is_removed_from_index() -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository()?;
    dir.child("keep.txt").write_str("keep")?;
    dir.child("gone.txt").write_str("gone")?;

    dircache(&dir)
        .args(["update-cache", "keep.txt", "gone.txt"])
        .assert()
        .success();

    std::fs::remove_file(dir.child("gone.txt").path())?;
    dircache(&dir)
        .args(["update-cache", "gone.txt"])
        .assert()
        .success();

    let tree_id = object_id_from(&dircache(&dir).arg("write-tree").output()?);
    dircache(&dir)
        .arg("read-tree")
        .arg(&tree_id)
        .assert()
        .success()
        .stdout(predicate::str::contains("keep.txt"))
        .stdout(predicate::str::contains("gone.txt").not());

    Ok(())
}

#[test]
fn directories_cannot_be_staged() -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository()?;
    dir.child("folder").create_dir_all()?;

    dircache(&dir)
        .args(["update-cache", "folder"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a regular file"));

    Ok(())
}

#[test]
fn cat_file_extracts_payload() -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository()?;
    let content = Words(5..10).fake::<Vec<String>>().join(" ");
    dir.child("file.txt").write_str(&content)?;
    dircache(&dir)
        .args(["update-cache", "file.txt"])
        .assert()
        .success();

    let tree_id = object_id_from(&dircache(&dir).arg("write-tree").output()?);
    let listing = dircache(&dir).arg("read-tree").arg(&tree_id).output()?;
    let listing = String::from_utf8(listing.stdout)?;
    let blob_id = listing
        .trim()
        .rsplit_once('(')
        .and_then(|(_, rest)| rest.strip_suffix(')'))
        .ok_or("missing blob id")?
        .to_string();

    let output = dircache(&dir).arg("cat-file").arg(&blob_id).output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let (temp_path, object_type) = stdout.trim().rsplit_once(": ").ok_or("malformed output")?;

    assert_eq!(object_type, "blob");
    assert!(temp_path.contains("temp_git_file_"));
    assert_eq!(std::fs::read_to_string(temp_path)?, content);

    Ok(())
}

#[test]
fn cat_file_rejects_bad_and_unknown_ids() -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository()?;

    dircache(&dir)
        .args(["cat-file", "not-a-hash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid object id"));

    dircache(&dir)
        .args(["cat-file", "0123456789abcdef0123456789abcdef01234567"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    Ok(())
}

#[test]
fn commit_tree_stores_commit_object() -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository()?;
    dir.child("file.txt").write_str("content")?;
    dircache(&dir)
        .args(["update-cache", "file.txt"])
        .assert()
        .success();
    let tree_id = object_id_from(&dircache(&dir).arg("write-tree").output()?);

    let output = dircache(&dir)
        .arg("commit-tree")
        .arg(&tree_id)
        .env("COMMITTER_NAME", "Jane Doe")
        .env("COMMITTER_EMAIL", "jane@example.com")
        .env("COMMITTER_DATE", "Mon Oct 19 14:03:07 2026")
        .write_stdin("initial import\n")
        .output()?;
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr.clone())?;
    assert!(stderr.contains(&format!("Committing initial tree {tree_id}")));
    let commit_id = object_id_from(&output);

    let stdout = String::from_utf8(
        dircache(&dir)
            .arg("cat-file")
            .arg(&commit_id)
            .output()?
            .stdout,
    )?;
    let (temp_path, object_type) = stdout.trim().rsplit_once(": ").ok_or("malformed output")?;
    let commit = std::fs::read_to_string(temp_path)?;

    assert_eq!(object_type, "commit");
    assert!(commit.starts_with(&format!("tree {tree_id}\n")));
    assert!(commit.contains("\nauthor Jane Doe <jane@example.com> Mon Oct 19 14:03:07 2026\n"));
    assert!(commit.contains("\ncommitter "));
    assert!(commit.ends_with("\n\ninitial import\n"));

    let child = dircache(&dir)
        .arg("commit-tree")
        .arg(&tree_id)
        .arg("-p")
        .arg(&commit_id)
        .write_stdin("second\n")
        .output()?;
    assert!(child.status.success());
    assert!(String::from_utf8(child.stderr)?.is_empty());

    Ok(())
}

#[test]
fn commit_tree_rejects_malformed_parent() -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository()?;

    dircache(&dir)
        .args([
            "commit-tree",
            "0123456789abcdef0123456789abcdef01234567",
            "-p",
            "xyz",
        ])
        .write_stdin("msg")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid object id"));

    Ok(())
}

#[test]
fn show_diff_reports_clean_and_changed_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository()?;
    dir.child("clean.txt").write_str("unchanged\n")?;
    dir.child("dirty.txt").write_str("before\n")?;
    dircache(&dir)
        .args(["update-cache", "clean.txt", "dirty.txt"])
        .assert()
        .success();

    dircache(&dir)
        .arg("show-diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("clean.txt: ok"))
        .stdout(predicate::str::contains("dirty.txt: ok"));

    dir.child("dirty.txt").write_str("after, and longer\n")?;
    filetime::set_file_mtime(
        dir.child("dirty.txt").path(),
        filetime::FileTime::from_unix_time(1_000_000_000, 0),
    )?;

    dircache(&dir)
        .arg("show-diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("clean.txt: ok"))
        .stdout(predicate::str::is_match(r"dirty\.txt:  [0-9a-f]{40}")?)
        .stdout(predicate::str::contains("-before"))
        .stdout(predicate::str::contains("+after, and longer"));

    std::fs::remove_file(dir.child("clean.txt").path())?;
    dircache(&dir)
        .arg("show-diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("clean.txt: No such file or directory"));

    Ok(())
}

#[test]
fn shared_objects_directory_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    dir.child("shared").create_dir_all()?;

    dircache(&dir)
        .arg("init-db")
        .env("SHA1_FILE_DIRECTORY", "shared")
        .assert()
        .success();
    dir.child(".dircache/objects").assert(predicate::path::missing());

    dir.child("file.txt").write_str("content")?;
    dircache(&dir)
        .args(["update-cache", "file.txt"])
        .env("SHA1_FILE_DIRECTORY", "shared")
        .assert()
        .success();

    let stored = std::fs::read_dir(dir.child("shared").path())?.count();
    assert_eq!(stored, 1);

    Ok(())
}

#[test]
fn held_lock_fails_update_cache() -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository()?;
    dir.child("file.txt").write_str("content")?;
    dir.child(".dircache/index.lock").write_str("")?;

    dircache(&dir)
        .args(["update-cache", "file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to create new cachefile"));
    dir.child(".dircache/index").assert(predicate::path::missing());

    Ok(())
}

#[test]
fn update_cache_without_object_directory_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    dir.child("file.txt").write_str("content")?;

    dircache(&dir)
        .args(["update-cache", "file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no access to SHA1 file directory"));
    dir.child(".dircache/index").assert(predicate::path::missing());

    Ok(())
}
