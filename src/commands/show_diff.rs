use crate::areas::repository::Repository;
use crate::areas::workspace::FileState;
use crate::artifacts::index::index_entry::IndexEntry;
use anyhow::Context;
use std::io::Write;
use std::process::{Command, Stdio};

impl Repository {
    /// Compare every staged file with the working tree
    ///
    /// Unchanged files print `ok`; changed ones print their staged ID followed by
    /// a unified diff from the staged content to the working file.
    pub fn show_diff(&mut self) -> anyhow::Result<()> {
        let mut index = self.load_index()?;

        for entry in index.entries()? {
            self.compare_entry(entry)?;
        }

        Ok(())
    }

    fn compare_entry(&self, entry: &IndexEntry) -> anyhow::Result<()> {
        let name = String::from_utf8_lossy(entry.name());

        let stat = match self.workspace().stat_file(&name) {
            Ok(FileState::Regular(stat)) => stat,
            Ok(FileState::Missing) => {
                writeln!(self.writer(), "{name}: No such file or directory")?;
                return Ok(());
            }
            Ok(FileState::NotRegular) | Err(_) => {
                writeln!(self.writer(), "{name}: stat failed")?;
                return Ok(());
            }
        };

        let changes = entry.detect_changes(&stat);
        if changes.is_empty() {
            writeln!(self.writer(), "{name}: ok")?;
            return Ok(());
        }

        tracing::debug!(%name, ?changes, "entry changed");
        writeln!(self.writer(), "{name}:  {}", entry.oid())?;

        let staged = self.database().read(entry.oid())?;
        self.run_diff(&name, &staged.data)
    }

    fn run_diff(&self, name: &str, staged: &[u8]) -> anyhow::Result<()> {
        let mut diff = Command::new("diff")
            .arg("-u")
            .arg("-")
            .arg(name)
            .current_dir(self.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Unable to run diff")?;

        if let Some(mut stdin) = diff.stdin.take() {
            stdin
                .write_all(staged)
                .context("Unable to pass staged content to diff")?;
        }

        let output = diff.wait_with_output().context("Unable to run diff")?;
        self.writer().write_all(&output.stdout)?;
        self.writer().write_all(&output.stderr)?;

        Ok(())
    }
}
