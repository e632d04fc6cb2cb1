use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

const TEMP_FILE_PREFIX: &str = "temp_git_file_";

impl Repository {
    /// Extract an object's payload into a fresh temporary file in the root
    ///
    /// Prints `<path>: <type>`.
    pub fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id)?;
        let object = self.database().read(&object_id)?;

        let mut temp_file = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .tempfile_in(self.path())
            .context("unable to create tempfile")?;
        temp_file
            .write_all(&object.data)
            .context("unable to write tempfile")?;
        let (_, temp_path) = temp_file.keep().context("unable to keep tempfile")?;

        writeln!(
            self.writer(),
            "{}: {}",
            temp_path.display(),
            object.object_type
        )?;

        Ok(())
    }
}
