use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

const FAN_OUT: u16 = 256;

impl Repository {
    pub fn init_db(&mut self) -> anyhow::Result<()> {
        let dircache = self.dircache_path();
        fs::create_dir_all(&dircache)
            .with_context(|| format!("Unable to create {}", dircache.display()))?;

        let objects_path = self.database().objects_path().to_path_buf();
        if let Some(objects_override) = self.objects_override() {
            if objects_override.is_dir() {
                writeln!(
                    self.writer(),
                    "Using shared object storage in {}",
                    objects_override.display()
                )?;
                return Ok(());
            }

            writeln!(
                self.error_writer(),
                "object directory {} does not exist, creating it",
                objects_override.display()
            )?;
        } else {
            writeln!(self.error_writer(), "defaulting to private storage area")?;
        }

        for fan_out in 0..FAN_OUT {
            let fan_out_path = objects_path.join(format!("{fan_out:02x}"));
            fs::create_dir_all(&fan_out_path)
                .with_context(|| format!("Unable to create {}", fan_out_path.display()))?;
        }
        tracing::debug!(objects = %objects_path.display(), "created object directories");

        writeln!(
            self.writer(),
            "Initialized empty dircache in {}",
            dircache.display()
        )?;

        Ok(())
    }
}
