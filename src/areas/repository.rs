use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the metadata directory under the repository root
pub const DIRCACHE_DIR: &str = ".dircache";
const OBJECTS_DIR: &str = "objects";
const INDEX_FILE: &str = "index";

/// Repository layout plus the output streams of the plumbing commands
///
/// All paths are resolved here once; the database and the index only ever see
/// absolute paths.
pub struct Repository {
    path: Box<Path>,
    objects_override: Option<Box<Path>>,
    writer: RefCell<Box<dyn std::io::Write>>,
    error_writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
}

impl Repository {
    /// Open the repository rooted at `path`
    ///
    /// `objects_dir` overrides `<root>/.dircache/objects`; a relative override is
    /// resolved against the root.
    pub fn new(
        path: &Path,
        objects_dir: Option<&Path>,
        writer: Box<dyn std::io::Write>,
        error_writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let objects_override = objects_dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| path.join(dir).into_boxed_path());
        let objects_path = objects_override
            .clone()
            .unwrap_or_else(|| path.join(DIRCACHE_DIR).join(OBJECTS_DIR).into_boxed_path());

        Ok(Repository {
            database: Database::new(objects_path),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            path: path.into_boxed_path(),
            objects_override,
            writer: RefCell::new(writer),
            error_writer: RefCell::new(error_writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dircache_path(&self) -> PathBuf {
        self.path.join(DIRCACHE_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.dircache_path().join(INDEX_FILE)
    }

    /// Objects directory set explicitly instead of the private default
    pub fn objects_override(&self) -> Option<&Path> {
        self.objects_override.as_deref()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn error_writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.error_writer.borrow_mut()
    }

    /// Load the index file
    ///
    /// Fails before touching the index when the objects directory is missing,
    /// since nothing staged could be stored or read back.
    pub fn load_index(&self) -> anyhow::Result<Index> {
        let objects_path = self.database.objects_path();
        if !objects_path.is_dir() {
            tracing::debug!(objects = %objects_path.display(), "objects directory missing");
            anyhow::bail!("no access to SHA1 file directory");
        }

        let mut index = Index::new(self.index_path().into_boxed_path());
        index.load().context("Unable to load the index")?;

        Ok(index)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }
}
