use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, Identity};
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    /// Store a commit of `tree` on top of `parents` and print its ID
    ///
    /// The tree and parents are only checked to be well-formed IDs, not to exist.
    pub fn commit_tree(
        &mut self,
        tree: &str,
        parents: &[String],
        author: Identity,
        committer: Identity,
        message: String,
    ) -> anyhow::Result<()> {
        let tree = ObjectId::try_parse(tree)?;
        let parents = parents
            .iter()
            .map(|parent| ObjectId::try_parse(parent))
            .collect::<Result<Vec<_>, _>>()?;

        if parents.is_empty() {
            writeln!(self.error_writer(), "Committing initial tree {tree}")?;
        }

        let commit = Commit::new(tree, parents, author, committer, message);
        let commit_id = self
            .database()
            .store_raw(ObjectType::Commit.as_str(), &commit.serialize())?;

        writeln!(self.writer(), "{commit_id}")?;

        Ok(())
    }
}
