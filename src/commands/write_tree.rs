use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use std::io::Write;

impl Repository {
    /// Store the index as a tree object and print its ID
    pub fn write_tree(&mut self) -> anyhow::Result<()> {
        let mut index = self.load_index()?;
        let entries = index.entries()?;

        if entries.is_empty() {
            anyhow::bail!("No file-cache to create a tree of");
        }

        if let Some(missing) = entries
            .iter()
            .find(|entry| !self.database().exists(entry.oid()))
        {
            anyhow::bail!("Missing blob {}", missing.oid());
        }

        let tree = Tree::from_index_entries(entries);
        let tree_id = self
            .database()
            .store_raw(ObjectType::Tree.as_str(), &tree.serialize())?;

        writeln!(self.writer(), "{tree_id}")?;

        Ok(())
    }
}
