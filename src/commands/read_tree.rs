use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use std::io::Write;

impl Repository {
    /// Print each entry of a tree object
    pub fn read_tree(&mut self, object_id: &str) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id)?;
        let object = self.database().read(&object_id)?;

        if object.object_type != ObjectType::Tree.as_str() {
            anyhow::bail!("expected a tree node");
        }

        let tree = Tree::deserialize(object.data)?;
        for entry in tree.entries() {
            writeln!(self.writer(), "{}", entry.display())?;
        }

        Ok(())
    }
}
