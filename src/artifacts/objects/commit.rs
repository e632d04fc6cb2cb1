//! Commit object
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <<email>> <date>
//! committer <name> <<email>> <date>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use derive_new::new;

/// Author or committer information
///
/// The date is kept as the already formatted text that goes into the object.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Identity {
    name: String,
    email: String,
    date: String,
}

impl Identity {
    /// Build an identity, dropping newlines and angle brackets from every field
    pub fn new(name: &str, email: &str, date: &str) -> Self {
        Identity {
            name: sanitize(name),
            email: sanitize(email),
            date: sanitize(date),
        }
    }

    /// Current local time in the `Mon Oct 19 14:03:07 2026` style
    pub fn now() -> String {
        chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
    }

    /// Format complete identity as "Name <email> date"
    pub fn display(&self) -> String {
        format!("{} <{}> {}", self.name, self.email, self.date)
    }
}

fn sanitize(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '\n' | '<' | '>')).collect()
}

#[derive(Debug, Clone, new)]
pub struct Commit {
    tree: ObjectId,
    parents: Vec<ObjectId>,
    author: Identity,
    committer: Identity,
    message: String,
}

impl Packable for Commit {
    fn serialize(&self) -> Bytes {
        let mut lines = vec![format!("tree {}", self.tree)];
        lines.extend(self.parents.iter().map(|parent| format!("parent {parent}")));
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());

        let mut content = lines.join("\n");
        content.push('\n');
        content.push_str(&self.message);

        Bytes::from(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn identity() -> Identity {
        Identity::new("Jane Doe", "jane@example.com", "Mon Oct 19 14:03:07 2026")
    }

    #[test]
    fn identity_fields_are_sanitized() {
        let identity = Identity::new("Jane\n<Doe>", "<jane@example.com>", "today\n");
        pretty_assertions::assert_eq!(identity.display(), "JaneDoe <jane@example.com> today");
    }

    #[rstest]
    fn initial_commit_has_no_parent_lines(identity: Identity) {
        let tree = ObjectId::digest(b"tree");
        let commit = Commit::new(tree, vec![], identity.clone(), identity, "first\n".into());

        pretty_assertions::assert_eq!(
            String::from_utf8(commit.serialize().to_vec()).unwrap(),
            format!(
                "tree {tree}\n\
                 author Jane Doe <jane@example.com> Mon Oct 19 14:03:07 2026\n\
                 committer Jane Doe <jane@example.com> Mon Oct 19 14:03:07 2026\n\
                 \n\
                 first\n"
            )
        );
    }

    #[rstest]
    fn parents_follow_the_tree_line(identity: Identity) {
        let tree = ObjectId::digest(b"tree");
        let parents = vec![ObjectId::digest(b"p1"), ObjectId::digest(b"p2")];
        let commit = Commit::new(tree, parents.clone(), identity.clone(), identity, String::new());

        let content = String::from_utf8(commit.serialize().to_vec()).unwrap();
        let lines = content.lines().take(3).collect::<Vec<_>>();
        pretty_assertions::assert_eq!(
            lines,
            vec![
                format!("tree {tree}"),
                format!("parent {}", parents[0]),
                format!("parent {}", parents[1]),
            ]
        );
        assert!(content.ends_with("\n\n"));
    }
}
