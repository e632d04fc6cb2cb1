use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dircache::areas::repository::Repository;
use dircache::artifacts::objects::commit::Identity;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dircache",
    version = "0.1.0",
    about = "A minimal content-addressed store with a staging index",
    long_about = "Plumbing for a tiny version control system: an object database of \
    compressed, SHA-1 addressed objects plus a checksummed index of staged files.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(long, global = true, help = "Repository root (defaults to the current directory)")]
    root: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "SHA1_FILE_DIRECTORY",
        help = "Object directory to use instead of .dircache/objects"
    )]
    objects_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init-db", about = "Initialize repository storage")]
    InitDb,
    #[command(
        name = "update-cache",
        about = "Add file contents to the cache",
        long_about = "Stores each file as a blob and records its stat metadata in the index. \
        Paths that no longer exist are removed from the index."
    )]
    UpdateCache {
        #[arg(index = 1, required = true, help = "File paths to add")]
        paths: Vec<String>,
    },
    #[command(name = "write-tree", about = "Create a tree object from the cache")]
    WriteTree,
    #[command(name = "read-tree", about = "Read and display a tree object")]
    ReadTree {
        #[arg(index = 1, help = "Tree object id")]
        sha: String,
    },
    #[command(
        name = "commit-tree",
        about = "Create a commit from a tree object",
        long_about = "Creates a commit object for the given tree. The message is read from stdin."
    )]
    CommitTree {
        #[arg(index = 1, help = "Tree object id")]
        tree: String,
        #[arg(short, long = "parent", help = "Parent commits")]
        parents: Vec<String>,
        #[command(flatten)]
        identity: IdentityArgs,
    },
    #[command(name = "cat-file", about = "Extract an object into a temporary file")]
    CatFile {
        #[arg(index = 1, help = "Object id")]
        sha: String,
    },
    #[command(name = "show-diff", about = "Compare the cache against the working tree")]
    ShowDiff,
}

#[derive(Args)]
struct IdentityArgs {
    #[arg(long, env = "COMMITTER_NAME", help = "Author name")]
    author_name: Option<String>,
    #[arg(long, env = "COMMITTER_EMAIL", help = "Author email")]
    author_email: Option<String>,
    #[arg(long, env = "COMMITTER_DATE", help = "Author date")]
    author_date: Option<String>,
}

impl IdentityArgs {
    /// Author and committer identities
    ///
    /// The committer is always the local user; the author defaults to it.
    fn resolve(self) -> (Identity, Identity) {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("LOGNAME"))
            .unwrap_or_else(|_| String::from("unknown"));
        let host = std::env::var("HOSTNAME").unwrap_or_else(|_| String::from("localhost"));

        let real_email = format!("{user}@{host}");
        let real_date = Identity::now();

        let author = Identity::new(
            self.author_name.as_deref().unwrap_or(&user),
            self.author_email.as_deref().unwrap_or(&real_email),
            self.author_date.as_deref().unwrap_or(&real_date),
        );
        let committer = Identity::new(&user, &real_email, &real_date);

        (author, committer)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let mut repository = Repository::new(
        &root,
        cli.objects_dir.as_deref(),
        Box::new(std::io::stdout()),
        Box::new(std::io::stderr()),
    )?;

    match cli.command {
        Commands::InitDb => repository.init_db()?,
        Commands::UpdateCache { paths } => repository.update_cache(&paths)?,
        Commands::WriteTree => repository.write_tree()?,
        Commands::ReadTree { sha } => repository.read_tree(&sha)?,
        Commands::CommitTree {
            tree,
            parents,
            identity,
        } => {
            let (author, committer) = identity.resolve();
            let mut message = String::new();
            std::io::stdin()
                .read_to_string(&mut message)
                .context("Unable to read the commit message")?;

            repository.commit_tree(&tree, &parents, author, committer, message)?
        }
        Commands::CatFile { sha } => repository.cat_file(&sha)?,
        Commands::ShowDiff => repository.show_diff()?,
    }

    Ok(())
}
