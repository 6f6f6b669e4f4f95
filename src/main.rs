use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use bookshelf::book::{Book, BookDraft, BookId, BookPatch};
use bookshelf::client::ResourceClient;
use bookshelf::config::{Config, ConfigStore, StorageBackend};
use bookshelf::logging::init_tracing;
use bookshelf::repository;
use bookshelf::server::BookServer;
use bookshelf::ui::bootstrap::BootstrapState;
use bookshelf::ui::books::BookCollection;
use bookshelf::ui::session::BookSession;

#[derive(Parser, Debug)]
#[command(name = "bookshelf", version, about = "Book review server and client")]
struct Cli {
    /// Config file (default: <config dir>/bookshelf/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server URL for client commands.
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the API server.
    Serve {
        /// Bind address (host:port).
        #[arg(long)]
        bind: Option<String>,
        /// JSON data file.
        #[arg(long, conflicts_with = "memory")]
        data: Option<PathBuf>,
        /// Keep books in memory only.
        #[arg(long)]
        memory: bool,
        /// Directory of a built client to serve.
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// List all books.
    List,
    /// Show one book.
    Show { id: String },
    /// Add a book.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value_t = 1)]
        rating: i64,
        #[arg(long)]
        comment: String,
    },
    /// Edit fields of a book.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        rating: Option<i64>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Delete a book.
    Delete { id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from(&path)?;
    let store = ConfigStore::new(config, path);
    if let Some(url) = cli.url {
        store.update(|config| config.client.base_url = url);
    }

    match cli.command {
        Command::Serve {
            bind,
            data,
            memory,
            static_dir,
        } => {
            store.update(|config| {
                if let Some(bind) = bind {
                    config.server.bind_addr = bind;
                }
                if memory {
                    config.storage.backend = StorageBackend::Memory;
                }
                if let Some(data) = data {
                    config.storage.backend = StorageBackend::File;
                    config.storage.path = Some(data);
                }
                if static_dir.is_some() {
                    config.server.static_dir = static_dir;
                }
            });
            store.get().validate()?;
            serve(store).await?;
            Ok(ExitCode::SUCCESS)
        }
        command => run_client(&store, command).await,
    }
}

async fn serve(store: ConfigStore) -> anyhow::Result<()> {
    let repository =
        repository::open(&store.get().storage).context("Failed to open book storage")?;
    let mut server = BookServer::new(&store, repository)?;
    let addr = server.bind().await?;
    println!("Server start: http://{}", addr);
    server.run().await
}

async fn run_client(store: &ConfigStore, command: Command) -> anyhow::Result<ExitCode> {
    let client = ResourceClient::new(&store.get().client)?;
    let session = BookSession::new(client);

    if let BootstrapState::Errored { message } = session.mount().await {
        eprintln!("{}", message);
        return Ok(ExitCode::FAILURE);
    }

    let outcome = match command {
        Command::List => Ok(()),
        Command::Show { id } => {
            let book = session.fetch(&BookId::from(id)).await;
            return Ok(match book {
                Ok(book) => {
                    print_book(&book);
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("{}", err);
                    ExitCode::FAILURE
                }
            });
        }
        Command::Add {
            title,
            description,
            rating,
            comment,
        } => session
            .create(BookDraft {
                title,
                description,
                rating,
                comment,
            })
            .await
            .map(|book| println!("Added {}", book.id)),
        Command::Edit {
            id,
            title,
            description,
            rating,
            comment,
        } => {
            let patch = BookPatch {
                title,
                description,
                rating,
                comment,
            };
            session
                .update(&BookId::from(id), patch)
                .await
                .map(|book| println!("Updated {}", book.id))
        }
        Command::Delete { id } => {
            let id = BookId::from(id);
            session
                .delete(&id)
                .await
                .map(|()| println!("Deleted {}", id))
        }
        Command::Serve { .. } => anyhow::bail!("serve is not a client command"),
    };

    print_collection(&session.collection());
    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("{}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_collection(collection: &BookCollection) {
    if collection.is_empty() {
        println!("(no books)");
        return;
    }
    for book in collection {
        println!(
            "{}  {}  {}",
            book.id,
            stars(book.rating),
            book.title
        );
    }
}

fn print_book(book: &Book) {
    println!("{}", book.title);
    println!("  id:          {}", book.id);
    println!("  rating:      {}", stars(book.rating));
    println!("  description: {}", book.description);
    println!("  comment:     {}", book.comment);
    println!("  created:     {}", book.created_at.to_rfc3339());
    println!("  updated:     {}", book.updated_at.to_rfc3339());
}

fn stars(rating: i64) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_are_clamped_to_five() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
        assert_eq!(stars(-1), "☆☆☆☆☆");
    }

    #[test]
    fn edit_accepts_partial_fields() {
        let cli = Cli::parse_from(["bookshelf", "edit", "abc", "--rating", "4"]);
        match cli.command {
            Command::Edit { id, rating, title, .. } => {
                assert_eq!(id, "abc");
                assert_eq!(rating, Some(4));
                assert!(title.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn add_defaults_rating_to_one() {
        let cli = Cli::parse_from([
            "bookshelf",
            "--url",
            "http://localhost:9000",
            "add",
            "--title",
            "t",
            "--description",
            "d",
            "--comment",
            "c",
        ]);
        assert_eq!(cli.url.as_deref(), Some("http://localhost:9000"));
        assert!(matches!(cli.command, Command::Add { rating: 1, .. }));
    }
}
