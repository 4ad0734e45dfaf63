use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use turath_core::{
    BookInfoConvention, ClientConfig, ClientError, SearchOptions, SortField, TurathClient,
    DEFAULT_API_BASE_URL, DEFAULT_FILES_BASE_URL,
};

#[derive(Parser)]
#[command(name = "turath", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Query API base URL
    #[arg(long, env = "TURATH_API_URL", default_value = DEFAULT_API_BASE_URL)]
    api_url: String,

    /// Static book file base URL
    #[arg(long, env = "TURATH_FILES_URL", default_value = DEFAULT_FILES_BASE_URL)]
    files_url: String,

    /// How the book endpoint reports missing books
    #[arg(long, value_enum, default_value_t = Convention::Payload)]
    book_info_convention: Convention,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Convention {
    Payload,
    StatusCode,
}

impl From<Convention> for BookInfoConvention {
    fn from(value: Convention) -> Self {
        match value {
            Convention::Payload => BookInfoConvention::Payload,
            Convention::StatusCode => BookInfoConvention::StatusCode,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Sort {
    PageId,
}

impl From<Sort> for SortField {
    fn from(value: Sort) -> Self {
        match value {
            Sort::PageId => SortField::PageId,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print an author's biography.
    Author {
        #[arg(long)]
        id: u64,
    },
    /// Print a book's metadata and indexes.
    Book {
        #[arg(long)]
        id: u64,
    },
    /// Download the full book snapshot.
    BookFile {
        #[arg(long)]
        id: u64,
        /// Print only metadata and the page count.
        #[arg(long, default_value_t = false)]
        summary: bool,
    },
    /// Print one page of a book.
    Page {
        #[arg(long)]
        book: u64,
        #[arg(long)]
        page: u64,
    },
    /// Full-text search across the library.
    Search {
        #[arg(long)]
        query: String,
        #[arg(long)]
        author: Option<u64>,
        #[arg(long)]
        book: Option<u64>,
        #[arg(long)]
        category: Option<u64>,
        /// Result page to fetch.
        #[arg(long)]
        page: Option<u64>,
        #[arg(long)]
        precision: Option<u64>,
        #[arg(long, value_enum)]
        sort: Option<Sort>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::default()
        .with_api_base_url(&cli.api_url)
        .with_files_base_url(&cli.files_url)
        .with_book_info_convention(cli.book_info_convention.into());
    if let Some(seconds) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(seconds));
    }

    let client = TurathClient::new(config)?;
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        api_url = %cli.api_url,
        "turath boot"
    );

    let output = match cli.command {
        Command::Author { id } => serde_json::to_string_pretty(&report(client.author(id).await)?)?,
        Command::Book { id } => serde_json::to_string_pretty(&report(client.book_info(id).await)?)?,
        Command::BookFile { id, summary } => {
            let book = report(client.book_file(id).await)?;
            if summary {
                serde_json::to_string_pretty(&serde_json::json!({
                    "meta": book.meta,
                    "volumes": book.indexes.volumes,
                    "headings": book.indexes.headings.len(),
                    "pages": book.pages.len(),
                }))?
            } else {
                serde_json::to_string_pretty(&book)?
            }
        }
        Command::Page { book, page } => {
            serde_json::to_string_pretty(&report(client.page(book, page).await)?)?
        }
        Command::Search {
            query,
            author,
            book,
            category,
            page,
            precision,
            sort,
        } => {
            let options = SearchOptions {
                author,
                book,
                category,
                page,
                precision,
                sort_field: sort.map(SortField::from),
            };
            let results = report(client.search(&query, &options).await)?;
            info!(query = %query, count = results.count, returned = results.data.len(), "search finished");
            serde_json::to_string_pretty(&results)?
        }
    };

    println!("{output}");
    Ok(())
}

fn report<T>(result: Result<T, ClientError>) -> anyhow::Result<T> {
    result.map_err(|error| {
        if error.is_not_found() {
            warn!(%error, "lookup returned nothing");
        }
        anyhow::Error::new(error)
    })
}
