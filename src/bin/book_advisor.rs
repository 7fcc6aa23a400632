//! book-advisor: ask the chat endpoint for a recommendation or search books by title
//!
//! Usage:
//!   book-advisor ask <prompt>       Send a prompt with the configured system prompt
//!   book-advisor books <title>      Search volumes by title
//!
//! Configuration is read from the environment (and `.env`); see `config::keys`.

use anyhow::Context;
use book_advisor::{BookClient, BookSettings, ChatClient, ChatSettings, ConfigResolver};

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let rest = args[2..].join(" ");
    let outcome = match args[1].as_str() {
        "ask" => cmd_ask(&rest).await,
        "books" => cmd_books(&rest).await,
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"book-advisor: chat and book search demo

USAGE:
    book-advisor <COMMAND> [ARGS]

COMMANDS:
    ask <prompt>        Send a prompt to the chat endpoint
    books <title>       Search books by title
    help                Show this help message

ENVIRONMENT:
    OPENROUTER_URL, OPENROUTER_API_KEY, OPENROUTER_MODEL, SYSTEM_PROMPT
    BASE_BOOK_URL, BOOK_API_KEY, BOOK_PRINT_TYPE, REQUEST_TIMEOUT_SECS
    RUST_LOG                    Log filter (e.g. book_advisor=debug)"#
    );
}

async fn cmd_ask(prompt: &str) -> anyhow::Result<()> {
    let resolver = ConfigResolver::from_env();
    let settings = ChatSettings::resolve(&resolver).context("loading chat settings")?;
    let client = ChatClient::new(&settings)?;

    let reply = client.get_reply(prompt).await?;
    match reply.text() {
        Some(text) => println!("{text}"),
        None => println!("{}", serde_json::to_string_pretty(&reply)?),
    }
    Ok(())
}

async fn cmd_books(title: &str) -> anyhow::Result<()> {
    if title.is_empty() {
        anyhow::bail!("a title is required");
    }
    let resolver = ConfigResolver::from_env();
    let settings = BookSettings::resolve(&resolver).context("loading book settings")?;
    let client = BookClient::new(&settings)?;

    let books = client.get_books(title).await?;
    if books.is_empty() {
        println!("No books found.");
    }
    for book in books {
        println!("{}: {}", book.author, book.title);
    }
    Ok(())
}
