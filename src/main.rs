// ============================================================
// File: main.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 22, 2025
//
// Description:
//   Entry point for the catalog index program.
//   Loads the record file named by the configuration, sorts
//   it, and hands a session to the command loop in `lib.rs`.
//
//   Command responses go to standard output; diagnostics go
//   through `tracing` to standard error (`RUST_LOG` overrides
//   the default `bookindex=info` filter).
// ============================================================
use bookindex::{Config, Session, load_or_empty, repl_loop};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;


/// Entry point for the catalog index.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bookindex=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    info!(
        data_file = %config.data_file.display(),
        codec = ?config.codec,
        collation = ?config.collation,
        "starting catalog index"
    );

    println!("Book Catalog Index");

    // Store outlives the session borrowing it
    let store = load_or_empty(&config.data_file);
    let mut session = Session::new(&store, config.key_context());

    repl_loop(&mut session, config.tree_key);
}
