//! Simple CLI that reads HTML from stdin and outputs preview metadata as JSON.
//!
//! Usage: `extract_stdin [URL] < page.html`

use rs_linkpreview::extract;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let uri = std::env::args().nth(1).unwrap_or_default();

    // Read HTML from stdin
    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let metadata = extract(&uri, &html);

    println!("{}", serde_json::to_string(&metadata).unwrap_or_default());
}
