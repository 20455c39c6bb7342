//! Fetches a page and prints its preview metadata as JSON.
//!
//! Usage: `preview_url <URL> [DEFAULT_IMAGE]`
//!
//! Fetch settings come from `LINKPREVIEW_TIMEOUT_SECS`,
//! `LINKPREVIEW_USER_AGENT` and `LINKPREVIEW_MAX_REDIRECTS`.

use rs_linkpreview::{Extractor, FetchConfig, Options};
use std::env;
use std::error::Error;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(uri) = args.next() else {
        return Err("usage: preview_url <URL> [DEFAULT_IMAGE]".into());
    };

    let options = Options {
        default_image: args.next(),
        fetch: FetchConfig::from_env(),
        ..Options::default()
    };

    let extractor = Extractor::new(options)?;
    let metadata = extractor.fetch_blocking(&uri)?;

    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}
