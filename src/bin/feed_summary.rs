//! feed_summary - Print a summary of a podcast feed.
//!
//! This tool parses a podcast RSS feed and prints the channel metadata, the
//! category paths and one line per episode, tab-separated.
//!
//! # Usage
//!
//! ```bash
//! feed_summary [OPTIONS] <FILENAME>
//! ```
//!
//! # Examples
//!
//! ```bash
//! # Summarize a feed in document order
//! feed_summary feed.xml
//!
//! # List episodes newest first
//! feed_summary --order newest-first feed.xml
//!
//! # Print the partial result even if the feed is malformed
//! feed_summary --partial broken.xml
//! ```
//!
//! # Output
//!
//! One `key<TAB>value` line per channel field, then one
//! `category<TAB>path` line per category path, then one line per episode:
//! published time, duration in seconds, guid and title.

use std::fs;
use std::process::ExitCode;

use clap::Parser;

use podcast_feed_rs::reader::parse_partial_with_config;
use podcast_feed_rs::{DescriptionMode, EpisodeOrder, ParserConfig, Podcast};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print a summary of a podcast feed.
#[derive(Parser, Debug)]
#[command(name = "feed_summary")]
#[command(version = VERSION)]
#[command(about = "Print a summary of a podcast RSS feed")]
struct Args {
    /// Feed file to parse
    filename: String,

    /// Episode order: `document` or `newest-first`
    #[arg(long, default_value = "document")]
    order: EpisodeOrder,

    /// Description mode: `split` or `single`
    #[arg(long, default_value = "split")]
    description: DescriptionMode,

    /// Print the partial result when the feed is malformed
    #[arg(long)]
    partial: bool,

    /// Enable debug output
    ///
    /// Prints additional information about processing to stderr.
    #[arg(long)]
    debug: bool,
}

/// Formats an optional value, using `-` for missing values.
fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_summary(podcast: &Podcast) {
    println!("title\t{}", or_dash(podcast.title.as_deref()));
    println!("link\t{}", or_dash(podcast.link.as_deref()));
    println!("language\t{}", or_dash(podcast.language.as_deref()));
    println!("image\t{}", or_dash(podcast.image.as_deref()));
    println!("owner\t{}", or_dash(podcast.owner.name.as_deref()));
    println!("explicit\t{}", podcast.explicit);
    println!("updated\t{}", or_dash(podcast.updated.map(|t| t.to_rfc3339())));
    println!("ttl\t{}", or_dash(podcast.ttl));
    println!("episodes\t{}", podcast.episode_count());
    println!("total_duration\t{}", podcast.total_duration());

    for path in &podcast.categories {
        println!("category\t{}", path);
    }

    for episode in &podcast.episodes {
        println!(
            "episode\t{}\t{}\t{}\t{}",
            or_dash(episode.published.map(|t| t.to_rfc3339())),
            or_dash(episode.duration),
            or_dash(episode.guid.as_deref()),
            or_dash(episode.title.as_deref()),
        );
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.debug {
        eprintln!("Debug mode enabled");
        eprintln!("Processing: {}", args.filename);
        eprintln!("Order: {}, description: {}", args.order, args.description);
    }

    let bytes = match fs::read(&args.filename) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Unable to read '{}': {}", args.filename, e);
            return ExitCode::FAILURE;
        }
    };

    let config = ParserConfig::new()
        .with_episode_order(args.order)
        .with_description(args.description);

    match parse_partial_with_config(&bytes, config) {
        (None, podcast) => {
            print_summary(&podcast);
            ExitCode::SUCCESS
        }
        (Some(e), podcast) => {
            eprintln!("Error parsing '{}': {}", args.filename, e);
            if args.partial {
                print_summary(&podcast);
            }
            ExitCode::FAILURE
        }
    }
}
