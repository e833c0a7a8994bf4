//! demo_durations - Episode duration statistics grouped by category.
//!
//! This demo reads a podcast feed and reports how many episodes carry a
//! duration, along with the total, average and standard deviation of those
//! durations. Episodes are grouped by their first category; episodes without
//! one are grouped under `(none)`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example demo_durations <feed.xml>
//! ```
//!
//! # Output
//!
//! The output is a formatted table with columns:
//! - Category: Episode category
//! - Count: Number of episodes with a duration
//! - Total: Total duration as `h:mm:ss`
//! - Average: Average duration in seconds
//! - StdDev: Standard deviation in seconds

use std::collections::BTreeMap;
use std::env;

use podcast_feed_rs::{parse_file, ParserConfig};

/// Statistics accumulator for a group of episodes.
#[derive(Default)]
struct DurationStats {
    count: u64,
    sum: u64,
    sum_of_squares: f64,
}

impl DurationStats {
    fn add(&mut self, seconds: u64) {
        self.count += 1;
        self.sum = self.sum.saturating_add(seconds);
        self.sum_of_squares += (seconds as f64).powi(2);
    }

    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }

    fn stddev(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.average();
        let variance = self.sum_of_squares / self.count as f64 - mean.powi(2);
        // Rounding can push the variance slightly below zero
        variance.max(0.0).sqrt()
    }
}

/// Formats seconds as `h:mm:ss`.
fn format_duration(seconds: u64) -> String {
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <feed.xml>", args[0]);
        std::process::exit(1);
    }

    let podcast = match parse_file(&args[1], ParserConfig::default()) {
        Ok(podcast) => podcast,
        Err(e) => {
            eprintln!("Error parsing feed: {}", e);
            return Err(e.into());
        }
    };

    let mut stats: BTreeMap<String, DurationStats> = BTreeMap::new();

    for episode in &podcast.episodes {
        if let Some(duration) = episode.duration {
            let category = episode
                .categories
                .first()
                .cloned()
                .unwrap_or_else(|| "(none)".to_string());
            stats.entry(category).or_default().add(duration);
        }
    }

    println!(
        "{:>20}    {:>8} {:>12} {:>12} {:>12}",
        "Category", "Count", "Total", "Average", "StdDev"
    );

    for (category, s) in &stats {
        println!(
            "{:>20}    {:>8} {:>12} {:>12.1} {:>12.1}",
            category,
            s.count,
            format_duration(s.sum),
            s.average(),
            s.stddev()
        );
    }

    println!(
        "{} episodes, {} total",
        podcast.episode_count(),
        format_duration(podcast.total_duration())
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00:00");
        assert_eq!(format_duration(59), "0:00:59");
        assert_eq!(format_duration(3793), "1:03:13");
        assert_eq!(format_duration(90061), "25:01:01");
    }

    #[test]
    fn test_duration_stats_empty() {
        let stats = DurationStats::default();
        assert_eq!(stats.average(), 0.0);
        assert_eq!(stats.stddev(), 0.0);
    }

    #[test]
    fn test_duration_stats_multiple() {
        let mut stats = DurationStats::default();
        stats.add(60);
        stats.add(120);
        stats.add(180);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.sum, 360);
        assert_eq!(stats.average(), 120.0);
        let expected_stddev = (2.0_f64 * 3600.0 / 3.0).sqrt();
        assert!((stats.stddev() - expected_stddev).abs() < 0.001);
    }

    #[test]
    fn test_duration_stats_saturates() {
        let mut stats = DurationStats::default();
        stats.add(u64::MAX);
        stats.add(5);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.sum, u64::MAX);
    }
}
