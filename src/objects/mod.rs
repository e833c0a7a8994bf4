//! Feed object types.
//!
//! This module contains the records a parse produces:
//!
//! - [`Podcast`] - The channel-level result, with its [`Owner`] and [`Description`]
//! - [`Episode`] - One `item` entry
//! - [`Enclosure`] - An episode's media asset
//!
//! Also provides the value coercions used to populate them (dates, durations,
//! languages and flags).

mod common;
mod episode;
mod podcast;

pub use common::{
    normalize_language, parse_duration, parse_explicit, parse_integer, parse_timestamp,
};
pub use episode::{Enclosure, Episode};
pub use podcast::{Description, Owner, Podcast};
