//! # Bicorpus
//!
//! Bicorpus builds english-centric parallel corpora (english paired with spanish, french or german)
//! out of extracted Tatoeba, Europarl and ParaCrawl releases.
//!
//! Pairs are normalized on both sides, filtered on length, counted and written into
//! fixed-size shards. Word statistics and rare words are saved alongside the shards.
//!
//! This project can be used both as a tool or as a lib to integrate the normalization
//! or the whole pipeline into other projects.
//!
//! ## Getting started
//!
//! ```sh
//! bicorpus 0.1.0
//! parallel corpus generation tool.
//!
//! USAGE:
//!     bicorpus <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     help         Prints this message or the help of the given subcommand(s)
//!     normalize    Normalize text from stdin
//!     pipeline     Run pipeline
//! ```
pub mod error;
pub mod lang;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod stats;
pub mod writing;
