//! # ACADEXA CLI
//!
//! Runs voice-command text through the ACADEXA dispatcher as a given
//! principal and prints the response envelope as JSON on stdout. Logs go to
//! stderr, filtered by `ACADEXA_LOG` (or `RUST_LOG`).
//!
//! ```bash
//! acadexa --data campus.json --role student --student-id 1 show my attendance
//! ```
//!
//! With no command words, each line of stdin is run as its own command:
//!
//! ```bash
//! printf 'list courses\nshow my fees\n' | acadexa --role student --student-id 1 --compact
//! ```
//!
//! `--explain` prints the rules that accept the text instead of running it.

#![warn(missing_docs)]

mod cli;
pub use cli::*;

mod run;
pub use run::*;
