//! Stable Diffusion configurator CLI library
//!
//! This crate provides the interactive front end of `sdc`: it lets the user
//! pick a preset, tune generation parameters through menus and then runs the
//! image generator with the assembled command line.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`locale`]: English and Russian message catalogs
//! - [`prompt`]: The [`prompt::Prompt`] trait and its terminal implementation
//! - [`display`]: Settings table and resource listings
//! - [`editors`]: One editor per configurable field
//! - [`generation`]: Output path, confirmation, process run and report
//! - [`session`]: The menu state machine tying everything together
//!
//! # Examples
//!
//! ```bash
//! # Ask for language and preset interactively
//! sdc
//!
//! # Skip both questions
//! sdc --language en --preset portrait
//!
//! # Only show the command that would run
//! sdc --dry-run
//! ```

pub mod cli_args;
pub mod display;
pub mod editors;
pub mod generation;
pub mod locale;
pub mod prompt;
pub mod session;
