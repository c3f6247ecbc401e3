//! SD Configurator Core Library
//!
//! This crate provides the core functionality for sd-configurator, a terminal
//! front end that turns a stored preset plus interactive edits into a single
//! invocation of an external image-generation executable.
//!
//! # Key Features
//!
//! - **Presets**: Load named JSON presets, keeping unrecognised keys verbatim
//! - **Configuration State**: Session-scoped working copy with typed setters
//! - **Command Building**: Deterministic, ordered argument vector for the generator
//! - **Execution**: Run the generator and capture stdout, stderr and exit code
//! - **Configuration Management**: Settings file, defaults and resource layout
//!
//! # Examples
//!
//! Listing and loading presets:
//!
//! ```no_run
//! use sd_configurator_core::config::ResourceLayout;
//! use sd_configurator_core::preset_store::PresetStore;
//!
//! let store = PresetStore::from_layout(&ResourceLayout::new("/srv/sd"));
//! for name in store.list_presets() {
//!     let preset = store.load_preset(&name)?;
//!     println!("{name}: {:?}", preset.model);
//! }
//! # Ok::<(), sd_configurator_core::error::Error>(())
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod execution;
pub mod preset;
pub mod preset_store;
pub mod state;
