use std::env;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, warn};
use sd_configurator_core::config::{get_settings_path, load_settings_file, Settings};
use sd_configurator_core::error::Result;
use sd_configurator_core::execution::SystemProcessRunner;

use sd_configurator_cli::cli_args::Args;
use sd_configurator_cli::locale::Language;
use sd_configurator_cli::prompt::TerminalPrompt;
use sd_configurator_cli::session::{Session, SessionOptions};

fn language_from_setting(code: &str) -> Language {
    let language = Language::from_code(code);
    if language.code() != code.trim().to_lowercase() {
        warn!("Unknown language `{code}`, using {}", language.native_name());
    }
    language
}

fn execute() -> Result<()> {
    let args = Args::parse();

    let settings_path = get_settings_path(&args.settings_path);
    let settings = Settings::resolve(&args.overrides(), load_settings_file(&settings_path)?);
    debug!("Resolved settings: {settings:?}");

    let options = SessionOptions {
        layout: settings.layout,
        executable: settings.executable,
        additional_args: settings.additional_args,
        preset: args.preset,
        language: settings.language.as_deref().map(language_from_setting),
        output_directory: env::current_dir()?,
        dry_run: args.dry_run,
        force: args.force,
    };

    let mut session = Session::new(TerminalPrompt::new(), SystemProcessRunner, options);
    session.run()
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
