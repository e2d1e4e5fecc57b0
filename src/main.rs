use std::path::PathBuf;
use std::process::ExitCode;

use glquad::config::Config;
use log::LevelFilter;

fn main() -> ExitCode {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let (config, path) = match Config::discover(explicit.as_deref()) {
        Ok(found) => found,
        Err(e) => {
            eprintln!("glquad: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = glquad::logging::init(config.level_filter().unwrap_or(LevelFilter::Info)) {
        eprintln!("glquad: {e}");
        return ExitCode::FAILURE;
    }
    match path {
        Some(path) => log::info!("Loaded config from {}", path.display()),
        None => log::info!("No config file found, using defaults"),
    }

    match glquad::demo::start(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
