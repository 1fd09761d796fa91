use std::path::PathBuf;

use genese_core::{detect_framework, generate, write_files};
use tracing::debug;

use crate::Cli;
use crate::common::{run_command, run_with_spinner};
use crate::config::{ConfigFile, Settings};

pub fn run(cli: Cli) -> i32 {
    run_command(|| run_inner(&cli))
}

fn run_inner(cli: &Cli) -> Result<(), String> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()
            .map_err(|err| format!("Failed to determine current directory: {err}"))?,
    };

    let config = ConfigFile::discover(&project_dir, cli.config.as_deref())
        .map_err(|err| err.to_string())?;
    let settings = Settings::resolve(config, cli, project_dir);

    // An explicit framework skips package.json entirely.
    let framework = match settings.framework {
        Some(framework) => framework,
        None => detect_framework(&settings.project_dir).map_err(|err| err.to_string())?,
    };
    debug!(?settings, %framework, "Resolved settings.");

    let options = settings.into_options(framework);
    let input = options.input.clone();
    run_with_spinner(
        &format!("Generating from {}...", input.display()),
        |files: &Vec<PathBuf>| format!("✅ Generated {} files for {framework}", files.len()),
        || {
            let files = generate(&options).map_err(|err| err.to_string())?;
            write_files(&files).map_err(|err| err.to_string())?;
            Ok(files.into_iter().map(|file| file.path).collect())
        },
    )?;
    Ok(())
}
