//! Terminal helpers shared by commands.

use std::time::{Duration, Instant};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());
    spinner
}

pub fn format_elapsed_ms(start: Instant) -> String {
    let elapsed = start.elapsed();
    if elapsed.as_secs() == 0 {
        return format!("{}ms", elapsed.as_millis());
    }
    let seconds = elapsed.as_secs();
    let remaining_ms = elapsed.subsec_millis();
    format!("{seconds}s {remaining_ms}ms")
}

/// Run `f` behind a spinner and print the success message with the elapsed time.
pub fn run_with_spinner<T, F, M>(description: &str, success_message: M, f: F) -> Result<T, String>
where
    F: FnOnce() -> Result<T, String>,
    M: FnOnce(&T) -> String,
{
    let spinner = spinner(description);
    let start = Instant::now();
    let result = f();
    spinner.finish_and_clear();
    if let Ok(value) = &result {
        println!("{} ({})", success_message(value), format_elapsed_ms(start));
    }
    result
}

/// Map a command result to an exit code, printing the error in red.
pub fn run_command<F>(f: F) -> i32
where
    F: FnOnce() -> Result<(), String>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", style(err).red());
            1
        }
    }
}
