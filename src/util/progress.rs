//! Progress indicators for long-running exports.
//!
//! Spinners draw on stderr and only when it is an interactive terminal, so
//! piped output and log capture stay clean.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{IsTerminal, stderr};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Check if we should show progress indicators.
///
/// Progress is shown only if stderr is an interactive terminal and the
/// caller did not ask for quiet output.
#[must_use]
pub fn should_show_progress(quiet: bool) -> bool {
    !quiet && stderr().is_terminal()
}

/// Create a spinner for a step of unknown length.
///
/// When `show` is false the spinner is hidden but can still be driven and
/// finished, so callers never need to branch.
///
/// # Example
/// ```ignore
/// let spinner = create_spinner("Exporting Todo", should_show_progress(false));
/// // ... write the list
/// spinner.finish_and_clear();
/// ```
#[must_use]
pub fn create_spinner(message: &str, show: bool) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    if show {
        if let Ok(style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
    } else {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    pb
}
