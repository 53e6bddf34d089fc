//! Terminal detection for color and spinner decisions

use is_terminal::IsTerminal;
use std::env;
use std::io::{stderr, stdout};

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners often allocate a TTY without anyone watching it
    if is_ci_environment() {
        return false;
    }

    env::var("DEBIAN_FRONTEND").unwrap_or_default() != "noninteractive"
}

/// Check if the terminal understands ANSI escape codes
pub fn supports_ansi() -> bool {
    if !is_interactive() {
        return false;
    }

    let term = env::var("TERM").unwrap_or_default();
    !(term == "dumb" || term.is_empty())
}

/// Check if stderr is connected to a terminal
pub fn stderr_is_terminal() -> bool {
    stderr().is_terminal()
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "TRAVIS",
        "CIRCLECI",
        "BUILDKITE",
        "TF_BUILD",
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}

/// Spinner is drawn on stderr, so both streams have to be a terminal
pub fn should_show_progress_by_default() -> bool {
    is_interactive() && stderr_is_terminal() && supports_ansi()
}

/// Honour `NO_COLOR` on top of the configured preference
pub fn should_use_color(configured: bool) -> bool {
    configured && env::var_os("NO_COLOR").is_none() && supports_ansi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_detection() {
        // Results depend on how the tests are run
        let _ = is_ci_environment();
        let _ = is_interactive();
        let _ = supports_ansi();
        let _ = stderr_is_terminal();
        let _ = should_show_progress_by_default();
    }

    #[test]
    fn test_color_disabled_by_config() {
        assert!(!should_use_color(false));
    }
}
