use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const CI_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS", "JENKINS_URL"];

fn in_ci(env: impl Fn(&str) -> bool) -> bool {
    CI_VARS.iter().any(|name| env(name))
}

/// Spinner shown while an introspection request to `url` is in flight.
///
/// `None` when progress output is off. Under CI the bar exists but draws
/// nothing, so callers don't need to branch on it.
pub fn fetch_spinner(url: &str, enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }

    let pb = if in_ci(|name| std::env::var_os(name).is_some()) {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Fetching schema from {url}..."));
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}
