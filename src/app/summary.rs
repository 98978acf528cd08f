use std::time::Duration;

use crate::config::RunConfig;

use super::RunReport;

/// Fixed-point percent scale (x100).
const PERCENT_DIVISOR: u64 = 100;
/// Width of the label column.
const LABEL_WIDTH: usize = 25;

/// Renders the human-readable result block for a finished run.
///
/// All rates are computed with guarded integer math so the zero-request run
/// renders without dividing by zero.
#[must_use]
pub fn summary_lines(report: &RunReport, config: &RunConfig) -> Vec<String> {
    let stats = &report.stats;
    let mut lines = Vec::new();

    lines.push(format!(
        "{:<LABEL_WIDTH$} {}",
        "Total time:",
        format_duration(report.elapsed)
    ));
    lines.push(format!("{:<LABEL_WIDTH$} {}", "Total requests:", stats.total));
    lines.push(format!(
        "{:<LABEL_WIDTH$} {}",
        "Successful requests:", stats.successful
    ));
    lines.push(format!(
        "{:<LABEL_WIDTH$} {}",
        "Failed requests:", stats.failed
    ));

    let rps_x100 = requests_per_second_x100(stats.total, report.elapsed);
    lines.push(format!(
        "{:<LABEL_WIDTH$} {}.{:02}",
        "Requests per second:",
        rps_x100 / PERCENT_DIVISOR,
        rps_x100 % PERCENT_DIVISOR
    ));
    lines.push(format!(
        "{:<LABEL_WIDTH$} {}",
        "Average latency:",
        format_duration(stats.average_duration())
    ));
    lines.push(format!(
        "{:<LABEL_WIDTH$} {}",
        "Min latency:",
        format_duration(stats.min_duration)
    ));
    lines.push(format!(
        "{:<LABEL_WIDTH$} {}",
        "Max latency:",
        format_duration(stats.max_duration)
    ));

    if !stats.status_counts.is_empty() {
        lines.push(String::new());
        lines.push("Status code distribution:".to_owned());
        for (code, count) in &stats.status_counts {
            let share_x10 = if stats.total == 0 {
                0
            } else {
                count
                    .saturating_mul(1_000)
                    .checked_div(stats.total)
                    .unwrap_or(0)
            };
            lines.push(format!(
                "  {:<6} {:>6} requests  {:>5}.{}%",
                code,
                count,
                share_x10 / 10,
                share_x10 % 10
            ));
        }
    }

    let rate_x100 = stats.success_rate_x100();
    lines.push(String::new());
    lines.push(format!(
        "Success rate: {}.{:02}% - {}",
        rate_x100 / PERCENT_DIVISOR,
        rate_x100 % PERCENT_DIVISOR,
        grade(rate_x100)
    ));

    lines.push(String::new());
    lines.push(format!(
        "{:<LABEL_WIDTH$} {}",
        "Concurrency level:", config.concurrency
    ));
    let per_worker_x10 = per_worker_x10(stats.total, config.concurrency);
    lines.push(format!(
        "{:<LABEL_WIDTH$} {}.{}",
        "Avg. req/worker:",
        per_worker_x10 / 10,
        per_worker_x10 % 10
    ));
    lines.push(format!(
        "{:<LABEL_WIDTH$} {}",
        "Connection reuse:",
        if config.keep_alive {
            "enabled"
        } else {
            "disabled"
        }
    ));

    lines
}

fn grade(rate_x100: u64) -> &'static str {
    if rate_x100 >= 9_900 {
        "EXCELLENT"
    } else if rate_x100 >= 9_500 {
        "VERY GOOD"
    } else if rate_x100 >= 9_000 {
        "GOOD"
    } else if rate_x100 >= 8_000 {
        "FAIR"
    } else {
        "POOR"
    }
}

fn requests_per_second_x100(total: u64, elapsed: Duration) -> u64 {
    let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    if elapsed_ms == 0 {
        return 0;
    }
    total
        .saturating_mul(100_000)
        .checked_div(elapsed_ms)
        .unwrap_or(0)
}

fn per_worker_x10(total: u64, concurrency: usize) -> u64 {
    let workers = u64::try_from(concurrency).unwrap_or(u64::MAX);
    if workers == 0 {
        return 0;
    }
    total.saturating_mul(10).checked_div(workers).unwrap_or(0)
}

/// Formats a duration as milliseconds with two decimals, or seconds above
/// ten seconds.
fn format_duration(duration: Duration) -> String {
    let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
    if micros >= 10_000_000 {
        let centis = micros / 10_000;
        format!("{}.{:02}s", centis / 100, centis % 100)
    } else {
        format!("{}.{:02}ms", micros / 1_000, micros % 1_000 / 10)
    }
}
