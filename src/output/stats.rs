//! Terminal summary of a finished run

use crate::results::RunSummary;

/// Prints run statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `summary` - The summary to display
pub fn print_run_summary(summary: &RunSummary) {
    println!("=== Harvest Summary ===\n");

    println!("Overview:");
    println!("  Total URLs scanned: {}", summary.total);
    println!("  Succeeded: {}", summary.succeeded);
    println!("  Failed: {}", summary.failed);
    println!("  Total links found: {}", summary.total_links);
    println!("  Elapsed: {:.2}s", summary.elapsed.as_secs_f64());
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} URLs successfully processed)",
        summary.success_rate(),
        summary.succeeded,
        summary.total
    );
}
