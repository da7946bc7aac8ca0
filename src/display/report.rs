//! Fleet report formatting for terminal output
//!
//! Lines use the same fixed columns as `Boat::describe`, with the totals row
//! label padded to line up under the per-boat columns.

use crate::models::Money;
use crate::services::registry::{FleetReport, FleetTotals};

/// Width of the label column in the totals row
const TOTALS_LABEL_WIDTH: usize = 47;

/// Format the trailing totals row
pub fn format_totals_line(totals: &FleetTotals) -> String {
    format!(
        "{:<width$} : Paid $ {:>10} : Spent $ {:>10}",
        "Total",
        totals.total_paid.amount_string(),
        totals.total_spent.amount_string(),
        width = TOTALS_LABEL_WIDTH,
    )
}

/// Format a full fleet report: one line per boat, then the totals row
pub fn format_fleet_report(report: &FleetReport) -> String {
    let mut output = String::new();
    for line in &report.lines {
        output.push_str(line);
        output.push('\n');
    }
    output.push_str(&format_totals_line(&report.totals));
    output.push('\n');
    output
}

/// Format an amount with two decimals and a leading dollar sign
pub fn format_dollars(amount: Money) -> String {
    format!("${}", amount.amount_string())
}
