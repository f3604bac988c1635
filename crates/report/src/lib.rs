mod markers;
mod parser;

pub use higherme_core::{ParsedReportSummary, XpBreakdownEntry};
pub use parser::{parse_report, parse_report_from_reader};
