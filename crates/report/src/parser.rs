use std::io::BufRead;

use higherme_core::ParsedReportSummary;

use crate::markers::{Marker, breakdown_entry};

/// The marker whose section the parser is currently inside, if any.
type Section = Option<Marker>;

fn parse_line(line: &str, section: Section, summary: &mut ParsedReportSummary) -> Section {
    if let Some(marker) = Marker::classify(line) {
        marker.apply(line, summary);
        return Some(marker);
    }
    if section == Some(Marker::XpBreakdown) && line.contains("- ") {
        if let Some(entry) = breakdown_entry(line) {
            summary.xp_breakdown.get_or_insert_with(Vec::new).push(entry);
        }
    }
    section
}

fn parse_lines<I, S>(lines: I) -> ParsedReportSummary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (summary, _) = lines.into_iter().fold(
        (ParsedReportSummary::default(), None),
        |(mut summary, section), line| {
            let line = line.as_ref().trim();
            if line.is_empty() {
                return (summary, section);
            }
            let section = parse_line(line, section, &mut summary);
            (summary, section)
        },
    );
    summary
}

/// Parses a daily report into its structured summary. Unknown lines are
/// skipped; the result may have every field unset.
pub fn parse_report(report: &str) -> ParsedReportSummary {
    parse_lines(report.split('\n'))
}

pub fn parse_report_from_reader<R: BufRead>(reader: R) -> ParsedReportSummary {
    parse_lines(reader.lines().map_while(|line| line.ok()))
}
