use std::sync::LazyLock;

use higherme_core::{ParsedReportSummary, XpBreakdownEntry};
use regex::Regex;

static PLUS_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+(\d+)").expect("plus number pattern"));
static LEVEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Level: (\d+).*?Total XP: (\d+)").expect("level line pattern")
});
static BREAKDOWN_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"- ([^:]+): \+(\d+) XP").expect("breakdown entry pattern")
});

const DEFAULT_TOTAL_XP: &str = "0";

/// Section markers in a daily report. A line triggers at most one marker:
/// the first in `ALL` whose token it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
    Title,
    XpBreakdown,
    TotalXpToday,
    Mood,
    Health,
    Code,
    Overall,
    Level,
}

impl Marker {
    pub(crate) const ALL: [Marker; 8] = [
        Marker::Title,
        Marker::XpBreakdown,
        Marker::TotalXpToday,
        Marker::Mood,
        Marker::Health,
        Marker::Code,
        Marker::Overall,
        Marker::Level,
    ];

    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Title => "**Daily Report**",
            Self::XpBreakdown => "**XP Breakdown:**",
            Self::TotalXpToday => "**Total XP Today:**",
            Self::Mood => "**Mood:**",
            Self::Health => "**Health:**",
            Self::Code => "**Code:**",
            Self::Overall => "**Overall:**",
            Self::Level => "Current Level:",
        }
    }

    /// Plain label repeated after the bold token in free-text sections.
    fn label(self) -> Option<&'static str> {
        match self {
            Self::Mood => Some("Mood:"),
            Self::Health => Some("Health:"),
            Self::Code => Some("Code:"),
            Self::Overall => Some("Overall:"),
            _ => None,
        }
    }

    fn decorations(self) -> &'static [&'static str] {
        match self {
            Self::Title => &["\u{1f305}"],
            Self::XpBreakdown => &["\u{1f522}"],
            Self::TotalXpToday => &["\u{1f3c6}"],
            Self::Mood => &["\u{1f9e0}"],
            Self::Health => &["\u{1f4aa}"],
            Self::Code => &["\u{2328}\u{fe0f}", "\u{2328}"],
            Self::Overall => &["\u{1f3af}"],
            Self::Level => &["\u{1f9ec}"],
        }
    }

    pub(crate) fn classify(line: &str) -> Option<Marker> {
        Self::ALL.into_iter().find(|marker| marker.matches(line))
    }

    pub(crate) fn matches(self, line: &str) -> bool {
        line.contains(self.token())
    }

    pub(crate) fn apply(self, line: &str, summary: &mut ParsedReportSummary) {
        match self {
            Self::Title => {
                let plain = self.token().trim_matches('*');
                let text = self.strip_decorations(line).replacen(self.token(), plain, 1);
                summary.title = Some(text.trim().to_string());
            }
            Self::XpBreakdown => {
                summary.xp_breakdown = Some(Vec::new());
            }
            Self::TotalXpToday => {
                let total = PLUS_NUMBER
                    .captures(line)
                    .and_then(|caps| caps.get(1))
                    .map_or(DEFAULT_TOTAL_XP, |digits| digits.as_str());
                summary.total_xp_today = Some(total.to_string());
            }
            Self::Mood => summary.mood = Some(self.section_text(line)),
            Self::Health => summary.health = Some(self.section_text(line)),
            Self::Code => summary.code = Some(self.section_text(line)),
            Self::Overall => summary.overall = Some(self.section_text(line)),
            Self::Level => {
                if let Some(caps) = LEVEL_LINE.captures(line) {
                    summary.level = Some(caps[1].to_string());
                    summary.total_xp_ever = Some(caps[2].to_string());
                }
            }
        }
    }

    /// Drops the section's leading emoji, if present. Only one symbol is
    /// removed and only at the start of the line.
    fn strip_decorations(self, line: &str) -> String {
        let line = line.trim_start();
        self.decorations()
            .iter()
            .find_map(|symbol| line.strip_prefix(symbol))
            .unwrap_or(line)
            .to_string()
    }

    fn section_text(self, line: &str) -> String {
        let text = self.strip_decorations(line).replacen(self.token(), "", 1);
        let text = match self.label() {
            Some(label) => text.replacen(label, "", 1),
            None => text,
        };
        text.trim().to_string()
    }
}

pub(crate) fn breakdown_entry(line: &str) -> Option<XpBreakdownEntry> {
    let caps = BREAKDOWN_ENTRY.captures(line)?;
    Some(XpBreakdownEntry {
        category: caps[1].to_string(),
        xp: caps[2].to_string(),
    })
}
