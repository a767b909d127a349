//! Per-sheet counters and the printed summary.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, instrument, warn};
use url::Url;

use crate::asset::DateWindow;
use crate::carousel::SheetSource;
use crate::sheet::{SheetEntry, columns};

/// Descriptions longer than this many words are counted as long.
pub const LONG_DESCRIPTION_WORDS: usize = 50;

const ORG_SEGMENT_PREFIX: &str = "org-";

/// Counters for one recognitions sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetStats {
    /// Sheet path as requested.
    pub sheet: String,
    /// Organisation the sheet belongs to, from its `org-*` path segment.
    pub org: Option<String>,
    /// Data rows.
    pub total: usize,
    /// Rows whose date window contains "now".
    pub active: usize,
    /// Rows with an explicit `Image URL`.
    pub custom_images: usize,
    /// Rows whose description exceeds [`LONG_DESCRIPTION_WORDS`].
    pub long_descriptions: usize,
    /// Rows without an `End Date`.
    pub missing_end_date: usize,
}

impl SheetStats {
    /// Counts the entries of one sheet.
    #[must_use]
    pub fn from_entries(sheet: &str, entries: &[SheetEntry], now: NaiveDateTime) -> Self {
        let mut stats = Self {
            sheet: sheet.to_string(),
            org: org_name(sheet),
            total: entries.len(),
            ..Self::default()
        };

        for entry in entries {
            let start = entry.field(columns::START_DATE);
            let end = entry.field(columns::END_DATE);
            if DateWindow::from_attributes(start.as_deref(), end.as_deref()).contains(now) {
                stats.active += 1;
            }
            if end.is_none() {
                stats.missing_end_date += 1;
            }
            if entry.field(columns::IMAGE_URL).is_some() {
                stats.custom_images += 1;
            }
            let words = entry
                .field(columns::DESCRIPTION)
                .map_or(0, |text| text.split_whitespace().count());
            if words > LONG_DESCRIPTION_WORDS {
                stats.long_descriptions += 1;
            }
        }
        stats
    }

    /// Label used in the summary: the org name, else the sheet path.
    #[must_use]
    pub fn label(&self) -> &str {
        self.org.as_deref().unwrap_or(&self.sheet)
    }
}

/// Extracts `<name>` from the first `org-<name>` segment of a path.
///
/// ```
/// use recognitions_core::stats::org_name;
///
/// assert_eq!(org_name("/content/org-marketing/recognitions.json").as_deref(), Some("marketing"));
/// assert_eq!(org_name("/content/screens/recognitions.json"), None);
/// ```
#[must_use]
pub fn org_name(path: &str) -> Option<String> {
    path.split('/')
        .filter_map(|segment| segment.strip_prefix(ORG_SEGMENT_PREFIX))
        .find(|name| !name.is_empty())
        .map(ToString::to_string)
}

/// Statistics over several sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    /// Sheets that loaded, in request order.
    pub sheets: Vec<SheetStats>,
    /// Sheets that could not be loaded, with the reason.
    pub failed: Vec<(String, String)>,
}

impl StatsReport {
    /// Sums every counter across the loaded sheets.
    #[must_use]
    pub fn totals(&self) -> SheetStats {
        self.sheets.iter().fold(
            SheetStats {
                sheet: "all".to_string(),
                ..SheetStats::default()
            },
            |mut sum, stats| {
                sum.total += stats.total;
                sum.active += stats.active;
                sum.custom_images += stats.custom_images;
                sum.long_descriptions += stats.long_descriptions;
                sum.missing_end_date += stats.missing_end_date;
                sum
            },
        )
    }

    /// Renders the report as a Markdown table followed by failures.
    #[must_use]
    pub fn render_summary(&self) -> String {
        let mut output_text = String::from(
            "| Sheet | Total | Active | Custom images | Long descriptions | No end date |\n\
             |---|---|---|---|---|---|\n",
        );
        let totals = self.totals();
        for stats in self.sheets.iter().chain(std::iter::once(&totals)) {
            output_text.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                escape_markdown_cell(stats.label()),
                stats.total,
                stats.active,
                stats.custom_images,
                stats.long_descriptions,
                stats.missing_end_date
            ));
        }
        if !self.failed.is_empty() {
            output_text.push_str(&format!("\n{} sheet(s) failed:\n", self.failed.len()));
            for (sheet, reason) in &self.failed {
                output_text.push_str(&format!("- {sheet}: {reason}\n"));
            }
        }
        output_text
    }
}

/// Loads each sheet and counts its entries against `now`.
///
/// A sheet that fails to load is recorded in [`StatsReport::failed`] and
/// does not stop the others.
#[instrument(skip_all, fields(host = %host, sheets = sheets.len()))]
pub async fn collect_stats(
    source: &dyn SheetSource,
    host: &Url,
    sheets: &[String],
    now: NaiveDateTime,
) -> StatsReport {
    let mut report = StatsReport::default();
    for sheet in sheets {
        let entries = match host.join(sheet) {
            Ok(url) => source.fetch_sheet(&url).await.map_err(|e| e.to_string()),
            Err(error) => Err(error.to_string()),
        };
        match entries {
            Ok(entries) => report.sheets.push(SheetStats::from_entries(sheet, &entries, now)),
            Err(reason) => {
                warn!(sheet = %sheet, error = %reason, "Failed to load sheet for statistics");
                report.failed.push((sheet.clone(), reason));
            }
        }
    }
    info!(
        loaded = report.sheets.len(),
        failed = report.failed.len(),
        "Statistics collected"
    );
    report
}

fn escape_markdown_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_counts_one_sheet() {
        let long = "word ".repeat(LONG_DESCRIPTION_WORDS + 1);
        let entries = vec![
            SheetEntry::from_pairs([
                ("LDAP", "jdoe"),
                ("Description", "Thanks"),
                ("Start Date", "1/6/2024"),
                ("End Date", "30/6/2024"),
            ]),
            SheetEntry::from_pairs([
                ("Image URL", "https://x/media_1.png"),
                ("Description", long.as_str()),
            ]),
            SheetEntry::from_pairs([
                ("LDAP", "asmith"),
                ("Description", "Expired"),
                ("End Date", "1/1/2024"),
            ]),
        ];
        let stats = SheetStats::from_entries("/content/org-sales/recognitions.json", &entries, now());
        assert_eq!(stats.org.as_deref(), Some("sales"));
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.custom_images, 1);
        assert_eq!(stats.long_descriptions, 1);
        assert_eq!(stats.missing_end_date, 1);
    }

    #[test]
    fn test_org_name_skips_empty_suffix() {
        assert_eq!(org_name("/org-/org-hr/x.json").as_deref(), Some("hr"));
        assert_eq!(org_name(""), None);
    }

    #[test]
    fn test_summary_includes_totals_and_failures() {
        let report = StatsReport {
            sheets: vec![
                SheetStats {
                    sheet: "/a/recognitions.json".to_string(),
                    total: 2,
                    active: 1,
                    ..SheetStats::default()
                },
                SheetStats {
                    sheet: "/org-b/recognitions.json".to_string(),
                    org: Some("b".to_string()),
                    total: 3,
                    active: 3,
                    ..SheetStats::default()
                },
            ],
            failed: vec![("/c/recognitions.json".to_string(), "HTTP 404".to_string())],
        };
        let totals = report.totals();
        assert_eq!((totals.total, totals.active), (5, 4));

        let summary = report.render_summary();
        assert!(summary.contains("| /a/recognitions.json | 2 | 1 |"));
        assert!(summary.contains("| b | 3 | 3 |"));
        assert!(summary.contains("| all | 5 | 4 |"));
        assert!(summary.contains("- /c/recognitions.json: HTTP 404"));
    }
}
