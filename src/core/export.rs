// EventSheet - core/export.rs
//
// Spreadsheet export of classified events.
// Core layer: builds the workbook in memory and returns its bytes; writing
// to disk is owned by app::report.
//
// Sheet layout: one worksheet per non-empty bucket, a bold header cell
// holding the event name in A1, matching lines below in bucket order.

use crate::core::model::{Classification, EventCatalog};
use crate::core::sheet;
use crate::util::constants::{MAX_CELL_CHARS, MAX_SHEET_ROWS, REPORT_COLUMN_WIDTH};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// One worksheet to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPlan {
    /// Unique, valid worksheet name.
    pub name: String,

    /// Column header (the full event name).
    pub header: String,

    /// Cell values, top to bottom.
    pub rows: Vec<String>,
}

/// Everything the workbook will contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportPlan {
    pub sheets: Vec<SheetPlan>,

    /// Truncation notices.
    pub warnings: Vec<String>,
}

impl ReportPlan {
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Lay out one sheet per non-empty bucket, in catalog order.
///
/// Sheet labels come from the catalog (short label, else event name). A
/// bucket whose event is missing from the catalog uses its event name.
pub fn build_report(classification: &Classification, catalog: &EventCatalog) -> ReportPlan {
    let buckets: Vec<_> = classification.non_empty().collect();
    let labels: Vec<&str> = buckets
        .iter()
        .map(|b| {
            catalog
                .get(&b.event)
                .map(|d| d.sheet_label())
                .unwrap_or(b.event.as_str())
        })
        .collect();
    let names = sheet::assign_sheet_names(labels);

    let mut plan = ReportPlan::default();
    let max_rows = MAX_SHEET_ROWS - 1;

    for (bucket, name) in buckets.into_iter().zip(names) {
        if bucket.lines.len() > max_rows {
            plan.warnings.push(format!(
                "Sheet '{name}' holds {} lines; only the first {max_rows} were written",
                bucket.lines.len()
            ));
        }
        let rows = bucket
            .lines
            .iter()
            .take(max_rows)
            .map(|line| truncate_cell(line))
            .collect();
        plan.sheets.push(SheetPlan {
            name,
            header: truncate_cell(&bucket.event),
            rows,
        });
    }

    plan
}

/// Serialise `plan` into xlsx bytes.
pub fn render_workbook(plan: &ReportPlan) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for sheet in &plan.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        worksheet.set_column_width(0, REPORT_COLUMN_WIDTH)?;
        worksheet.write_string_with_format(0, 0, &sheet.header, &header_format)?;
        for (idx, row) in sheet.rows.iter().enumerate() {
            // Row count is capped by build_report, so this fits in u32.
            worksheet.write_string(idx as u32 + 1, 0, row)?;
        }
    }

    workbook.save_to_buffer()
}

fn truncate_cell(value: &str) -> String {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::classify;
    use crate::core::model::{Bucket, EventDefinition};

    fn catalog() -> EventCatalog {
        EventCatalog::new(vec![
            EventDefinition::new("Database connection established").with_sheet_label("DB connected"),
            EventDefinition::new("Service stopped"),
            EventDefinition::new("Archive created"),
        ])
    }

    #[test]
    fn test_empty_buckets_skipped() {
        let lines = ["Archive created: a.zip", "Database connection established"];
        let plan = build_report(&classify(&lines, &catalog()), &catalog());
        let names: Vec<_> = plan.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["DB connected", "Archive created"]);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_header_and_rows() {
        let lines = ["first Service stopped", "second Service stopped"];
        let plan = build_report(&classify(&lines, &catalog()), &catalog());
        assert_eq!(plan.sheets.len(), 1);
        assert_eq!(plan.sheets[0].header, "Service stopped");
        assert_eq!(
            plan.sheets[0].rows,
            vec!["second Service stopped", "first Service stopped"]
        );
    }

    #[test]
    fn test_nothing_matched_is_empty_plan() {
        let plan = build_report(&classify(&["noise"], &catalog()), &catalog());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_unknown_event_uses_name() {
        let classification = Classification {
            buckets: vec![Bucket {
                event: "Something very long that is not in the catalog at all".to_string(),
                lines: vec!["x".to_string()],
            }],
        };
        let plan = build_report(&classification, &catalog());
        assert_eq!(plan.sheets[0].name, "Something very long that is not");
    }

    #[test]
    fn test_oversized_cell_truncated() {
        let cell = truncate_cell(&"a".repeat(MAX_CELL_CHARS + 10));
        assert_eq!(cell.len(), MAX_CELL_CHARS);
    }

    #[test]
    fn test_render_produces_zip() {
        let lines = ["Service stopped", "Archive created"];
        let plan = build_report(&classify(&lines, &catalog()), &catalog());
        let bytes = render_workbook(&plan).unwrap();
        assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
    }
}
