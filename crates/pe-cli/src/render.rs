//! Plain-text table and list rendering

use crate::format::{format_amount, format_cell};
use pe_model::{ColumnDefinition, ColumnSet, Record, ViewConfig};
use pe_query::{Bucket, DisplayResult};
use std::io::{self, Write};

/// Fields shown in a list card's heading rather than its detail lines
const CARD_HEADING_KEYS: [&str; 5] = ["title", "status", "completion", "category", "assignee"];

const COLUMN_GAP: &str = "  ";

/// Renders derived records with the visible columns of a view
#[derive(Debug)]
pub struct Renderer<'a> {
    columns: Vec<&'a ColumnDefinition>,
    group_key: Option<&'a str>,
    aggregate: Option<&'a ColumnDefinition>,
    aggregate_key: &'a str,
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub fn new(columns: &'a ColumnSet, config: &'a ViewConfig) -> Self {
        Self {
            columns: config
                .visible_columns()
                .iter()
                .filter_map(|key| columns.get(key.as_str()))
                .collect(),
            group_key: config.group_by().map(|k| k.as_str()),
            aggregate: columns.get(columns.aggregate_key()),
            aggregate_key: columns.aggregate_key(),
        }
    }

    /// Visible column definitions in display order
    #[must_use]
    pub fn columns(&self) -> &[&'a ColumnDefinition] {
        &self.columns
    }

    /// Aligned table, one header line per bucket when grouped
    pub fn table(&self, result: &DisplayResult<'_>, out: &mut dyn Write) -> io::Result<()> {
        let rows: Vec<Vec<String>> = result.records().iter().map(|r| self.cells(r)).collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| width(c.label())).collect();
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(width(cell));
            }
        }

        let labels: Vec<String> = self.columns.iter().map(|c| c.label().to_string()).collect();
        write_row(out, &labels, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(out, &rule, &widths)?;

        match result {
            DisplayResult::Flat(_) => {
                for row in &rows {
                    write_row(out, row, &widths)?;
                }
            }
            DisplayResult::Grouped(buckets) => {
                let mut rows = rows.iter();
                for (i, bucket) in buckets.iter().enumerate() {
                    if i > 0 {
                        writeln!(out)?;
                    }
                    writeln!(out, "{}", self.group_heading(bucket))?;
                    for row in rows.by_ref().take(bucket.records.len()) {
                        write_row(out, row, &widths)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// One card per record
    pub fn list(&self, result: &DisplayResult<'_>, out: &mut dyn Write) -> io::Result<()> {
        match result {
            DisplayResult::Flat(records) => {
                for (i, record) in records.iter().enumerate() {
                    if i > 0 {
                        writeln!(out)?;
                    }
                    self.card(record, out)?;
                }
            }
            DisplayResult::Grouped(buckets) => {
                for (i, bucket) in buckets.iter().enumerate() {
                    if i > 0 {
                        writeln!(out)?;
                    }
                    writeln!(out, "{}", self.group_heading(bucket))?;
                    for record in &bucket.records {
                        writeln!(out)?;
                        self.card(record, out)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// `category: Tech  Count: 3  Total Budget: $49,000`
    #[must_use]
    pub fn group_heading(&self, bucket: &Bucket<'_>) -> String {
        let mut heading = format!(
            "{}: {}{COLUMN_GAP}Count: {}",
            self.group_key.unwrap_or_default(),
            bucket.label(),
            bucket.stats.count
        );
        if bucket.stats.sum > 0.0 {
            let label = self.aggregate.map_or(self.aggregate_key, |c| c.label());
            let amount = format_amount(bucket.stats.sum, self.aggregate.map(|c| c.column_type()));
            heading.push_str(&format!("{COLUMN_GAP}Total {label}: {amount}"));
        }
        heading
    }

    fn cells(&self, record: &Record) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| format_cell(record.field(c.key().as_str()), c.column_type()))
            .collect()
    }

    fn card(&self, record: &Record, out: &mut dyn Write) -> io::Result<()> {
        let text = |key: &str| record.field(key).map(|v| v.to_display_string());

        writeln!(out, "{}", text("title").unwrap_or_else(|| record.id().to_string()))?;

        let mut byline = Vec::new();
        if let Some(category) = text("category") {
            byline.push(category);
        }
        if let Some(assignee) = text("assignee") {
            byline.push(format!("Assignee: {assignee}"));
        }
        if !byline.is_empty() {
            writeln!(out, "  {}", byline.join(" · "))?;
        }

        let mut progress = Vec::new();
        if let Some(status) = text("status") {
            progress.push(format!("Status: {status}"));
        }
        if let Some(completion) = text("completion") {
            progress.push(format!("Progress: {completion}%"));
        }
        if !progress.is_empty() {
            writeln!(out, "  {}", progress.join(COLUMN_GAP))?;
        }

        let details: Vec<String> = self
            .columns
            .iter()
            .filter(|c| !CARD_HEADING_KEYS.contains(&c.key().as_str()))
            .filter_map(|c| {
                record
                    .field(c.key().as_str())
                    .map(|v| format!("{}: {}", c.label(), format_cell(Some(v), c.column_type())))
            })
            .collect();
        if !details.is_empty() {
            writeln!(out, "  {}", details.join(COLUMN_GAP))?;
        }
        Ok(())
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn write_row(out: &mut dyn Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    writeln!(out, "{}", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pe_model::{seed, ColumnKey, SortOrder};
    use pretty_assertions::assert_eq;

    fn key(s: &str) -> ColumnKey {
        s.parse().unwrap()
    }

    fn render(config: &ViewConfig, list: bool) -> String {
        let records = seed::seed_records();
        let columns = seed::seed_columns();
        let result = pe_query::derive(&records, config, &columns);
        let renderer = Renderer::new(&columns, config);

        let mut out = Vec::new();
        if list {
            renderer.list(&result, &mut out).unwrap();
        } else {
            renderer.table(&result, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn table_has_header_rule_and_rows() {
        let config = ViewConfig::new(vec![key("title"), key("budget"), key("completion")])
            .with_search("tech")
            .with_sort(Some(key("budget")), SortOrder::Asc);
        let text = render(&config, false);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Project Name"));
        assert!(lines[1].starts_with("---"));
        assert_eq!(lines[2], "Customer Support Bot  $9,000   30%");
        assert_eq!(lines[4], "Mobile App V2         $25,000  5%");
    }

    #[test]
    fn grouped_table_headings() {
        let config = ViewConfig::new(seed::seed_columns().keys()).with_group(Some(key("category")));
        let text = render(&config, false);

        assert!(text.contains("category: Tech  Count: 3  Total Budget: $49,000"));
        assert!(text.contains("category: Marketing  Count: 3  Total Budget: $48,000"));
        assert!(text.contains("category: Infrastructure  Count: 2  Total Budget: $57,000"));
    }

    #[test]
    fn zero_total_is_omitted() {
        let columns = seed::seed_columns();
        let config = ViewConfig::new(columns.keys()).with_group(Some(key("status")));
        let renderer = Renderer::new(&columns, &config);
        let record = Record::new(99).with_field("status", "Planning");
        let bucket = Bucket {
            value: record.field("status").cloned(),
            records: vec![&record],
            stats: pe_query::BucketStats { count: 1, sum: 0.0 },
        };
        assert_eq!(renderer.group_heading(&bucket), "status: Planning  Count: 1");
    }

    #[test]
    fn list_cards() {
        let config = ViewConfig::new(seed::seed_columns().keys()).with_search("cloud");
        let text = render(&config, true);
        assert_eq!(
            text,
            "Cloud Migration\n  Infrastructure · Assignee: Kevin Lu\n  Status: Delayed  Progress: 15%\n  Budget: $45,000  Due Date: Dec 10, 2024\n"
        );
    }

    #[test]
    fn hidden_columns_are_not_rendered() {
        let config = ViewConfig::new(vec![key("title")]).with_search("cloud");
        let text = render(&config, false);
        assert!(!text.contains("45,000"));
    }
}
