//! Built-in seed data
//!
//! The eight sample projects and seven columns the dashboard starts with.

use crate::column::{ColumnDefinition, ColumnKey, ColumnSet, ColumnType};
use crate::dataset::DataSet;
use crate::record::Record;

const COLUMNS: [(&str, &str, ColumnType); 7] = [
    ("title", "Project Name", ColumnType::String),
    ("category", "Category", ColumnType::String),
    ("status", "Status", ColumnType::Status),
    ("budget", "Budget", ColumnType::Currency),
    ("completion", "Progress (%)", ColumnType::Number),
    ("dueDate", "Due Date", ColumnType::Date),
    ("assignee", "Assignee", ColumnType::String),
];

// (id, title, category, status, budget, completion, due date, assignee)
type SeedRow = (i64, &'static str, &'static str, &'static str, i32, i32, &'static str, &'static str);

const PROJECTS: [SeedRow; 8] = [
    (1, "AI Implementation", "Tech", "In Progress", 15000, 45, "2024-12-20", "Alex Wang"),
    (2, "Branding Refresh", "Marketing", "Completed", 8000, 100, "2024-11-05", "Sarah Chen"),
    (3, "Cloud Migration", "Infrastructure", "Delayed", 45000, 15, "2024-12-10", "Kevin Lu"),
    (4, "Mobile App V2", "Tech", "Planning", 25000, 5, "2025-02-15", "Alex Wang"),
    (5, "Social Media Campaign", "Marketing", "In Progress", 5000, 60, "2024-11-30", "Sarah Chen"),
    (6, "Server Upgrade", "Infrastructure", "In Progress", 12000, 80, "2024-11-20", "Kevin Lu"),
    (7, "Customer Support Bot", "Tech", "In Progress", 9000, 30, "2024-12-15", "Alex Wang"),
    (8, "Product Launch", "Marketing", "Planning", 35000, 0, "2025-01-10", "Sarah Chen"),
];

/// Seed column definitions, all sortable, summing `budget`
#[must_use]
pub fn seed_columns() -> ColumnSet {
    ColumnSet::from_trusted(
        COLUMNS
            .iter()
            .map(|&(key, label, ty)| ColumnDefinition::new(ColumnKey::from_static(key), label, ty))
            .collect(),
    )
}

/// Seed project records
#[must_use]
pub fn seed_records() -> Vec<Record> {
    PROJECTS
        .iter()
        .map(|&(id, title, category, status, budget, completion, due, assignee)| {
            Record::new(id)
                .with_field("title", title)
                .with_field("category", category)
                .with_field("status", status)
                .with_field("budget", budget)
                .with_field("completion", completion)
                .with_field("dueDate", due)
                .with_field("assignee", assignee)
        })
        .collect()
}

/// Seed records as a data set
#[must_use]
pub fn seed_data_set() -> DataSet {
    DataSet::from_trusted(seed_records())
}
