//! End-to-end runs of the command surface against an in-memory writer

use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

async fn run(args: &[&str]) -> anyhow::Result<String> {
    let argv = std::iter::once("project-engine").chain(args.iter().copied());
    let matches = pe_cli::command().try_get_matches_from(argv)?;
    let mut out = Vec::new();
    pe_cli::run(&matches, &mut out).await?;
    Ok(String::from_utf8(out)?)
}

fn temp_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn show_lists_all_seed_projects() {
    let text = run(&["show", "--no-insights"]).await.unwrap();

    assert!(text.starts_with("Projects (8)\n"));
    assert!(text.contains("Project Name"));
    assert!(text.contains("AI Implementation"));
    assert!(text.contains("Product Launch"));
    assert!(!text.contains("Insights:"));
}

#[tokio::test]
async fn show_filters_and_sorts() {
    let text = run(&[
        "show",
        "--no-insights",
        "--search",
        "TeCh",
        "--sort",
        "budget",
        "--order",
        "desc",
        "--columns",
        "title,budget",
    ])
    .await
    .unwrap();

    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "Projects (3)");
    assert_eq!(lines[4], "Mobile App V2         $25,000");
    assert_eq!(lines[5], "AI Implementation     $15,000");
    assert_eq!(lines[6], "Customer Support Bot  $9,000");
}

#[tokio::test]
async fn show_grouped_list() {
    let text = run(&["show", "--no-insights", "--mode", "list", "--group", "category"])
        .await
        .unwrap();

    let tech = text.find("category: Tech  Count: 3  Total Budget: $49,000").unwrap();
    let marketing = text.find("category: Marketing  Count: 3").unwrap();
    let infra = text.find("category: Infrastructure  Count: 2").unwrap();
    assert!(tech < marketing && marketing < infra);
    assert!(text.contains("  Infrastructure · Assignee: Kevin Lu"));
}

#[tokio::test]
async fn show_reports_no_matches() {
    let text = run(&["show", "--no-insights", "--search", "zzz-nothing"]).await.unwrap();
    assert_eq!(
        text,
        "Projects (0)\n\nNo projects found\nTry adjusting your search filters\n"
    );
}

#[tokio::test]
async fn show_json_snapshot() {
    let text = run(&["show", "--no-insights", "--json", "--search", "cloud"])
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(json["totalRecords"], 8);
    assert_eq!(json["result"]["kind"], "flat");
    assert_eq!(json["result"]["items"][0]["title"], "Cloud Migration");
    assert_eq!(json["insight"]["phase"], "idle");
}

#[tokio::test]
async fn unknown_sort_column_is_rejected() {
    let err = run(&["show", "--no-insights", "--sort", "nope"]).await.unwrap_err();
    assert!(err.to_string().contains("nope"));
}

#[tokio::test]
async fn invalid_mode_fails_parsing() {
    assert!(run(&["show", "--mode", "grid"]).await.is_err());
}

#[tokio::test]
async fn export_csv_to_stdout() {
    let text = run(&["export", "--search", "marketing", "--columns", "title,budget,status"])
        .await
        .unwrap();
    assert_eq!(
        text,
        "id,title,budget,status\n\
         2,Branding Refresh,8000,Completed\n\
         5,Social Media Campaign,5000,In Progress\n\
         8,Product Launch,35000,Planning\n"
    );
}

#[tokio::test]
async fn export_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");

    let text = run(&["export", "--group", "status", "--output", path.to_str().unwrap()])
        .await
        .unwrap();
    assert!(text.is_empty());

    let csv = std::fs::read_to_string(&path).unwrap();
    assert_eq!(csv.lines().count(), 9);
    assert!(csv.starts_with("id,title,category,status,budget,completion,dueDate,assignee\n"));
}

#[tokio::test]
async fn columns_from_seed() {
    let text = run(&["columns"]).await.unwrap();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "title       string    Project Name");
    assert_eq!(lines[3], "budget      currency  Budget");
}

#[tokio::test]
async fn records_and_columns_from_files() {
    let columns = temp_file(
        r#"[
            {"key": "name", "label": "Name", "type": "string", "isSortable": true},
            {"key": "cost", "label": "Cost", "type": "currency"}
        ]"#,
        ".json",
    );
    let data = temp_file(
        r#"[
            {"id": "a", "name": "Alpha", "cost": 1200},
            {"id": "b", "name": "Beta", "cost": 300}
        ]"#,
        ".json",
    );
    let columns_path = columns.path().to_str().unwrap();
    let data_path = data.path().to_str().unwrap();

    let listing = run(&["columns", "--columns-file", columns_path]).await.unwrap();
    assert!(listing.contains("cost  currency  Cost (not sortable)"));

    let text = run(&[
        "show",
        "--no-insights",
        "--columns-file",
        columns_path,
        "--data",
        data_path,
        "--aggregate",
        "cost",
        "--search",
        "beta",
    ])
    .await
    .unwrap();
    assert!(text.contains("Projects (1)"));
    assert!(text.contains("Beta  $300"));

    let err = run(&[
        "show",
        "--no-insights",
        "--columns-file",
        columns_path,
        "--data",
        data_path,
        "--sort",
        "cost",
    ])
    .await
    .unwrap_err();
    assert!(err.to_string().contains("cost"));
}

#[tokio::test]
async fn punctuated_column_keys_from_files() {
    let columns = temp_file(
        r#"[
            {"key": "Project Name", "label": "Project", "type": "string", "isSortable": true},
            {"key": "due-date", "label": "Due", "type": "date", "isSortable": true}
        ]"#,
        ".json",
    );
    let data = temp_file(
        r#"[
            {"id": 1, "Project Name": "Later", "due-date": "2025-03-01"},
            {"id": 2, "Project Name": "Sooner", "due-date": "2024-10-15"}
        ]"#,
        ".json",
    );

    let text = run(&[
        "export",
        "--columns-file",
        columns.path().to_str().unwrap(),
        "--data",
        data.path().to_str().unwrap(),
        "--sort",
        "due-date",
        "--columns",
        "Project Name,due-date",
    ])
    .await
    .unwrap();
    assert_eq!(
        text,
        "id,Project Name,due-date\n2,Sooner,2024-10-15\n1,Later,2025-03-01\n"
    );
}

#[tokio::test]
async fn config_file_sets_initial_view() {
    let config = temp_file(
        "[insight]\nenabled = false\n\n[view]\nmode = \"list\"\nsort_by = \"completion\"\nsort_order = \"desc\"\n",
        ".toml",
    );
    let text = run(&["show", "--config", config.path().to_str().unwrap()])
        .await
        .unwrap();

    assert!(text.starts_with("Projects (8)\n\nBranding Refresh\n"));
    assert!(!text.contains("Insights:"));
}

#[tokio::test]
async fn missing_api_key_prints_fallback() {
    let config = temp_file(
        "[insight]\napi_key_env = \"PE_TEST_UNSET_KEY_9F2\"\n",
        ".toml",
    );
    let path = config.path().to_str().unwrap();

    let text = run(&["insights", "--config", path]).await.unwrap();
    assert_eq!(text, "Insights unavailable.\n");

    let text = run(&["show", "--config", path, "--search", "cloud"]).await.unwrap();
    assert!(text.starts_with("Insights: Insights unavailable.\n\nProjects (1)\n"));
}

#[tokio::test]
async fn insights_command_requires_service() {
    let err = run(&["insights", "--no-insights"]).await.unwrap_err();
    assert!(err.to_string().contains("disabled"));
}
