//! Command-line definition and subcommand handlers

use crate::export::write_csv;
use crate::render::Renderer;
use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pe_core::{read_columns, read_data_set, Dashboard, DashboardConfig};
use pe_model::{seed, SortOrder, ViewMode};
use std::io::Write;
use std::path::PathBuf;

/// Build the `project-engine` command
#[must_use]
pub fn command() -> Command {
    Command::new("project-engine")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Project records dashboard: search, sort, group, and summarize")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("show")
                .about("Render the records as a table or list")
                .args(source_args())
                .args(view_args())
                .args(insight_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the dashboard snapshot as JSON"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write the shown rows as CSV")
                .args(source_args())
                .args(view_args())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Output file (default: stdout)"),
                ),
        )
        .subcommand(
            Command::new("columns")
                .about("List the known columns")
                .args(source_args()),
        )
        .subcommand(
            Command::new("insights")
                .about("Print a narrative summary of the records")
                .args(source_args())
                .args(insight_args()),
        )
}

fn source_args() -> [Arg; 3] {
    [
        Arg::new("data")
            .long("data")
            .short('d')
            .value_parser(value_parser!(PathBuf))
            .help("JSON array of records (default: built-in sample projects)"),
        Arg::new("columns-file")
            .long("columns-file")
            .value_parser(value_parser!(PathBuf))
            .help("JSON array of column definitions (default: sample columns)"),
        Arg::new("config")
            .long("config")
            .short('c')
            .value_parser(value_parser!(PathBuf))
            .help("TOML configuration file"),
    ]
}

fn view_args() -> [Arg; 7] {
    [
        Arg::new("mode")
            .long("mode")
            .short('m')
            .value_parser(value_parser!(ViewMode))
            .help("table or list"),
        Arg::new("search")
            .long("search")
            .short('s')
            .help("Case-insensitive substring to match in any field"),
        Arg::new("sort")
            .long("sort")
            .help("Column to sort by"),
        Arg::new("order")
            .long("order")
            .value_parser(value_parser!(SortOrder))
            .help("asc or desc"),
        Arg::new("group")
            .long("group")
            .short('g')
            .help("Column to group by"),
        Arg::new("aggregate")
            .long("aggregate")
            .help("Numeric field summed per group (default: budget)"),
        Arg::new("columns")
            .long("columns")
            .value_delimiter(',')
            .help("Comma-separated columns to show, in order (keys are split on every comma)"),
    ]
}

fn insight_args() -> [Arg; 3] {
    [
        Arg::new("no-insights")
            .long("no-insights")
            .action(ArgAction::SetTrue)
            .help("Skip the insight service"),
        Arg::new("model")
            .long("model")
            .help("Model name for the insight service"),
        Arg::new("timeout")
            .long("timeout")
            .value_parser(value_parser!(u64).range(1..))
            .help("Insight request timeout in seconds"),
    ]
}

/// Run the matched subcommand, writing results to `out`
pub async fn run(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    match matches.subcommand() {
        Some(("show", args)) => show(args, out).await,
        Some(("export", args)) => export(args, out),
        Some(("columns", args)) => columns(args, out),
        Some(("insights", args)) => insights(args, out).await,
        Some((other, _)) => bail!("unknown subcommand: {other}"),
        None => bail!("no subcommand given"),
    }
}

async fn show(args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let (dashboard, pending) = open(args, true)?;
    if let Some(handle) = pending {
        handle.await.context("insight task did not complete")?;
    }

    if args.get_flag("json") {
        serde_json::to_writer_pretty(&mut *out, &dashboard.snapshot())?;
        writeln!(out)?;
        return Ok(());
    }

    if let Some(fetcher) = dashboard.insights() {
        writeln!(out, "Insights: {}", fetcher.state().display_text())?;
        writeln!(out)?;
    }

    let result = dashboard.display();
    writeln!(out, "Projects ({})", result.len())?;
    writeln!(out)?;

    if result.is_empty() {
        writeln!(out, "No projects found")?;
        writeln!(out, "Try adjusting your search filters")?;
        return Ok(());
    }

    let config = dashboard.view().config();
    let renderer = Renderer::new(dashboard.columns(), config);
    match config.mode() {
        ViewMode::Table => renderer.table(&result, out)?,
        ViewMode::List => renderer.list(&result, out)?,
    }
    Ok(())
}

fn export(args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let (dashboard, _) = open(args, false)?;
    let result = dashboard.display();
    let renderer = Renderer::new(dashboard.columns(), dashboard.view().config());

    let rows = match args.get_one::<PathBuf>("output") {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            write_csv(file, &result, renderer.columns())?
        }
        None => write_csv(&mut *out, &result, renderer.columns())?,
    };
    tracing::info!(rows, "exported");
    Ok(())
}

fn columns(args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let (dashboard, _) = open(args, false)?;
    let columns = dashboard.columns();

    let width = columns.iter().map(|c| c.key().as_str().len()).max().unwrap_or(0);
    for column in columns.iter() {
        writeln!(
            out,
            "{:<width$}  {:<8}  {}{}",
            column.key().as_str(),
            column.column_type().to_string(),
            column.label(),
            if column.is_sortable() { "" } else { " (not sortable)" },
        )?;
    }
    Ok(())
}

async fn insights(args: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let (dashboard, pending) = open(args, true)?;
    let Some(handle) = pending else {
        bail!("insights are disabled");
    };
    handle.await.context("insight task did not complete")?;
    writeln!(out, "{}", dashboard.insight_state().display_text())?;
    Ok(())
}

type Pending = Option<tokio::task::JoinHandle<()>>;

/// Build the dashboard described by config file and flags, then load data
///
/// Subcommands that never show insights pass `insights = false` so loading
/// does not reach the insight service.
fn open(args: &ArgMatches, insights: bool) -> Result<(Dashboard, Pending)> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::new(),
    };
    apply_overrides(&mut config, args);
    if !insights {
        config.insight.enabled = false;
    }
    config.validate()?;

    let columns = match args.get_one::<PathBuf>("columns-file") {
        Some(path) => read_columns(path)?,
        None => seed::seed_columns(),
    };
    let mut dashboard = Dashboard::from_config(&config, columns)?;

    if has_arg(args, "columns") {
        if let Some(keys) = args.get_many::<String>("columns") {
            dashboard.view_mut().set_visible_columns(keys)?;
        }
    }
    if has_arg(args, "search") {
        if let Some(query) = args.get_one::<String>("search") {
            dashboard.view_mut().set_search_query(query.as_str());
        }
    }

    let data = match args.get_one::<PathBuf>("data") {
        Some(path) => read_data_set(path)?,
        None => seed::seed_data_set(),
    };
    let pending = dashboard.load(data);
    Ok((dashboard, pending))
}

fn apply_overrides(config: &mut DashboardConfig, args: &ArgMatches) {
    if has_arg(args, "mode") {
        if let Some(mode) = args.get_one::<ViewMode>("mode") {
            config.view.mode = *mode;
        }
    }
    if has_arg(args, "sort") {
        if let Some(key) = args.get_one::<String>("sort") {
            config.view.sort_by = Some(key.clone());
        }
    }
    if has_arg(args, "order") {
        if let Some(order) = args.get_one::<SortOrder>("order") {
            config.view.sort_order = *order;
        }
    }
    if has_arg(args, "group") {
        if let Some(key) = args.get_one::<String>("group") {
            config.view.group_by = Some(key.clone());
        }
    }
    if has_arg(args, "aggregate") {
        if let Some(key) = args.get_one::<String>("aggregate") {
            config.view.aggregate_field = key.clone();
        }
    }
    if has_arg(args, "model") {
        if let Some(model) = args.get_one::<String>("model") {
            config.insight.model = model.clone();
        }
    }
    if has_arg(args, "timeout") {
        if let Some(secs) = args.get_one::<u64>("timeout") {
            config.insight.timeout_secs = *secs;
        }
    }
    if has_arg(args, "no-insights") && args.get_flag("no-insights") {
        config.insight.enabled = false;
    }
}

/// Whether `id` is defined for this subcommand
fn has_arg(args: &ArgMatches, id: &str) -> bool {
    args.try_contains_id(id).unwrap_or(false)
}
