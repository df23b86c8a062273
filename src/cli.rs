use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use datacollab::config::AppConfig;
use datacollab::dataset::{self, AggregateFn, Aggregation, AggregationSpec, StatsDetail};
use datacollab::store::{JsonFileStore, Workspace};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "datacollab", about = "Collaborative data analysis workspace")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a CSV or JSON file: field types and descriptive statistics
    Analyze {
        /// Path to the file to analyze
        file: PathBuf,

        /// Emit the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Group a file by a field and reduce a column, printing summary rows
    Aggregate {
        /// Path to the file to aggregate
        file: PathBuf,

        /// Field to group by
        #[arg(short, long)]
        group_by: String,

        /// Column to reduce
        #[arg(short, long)]
        column: String,

        /// Reduction to apply
        #[arg(short, long, value_enum, default_value_t = AggregateFn::Sum)]
        function: AggregateFn,
    },
    /// Seed a demo workspace (users, one project with data and a chart)
    Demo {
        /// Workspace directory. Defaults to the configured data directory.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Analyze { file, json } => handle_analyze(&file, json),
        Commands::Aggregate {
            file,
            group_by,
            column,
            function,
        } => handle_aggregate(&file, group_by, column, function),
        Commands::Demo { data_dir } => handle_demo(data_dir),
    }
}

fn handle_analyze(file: &PathBuf, json: bool) -> Result<()> {
    let records = dataset::load_records(file).context("Failed to load records")?;
    let stats = dataset::summarize(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}: {} rows, {} fields", file.display(), records.len(), stats.len());
    for (field, summary) in &stats {
        print!(
            "  {field}: {} (count {}, missing {})",
            summary.field_type, summary.count, summary.missing
        );
        match &summary.detail {
            StatsDetail::Numeric(n) => {
                println!(
                    " min {} max {} mean {:.3} stddev {:.3}",
                    n.min, n.max, n.mean, n.std_dev
                );
            }
            StatsDetail::Text(t) => match &t.most_frequent {
                Some(top) => println!(
                    " {} distinct, most frequent \"{top}\" ({}x)",
                    t.unique_count, t.most_frequent_count
                ),
                None => println!(" {} distinct", t.unique_count),
            },
            StatsDetail::None => println!(),
        }
    }
    Ok(())
}

fn handle_aggregate(
    file: &PathBuf,
    group_by: String,
    column: String,
    function: AggregateFn,
) -> Result<()> {
    let records = dataset::load_records(file).context("Failed to load records")?;
    let spec = AggregationSpec {
        group_by,
        aggregations: vec![Aggregation { column, function }],
    };

    for row in dataset::aggregate_records(&records, &spec) {
        println!("{}", serde_json::to_string(&row)?);
    }
    Ok(())
}

fn handle_demo(data_dir: Option<PathBuf>) -> Result<()> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => AppConfig::load().resolve_data_dir()?,
    };

    let store = JsonFileStore::new(&dir).context("Failed to open workspace store")?;
    let workspace = Workspace::new(store);

    if workspace.init_demo_data()? {
        println!("Demo workspace seeded in {}", dir.display());
    } else {
        println!("Workspace in {} is not empty, leaving it alone", dir.display());
    }

    for project in workspace.projects()? {
        println!(
            "  {} - {} ({} rows, {} visualizations)",
            project.id,
            project.name,
            project.data.len(),
            project.visualizations.len()
        );
    }
    Ok(())
}
