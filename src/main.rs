use clap::{Parser, Subcommand};
use std::path::PathBuf;

use trace_bench::Result;
use trace_bench::compare;
use trace_bench::reconcile::ColumnMapping;
use trace_bench::render::{self, csv::DEFAULT_SUMMARY_FILE};
use trace_bench::summary::{self, GroupBy};

#[derive(Parser)]
#[command(name = "trace-bench")]
#[command(about = "Compare benchmark traces and summarize benchmark runs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two whitespace-delimited traces cell by cell.
    Compare {
        trace_a: PathBuf,

        trace_b: PathBuf,

        /// JSON column mapping applied to trace B (defaults to the legacy
        /// Complete-ld-ln-avg/Data-ld-ln/Gene-ld-ln migration).
        #[arg(long)]
        mapping: Option<PathBuf>,
    },

    /// Summarize a directory tree of benchmark run artifacts into a CSV report.
    Summarize {
        root: PathBuf,

        #[arg(short = 'o', long, default_value = DEFAULT_SUMMARY_FILE)]
        out: PathBuf,

        #[arg(long, value_enum, default_value_t = GroupBy::Stem)]
        group_by: GroupBy,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Compare {
            trace_a,
            trace_b,
            mapping,
        } => {
            // 1) Mapping: explicit file or the built-in legacy one.
            let mapping = match mapping {
                Some(path) => ColumnMapping::load(&path)?,
                None => ColumnMapping::legacy(),
            };

            // 2) Load, align, reconcile, diff.
            let outcome = compare::run_compare(&trace_a, &trace_b, &mapping)?;

            // 3) Report. The verdict never changes the exit code.
            print!("{}", render::render_comparison(&outcome));
        }
        Commands::Summarize {
            root,
            out,
            group_by,
        } => {
            println!(
                "Total num of benchmarks: {}",
                summary::count_top_level_entries(&root)?
            );
            println!();

            let records = summary::collect_runs(&root, group_by)?;
            print!("{}", render::render_summary(&records));
            println!();

            render::write_summary_csv(&records, &out)?;
            println!("Wrote {}", out.display());
        }
    }

    Ok(())
}
