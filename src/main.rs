// Entry point and high-level CLI flow.
//
// One run reads the status workbook, renders every dashboard region in
// memory and only then overwrites the HTML file:
// - the loader turns the first worksheet into a `DashboardData` snapshot,
// - the output module splices the rendered fragments into the document.
mod error;
mod loader;
mod logging;
mod output;
mod render;
mod template;
mod types;
mod util;

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Settings for a single run, taken from the command line.
#[derive(Debug, Clone)]
struct Options {
    excel_path: PathBuf,
    index_path: PathBuf,
    preview: bool,
    verbose: bool,
}

impl Options {
    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let excel_path = matches
            .get_one::<PathBuf>("excel_path")
            .cloned()
            .context("Excel path is required")?;
        let index_path = matches
            .get_one::<PathBuf>("index")
            .cloned()
            .context("HTML path is required")?;
        Ok(Options {
            excel_path,
            index_path,
            preview: matches.get_flag("preview"),
            verbose: matches.get_flag("verbose"),
        })
    }
}

fn make_app() -> Command {
    Command::new("dcs_dashboard")
        .about("Update dashboard HTML from a DCS status Excel sheet")
        .arg(
            Arg::new("excel_path")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to the Excel (.xlsx) file"),
        )
        .arg(
            Arg::new("index")
                .long("index")
                .value_parser(value_parser!(PathBuf))
                .default_value("index.html")
                .help("Path to dashboard HTML file"),
        )
        .arg(
            Arg::new("preview")
                .long("preview")
                .action(ArgAction::SetTrue)
                .help("Print the extracted figures as a table before writing"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log every substitution"),
        )
}

/// Extract, render and write. Any failure aborts before the HTML is touched.
fn run(opts: &Options) -> Result<()> {
    if !opts.excel_path.exists() {
        bail!("Excel file not found: {}", opts.excel_path.display());
    }
    if !opts.index_path.exists() {
        bail!("HTML file not found: {}", opts.index_path.display());
    }

    let data = loader::read_excel_data(&opts.excel_path)
        .with_context(|| format!("Failed to extract data from {}", opts.excel_path.display()))?;

    if opts.preview {
        println!("Report date: {}\n", util::format_as_of_date(data.report_date));
        println!("{}\n", output::preview_table(&data));
    }

    output::update_html(&opts.index_path, &data)
        .with_context(|| format!("Failed to update {}", opts.index_path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let opts = Options::from_matches(&make_app().get_matches())?;
    logging::init_logging(opts.verbose);

    run(&opts)?;
    println!(
        "Updated {} from {}",
        opts.index_path.display(),
        opts.excel_path.display()
    );
    Ok(())
}
