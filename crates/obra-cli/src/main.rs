mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "obra",
    version,
    about = "Construction budget extraction and progress certificates"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract budget items from a workbook (xlsx, xls, xlsb, ods)
    Extract {
        /// Path to the budget workbook
        input_file: PathBuf,

        /// Sheet to read (default: first sheet)
        #[arg(short, long, value_name = "NAME")]
        sheet: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the items as JSON to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Render a progress certificate JSON payload to PDF
    Render {
        /// Path to the certificate JSON
        input_file: PathBuf,

        /// Output PDF path (default: certificado_<project>_v<version>.pdf)
        #[arg(short = 'O', long = "out", value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

fn main() {
    logging::setup_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            sheet,
            output,
            out,
        } => commands::extract::run(input_file, sheet, &output, out).map_err(|e| {
            let code = if e.is_client_error() { 2 } else { 1 };
            (e, code)
        }),
        Commands::Render { input_file, out } => {
            commands::render::run(input_file, out).map_err(|e| (e, 1))
        }
    };

    if let Err((e, code)) = result {
        eprintln!("Error: {e}");
        std::process::exit(code);
    }
}
