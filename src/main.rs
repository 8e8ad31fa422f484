use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sectionize::PageConfig;

mod check;

#[derive(Parser)]
#[command(
    name = "sectionize",
    version,
    about = "Markdown-to-HTML renderer with automatic section wrapping"
)]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RenderFormat {
    Fragment,
    Page,
    Tokens,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown file to HTML
    Render {
        /// Path to the .md file
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value = "fragment")]
        format: RenderFormat,

        /// Write output to this path instead of stdout
        #[arg(long)]
        out: Option<String>,

        /// Page title override (page format only)
        #[arg(long)]
        title: Option<String>,
    },

    /// Check markdown file(s) for render problems
    Check {
        /// Files or directories to check
        paths: Vec<String>,

        /// Emit diagnostics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            file,
            format,
            out,
            title,
        } => {
            handle_render(&file, format, out.as_deref(), title)?;
        }
        Commands::Check { paths, json } => {
            let has_errors = check::run_check(&paths, json, cli.quiet)?;
            if has_errors {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn handle_render(
    file: &str,
    format: RenderFormat,
    out: Option<&str>,
    title: Option<String>,
) -> Result<()> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("Failed to read '{file}'"))?;

    let result = sectionize::parse(&content);

    // Print parse diagnostics to stderr
    for diag in &result.diagnostics {
        let line_info = match diag.line {
            Some(line) => format!("{file}:{line}"),
            None => file.to_string(),
        };
        eprintln!("{line_info}: {}", diag.message);
    }

    let output = match format {
        RenderFormat::Fragment => result.doc.to_html(),
        RenderFormat::Page => result.doc.to_html_page(&PageConfig {
            title,
            ..PageConfig::default()
        }),
        RenderFormat::Tokens => serde_json::to_string_pretty(&result.doc.tokens)?,
    };

    match out {
        Some(path) => {
            std::fs::write(path, output).with_context(|| format!("Failed to write '{path}'"))?;
        }
        None => println!("{output}"),
    }

    Ok(())
}
