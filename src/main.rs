//! diffview CLI entry point.
//!
//! Reads a unified diff from a file or stdin and prints the rendered
//! result as colored terminal output or as JSON render records.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

use diffview::config::load_config;
use diffview::parse::parse_unified;
use diffview::render::{DiffLayout, render_file, term};
use diffview::syntax::SyntectTokenizer;

#[derive(Parser, Debug)]
#[command(name = "diffview")]
#[command(about = "Render unified diffs with syntax highlighting", long_about = None)]
struct Args {
    /// Diff file to render (stdin when omitted)
    input: Option<PathBuf>,

    /// Layout variant (defaults to the configured one)
    #[arg(short, long, value_enum)]
    layout: Option<LayoutArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "ansi")]
    format: Format,

    /// syntect theme name (defaults to the configured one)
    #[arg(long)]
    theme: Option<String>,

    /// Disable colors in terminal output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Unified,
    SideBySide,
}

impl From<LayoutArg> for DiffLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Unified => DiffLayout::Unified,
            LayoutArg::SideBySide => DiffLayout::SideBySide,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Ansi,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config();

    let diff_text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading diff from stdin")?;
            buffer
        }
    };

    let layout = args.layout.map(DiffLayout::from).unwrap_or(config.layout);
    let theme = args.theme.as_deref().unwrap_or(&config.theme);
    let color = config.color && !args.no_color;
    let tokenizer = SyntectTokenizer::new(theme);

    let files = parse_unified(&diff_text).context("parsing diff")?;
    if files.is_empty() {
        eprintln!("no changes");
        return Ok(());
    }

    match args.format {
        Format::Ansi => {
            for file in &files {
                println!(
                    "── {} → {} (+{} −{})",
                    file.old_path, file.new_path, file.additions, file.deletions
                );
                let sections = render_file(file, layout, tokenizer.clone());
                print!("{}", term::sections_to_string(&sections, color));
            }
        }
        Format::Json => {
            let rendered: Vec<serde_json::Value> = files
                .iter()
                .map(|file| {
                    let sections = render_file(file, layout, tokenizer.clone());
                    serde_json::json!({
                        "old_path": file.old_path,
                        "new_path": file.new_path,
                        "language": file.language,
                        "additions": file.additions,
                        "deletions": file.deletions,
                        "sections": sections,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
    }

    Ok(())
}
