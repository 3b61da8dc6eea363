use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use layerdoc::{ConfigError, IngestConfig, Layer, Layout, LayoutError, MiscError};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: std::io::Error },
    #[error("{}: {source}", .path.display())]
    Layout { path: PathBuf, source: LayoutError },
    #[error("no layer with id `{0}`")]
    UnknownLayer(String),
    #[error("layer `{id}`: {source}")]
    Misc { id: String, source: MiscError },
    #[error("failed to render JSON: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "layerdoc", about = "Inspect exported design-tool layout documents")]
struct Cli {
    #[command(flatten)]
    ingest: IngestArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct IngestArgs {
    /// Deepest layer nesting to accept.
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Parse every misc blob while loading and fail on a bad one.
    #[arg(long, global = true)]
    eager_misc: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export metadata and layer count.
    Summary { file: PathBuf },
    /// Indented layer tree with resolved constraints.
    Tree { file: PathBuf },
    /// Normalised tree as JSON.
    Dump { file: PathBuf },
    /// Parsed misc metadata of one layer.
    Misc { file: PathBuf, layer_id: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = IngestConfig::from_env()?;
    if let Some(depth) = cli.ingest.max_depth {
        config.max_depth = depth;
    }
    config.eager_misc |= cli.ingest.eager_misc;

    match cli.command {
        Command::Summary { file } => {
            let layout = load(&file, &config)?;
            print!("{}", render_summary(&layout));
        }
        Command::Tree { file } => {
            let layout = load(&file, &config)?;
            print!("{}", render_tree(&layout));
        }
        Command::Dump { file } => {
            let layout = load(&file, &config)?;
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
        Command::Misc { file, layer_id } => {
            let layout = load(&file, &config)?;
            let layer = layout
                .find_by_id(&layer_id)
                .ok_or_else(|| CliError::UnknownLayer(layer_id.clone()))?;
            println!("{}", serde_json::to_string_pretty(&misc_value(layer)?)?);
        }
    }
    Ok(())
}

fn load(path: &Path, config: &IngestConfig) -> Result<Layout, CliError> {
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_owned(),
        source,
    })?;
    let layout = Layout::from_reader(BufReader::new(file), config).map_err(|source| CliError::Layout {
        path: path.to_owned(),
        source,
    })?;
    tracing::info!(path = %path.display(), layers = layout.layer_count(), "loaded layout");
    Ok(layout)
}

fn render_summary(layout: &Layout) -> String {
    [
        format!("name:     {}\n", layout.export_name()),
        format!("exporter: {}\n", layout.exporter_version()),
        format!("canvas:   {}\n", layout.rect()),
        format!("layers:   {} (max depth {})\n", layout.layer_count(), layout.depth()),
    ]
    .concat()
}

fn render_tree(layout: &Layout) -> String {
    let mut out = String::new();
    for (depth, layer) in layout.layers() {
        out.push_str(&format!(
            "{}{} [{}] h={:?} v={:?} {}\n",
            "  ".repeat(depth - 1),
            layer.name(),
            layer.class(),
            layer.horizontal_position(),
            layer.vertical_position(),
            layer.rect()
        ));
    }
    out
}

fn misc_value(layer: &Layer) -> Result<Value, CliError> {
    let map = layer.misc().get().map_err(|source| CliError::Misc {
        id: layer.id().to_owned(),
        source,
    })?;
    Ok(map.map_or(Value::Null, |m| Value::Object(m.clone())))
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
