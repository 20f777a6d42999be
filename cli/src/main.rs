//! topicgrid CLI - assemble, validate, and inspect topic documents

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use topicgrid::{
    decorate, load_document, Composer, CustomGeometry, DocumentStats, EditorTree, JsonFormat,
    LayoutCatalog, RawBlock, Selection, TemplateType,
};

#[derive(Parser)]
#[command(name = "topicgrid")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Lay out mixed-media topic documents on template grids", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a JSON array of raw blocks into a document
    Assemble {
        /// Raw blocks file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Template to lay the blocks out with
        #[arg(short, long, env = "TOPICGRID_TEMPLATE")]
        template: TemplateType,

        /// Grid geometry for the custom template
        #[arg(short, long, value_name = "FILE")]
        geometry: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Reject media whose MIME type contradicts its block type
        #[arg(long)]
        strict_mime: bool,
    },

    /// Validate persisted documents
    Validate {
        /// Document files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Show template grid geometry
    Describe {
        /// Template (all built-in templates if not specified)
        #[arg(value_name = "TEMPLATE")]
        template: Option<TemplateType>,

        /// Grid geometry for the custom template
        #[arg(short, long, value_name = "FILE")]
        geometry: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Document file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Compute selection decorations for an editor tree
    Decorate {
        /// Editor tree file
        #[arg(value_name = "TREE")]
        tree: PathBuf,

        /// Selection start
        #[arg(long)]
        from: usize,

        /// Selection end
        #[arg(long)]
        to: usize,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assemble {
            input,
            template,
            geometry,
            output,
            compact,
            strict_mime,
        } => cmd_assemble(
            &input,
            template,
            geometry.as_deref(),
            output.as_deref(),
            compact,
            strict_mime,
        ),
        Commands::Validate { inputs } => cmd_validate(&inputs),
        Commands::Describe { template, geometry } => cmd_describe(template, geometry.as_deref()),
        Commands::Info { input } => cmd_info(&input),
        Commands::Decorate { tree, from, to } => cmd_decorate(&tree, from, to),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_geometry(path: &Path) -> Result<CustomGeometry, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn read_raw_blocks(path: &Path) -> Result<Vec<RawBlock>, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn cmd_assemble(
    input: &Path,
    template: TemplateType,
    geometry: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
    strict_mime: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw_blocks = read_raw_blocks(input)?;

    let mut composer = Composer::new();
    if let Some(path) = geometry {
        composer = composer.with_custom_geometry(read_geometry(path)?);
    }
    if strict_mime {
        composer = composer.strict_mime();
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let assembled = composer.assemble(template, &raw_blocks)?;

    if let Some(path) = output {
        assembled.save(path, format)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", assembled.to_json(format)?);
    }

    Ok(())
}

/// Load every input, summing the stats of those that validate.
fn load_all<'a>(
    inputs: &'a [PathBuf],
    pb: &ProgressBar,
) -> (DocumentStats, Vec<(&'a PathBuf, topicgrid::Error)>) {
    let mut totals = DocumentStats::new();
    let mut failures = Vec::new();
    for input in inputs {
        pb.set_message(input.display().to_string());
        match load_document(input) {
            Ok(doc) => totals.merge(&DocumentStats::collect(&doc)),
            Err(e) => failures.push((input, e)),
        }
        pb.inc(1);
    }
    (totals, failures)
}

fn cmd_validate(inputs: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let (totals, failures) = load_all(inputs, &pb);
    pb.finish_and_clear();

    for input in inputs {
        match failures.iter().find(|(path, _)| *path == input) {
            Some((_, e)) => println!("{} {}: {}", "✗".red(), input.display(), e),
            None => println!("{} {}", "✓".green(), input.display()),
        }
    }

    println!(
        "{}",
        format!(
            "{} block(s), {} media byte(s) across valid documents",
            totals.block_count(),
            totals.media_bytes
        )
        .dimmed()
    );

    if failures.is_empty() {
        println!("\n{} {} document(s) valid", "Done!".green().bold(), inputs.len());
        Ok(())
    } else {
        Err(format!("{} of {} document(s) invalid", failures.len(), inputs.len()).into())
    }
}

fn cmd_describe(
    template: Option<TemplateType>,
    geometry: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = match geometry {
        Some(path) => LayoutCatalog::new().with_custom(read_geometry(path)?),
        None => LayoutCatalog::new(),
    };

    let templates = match template {
        Some(template) => vec![template],
        None => LayoutCatalog::templates().to_vec(),
    };

    for template in templates {
        let geometry = catalog.describe(template)?;
        println!(
            "{} {}",
            template.to_string().cyan().bold(),
            format!(
                "({} x {}, {} slot(s))",
                geometry.columns, geometry.rows, geometry.slot_count
            )
            .dimmed()
        );
        for (i, slot) in geometry.slots.iter().enumerate() {
            let branch = if i + 1 == geometry.slots.len() {
                "└─"
            } else {
                "├─"
            };
            println!(
                "  {} column {}, row {}",
                branch.dimmed(),
                slot.grid_column,
                slot.grid_row
            );
        }
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;
    let stats = DocumentStats::collect(&doc);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Template".bold(), doc.template());
    println!(
        "{}: {} x {}",
        "Grid".bold(),
        doc.layout().columns,
        doc.layout().rows
    );
    println!(
        "{}: {} filled, {} free",
        "Slots".bold(),
        stats.filled_slots,
        stats.free_slots
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Text blocks".bold(), stats.text_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Videos".bold(), stats.video_count);
    println!("{}: {}", "Audio".bold(), stats.audio_count);
    println!("{}: {}", "Documents".bold(), stats.document_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    if stats.media_bytes > 0 {
        println!("{}: {}", "Media bytes".bold(), stats.media_bytes);
    }

    println!();
    println!("{}", "Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", topicgrid::to_text(&doc));

    Ok(())
}

fn cmd_decorate(tree: &Path, from: usize, to: usize) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(tree)?;
    let tree: EditorTree = serde_json::from_str(&json)?;

    let decorations = decorate(&tree, Selection::new(from, to));
    log::debug!(
        "{} decoration(s) over {} node(s)",
        decorations.len(),
        tree.node_count()
    );
    println!("{}", serde_json::to_string_pretty(&decorations)?);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "topicgrid".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Template-driven layout for topic documents");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/topicgrid".dimmed());
    println!("License: MIT");
}
