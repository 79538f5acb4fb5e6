use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use campaign_parser::db;
use campaign_parser::parser;

const SOURCE_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];
const CHUNK_SIZE: usize = 200;

#[derive(Parser)]
#[command(name = "campaign_parser", about = "Structure free-text campaign notes into typed records")]
struct Cli {
    /// SQLite database path
    #[arg(long, global = true, default_value = db::DEFAULT_DB_PATH)]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one file and print the result as JSON
    Parse {
        file: PathBuf,
        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Parse a file or a directory of notes and save to the database
    Import {
        path: PathBuf,
        /// Campaign name stored with each document
        #[arg(short, long)]
        campaign: Option<String>,
        /// Max files to import (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Imported documents table
    Overview {
        /// Hide documents below this confidence
        #[arg(long)]
        min_confidence: Option<f64>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Show database statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { file, compact } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let parsed = parser::parse(&text);
            for w in &parsed.warnings {
                warn!("{}: {}", file.display(), w);
            }
            let json = if compact {
                serde_json::to_string(&parsed)?
            } else {
                serde_json::to_string_pretty(&parsed)?
            };
            println!("{}", json);
            Ok(())
        }
        Commands::Import {
            path,
            campaign,
            limit,
        } => {
            let mut sources = collect_sources(&path)?;
            if let Some(n) = limit {
                sources.truncate(n);
            }
            if sources.is_empty() {
                println!("No note files found at {}.", path.display());
                return Ok(());
            }
            let conn = db::connect(&cli.db)?;
            db::init_schema(&conn)?;
            println!("Importing {} files...", sources.len());
            let counts = import_sources(&conn, campaign.as_deref(), &sources)?;
            counts.print();
            Ok(())
        }
        Commands::Overview {
            min_confidence,
            limit,
        } => {
            let conn = db::connect(&cli.db)?;
            db::init_schema(&conn)?;
            let rows = db::fetch_overview(&conn, min_confidence, limit)?;
            if rows.is_empty() {
                println!("No documents found.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<32} | {:<14} | {:>5} | {:>4} | {:>4} | {:>4} | {:>4} | {:>4} | {:>4} | {:>4} | {:>5}",
                "#", "Source", "Campaign", "Conf", "NPC", "Enc", "Rev", "Item", "Qst", "Loc", "Fac", "Notes"
            );
            println!("{}", "-".repeat(122));

            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<32} | {:<14} | {:>5.2} | {:>4} | {:>4} | {:>4} | {:>4} | {:>4} | {:>4} | {:>4} | {:>5}",
                    i + 1,
                    truncate(&r.source, 32),
                    truncate(&r.campaign, 14),
                    r.confidence,
                    r.npcs,
                    r.encounters,
                    r.revelations,
                    r.items,
                    r.quests,
                    r.locations,
                    r.factions,
                    r.notes,
                );
            }

            println!("\n{} documents", rows.len());
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect(&cli.db)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Documents:   {} ({} low confidence)", s.documents, s.low_confidence);
            println!("NPCs:        {}", s.npcs);
            println!("Encounters:  {}", s.encounters);
            println!("Revelations: {}", s.revelations);
            println!("Items:       {}", s.items);
            println!("Quests:      {}", s.quests);
            println!("Locations:   {}", s.locations);
            println!("Factions:    {}", s.factions);
            println!("Reference:   {}", s.references);
            println!("Notes:       {}", s.notes);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// A single file, or the note files directly inside a directory, sorted.
fn collect_sources(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("{} is neither a file nor a directory", path.display());
    }
    let mut sources: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        })
        .collect();
    sources.sort();
    Ok(sources)
}

struct ImportCounts {
    documents: usize,
    entities: usize,
    notes: usize,
    low_confidence: usize,
    skipped: usize,
}

impl ImportCounts {
    fn print(&self) {
        println!(
            "Saved {} documents, {} records, {} notes ({} low confidence, {} skipped).",
            self.documents, self.entities, self.notes, self.low_confidence, self.skipped,
        );
    }
}

fn import_sources(
    conn: &rusqlite::Connection,
    campaign: Option<&str>,
    sources: &[PathBuf],
) -> anyhow::Result<ImportCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = ImportCounts {
        documents: 0,
        entities: 0,
        notes: 0,
        low_confidence: 0,
        skipped: 0,
    };

    for chunk in sources.chunks(CHUNK_SIZE) {
        let parsed: Vec<Option<db::ParsedDocument>> = chunk
            .par_iter()
            .map(|path| match std::fs::read_to_string(path) {
                Ok(text) => Some(db::ParsedDocument {
                    source: path.display().to_string(),
                    result: parser::parse(&text),
                }),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    None
                }
            })
            .collect();

        counts.skipped += parsed.iter().filter(|d| d.is_none()).count();
        let docs: Vec<db::ParsedDocument> = parsed.into_iter().flatten().collect();
        for doc in docs.iter().filter(|d| !d.result.warnings.is_empty()) {
            warn!(
                "{}: low confidence ({:.2})",
                doc.source, doc.result.confidence
            );
            counts.low_confidence += 1;
        }

        let saved = db::save_documents(conn, campaign, &docs)?;
        counts.documents += saved.documents;
        counts.entities += saved.entities;
        counts.notes += saved.notes;
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    info!(
        "Imported {} documents ({} skipped)",
        counts.documents, counts.skipped
    );
    Ok(counts)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
