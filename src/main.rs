mod config;
mod db;
mod error;
mod export;
mod parser;
mod search;
mod source;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tracing::info;

use config::Settings;
use export::OutputFormat;
use parser::entry::Dialect;

#[derive(Parser)]
#[command(name = "yano_lexicon", about = "Yanomami-Spanish dictionary text to structured entries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a dictionary text dump into entries
    Parse {
        /// Form-feed separated text, or JSON `[[line, ...], ...]`
        input: PathBuf,
        /// Where to write the entries
        #[arg(short, long, default_value = "data/structured_dictionary.json")]
        output: PathBuf,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// Also write vector texts (JSONL) here
        #[arg(long)]
        vectors: Option<PathBuf>,
        /// Skip the SQLite store
        #[arg(long)]
        no_db: bool,
    },
    /// Export stored entries
    Export {
        #[arg(short, long, default_value = "data/structured_dictionary.json")]
        output: PathBuf,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Write vector texts for stored entries
    Vectors {
        #[arg(short, long, default_value = "data/vector_texts.jsonl")]
        output: PathBuf,
    },
    /// Text search over stored entries
    Search {
        query: String,
        /// Max hits
        #[arg(short = 'n', long, default_value = "3")]
        k: usize,
    },
    /// Show store statistics
    Stats,
    /// Entries overview table
    Overview {
        /// Filter by semantic field (e.g. "Botánica" or "Bot.")
        #[arg(short, long)]
        field: Option<String>,
        /// Filter by dialect (ora_teri, shamatari)
        #[arg(short, long)]
        dialect: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
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
    let settings = Settings::load()?;

    let result = match cli.command {
        Commands::Parse {
            input,
            output,
            format,
            vectors,
            no_db,
        } => {
            let started_at = chrono::Utc::now().to_rfc3339();
            let pages = source::load_pages(&input)?;
            info!(path = %input.display(), pages = pages.len(), "loaded source");

            let doc = parse_pages(&pages, &settings)?;
            export::write_entries(&output, &doc.entries, format)?;
            println!("Saved {} entries to {}", doc.entries.len(), output.display());

            if let Some(path) = vectors {
                let records = export::vector_records(&doc.entries);
                export::write_vector_records(&path, &records)?;
                println!("Saved {} vector texts to {}", records.len(), path.display());
            }

            if !no_db {
                let conn = db::connect(&settings.db_path)?;
                db::init_schema(&conn)?;
                let saved = db::save_entries(&conn, &doc.entries)?;
                db::save_run(
                    &conn,
                    &db::RunRow {
                        run_id: db::new_run_id(),
                        source: input.display().to_string(),
                        pages: doc.pages,
                        skipped_pages: doc.skipped_pages,
                        blocks: doc.blocks,
                        malformed: doc.malformed,
                        rejected: doc.rejected,
                        entries: doc.entries.len(),
                        started_at,
                    },
                )?;
                println!("Stored {} entries in {}", saved, settings.db_path);
            }

            println!(
                "Pages: {} ({} front matter) | blocks: {} | malformed: {} | rejected: {}",
                doc.pages, doc.skipped_pages, doc.blocks, doc.malformed, doc.rejected
            );
            Ok(())
        }
        Commands::Export { output, format } => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let entries = db::fetch_entries(&conn)?;
            if entries.is_empty() {
                println!("No entries stored. Run 'parse' first.");
                return Ok(());
            }
            export::write_entries(&output, &entries, format)?;
            println!("Exported {} entries to {}", entries.len(), output.display());
            Ok(())
        }
        Commands::Vectors { output } => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let entries = db::fetch_entries(&conn)?;
            if entries.is_empty() {
                println!("No entries stored. Run 'parse' first.");
                return Ok(());
            }
            let records = export::vector_records(&entries);
            export::write_vector_records(&output, &records)?;
            println!("Saved {} vector texts to {}", records.len(), output.display());
            Ok(())
        }
        Commands::Search { query, k } => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let entries = db::fetch_entries(&conn)?;
            let hits = search::search(&entries, &query, k);
            if hits.is_empty() {
                println!("No matches for {:?}.", query);
                return Ok(());
            }
            for hit in &hits {
                println!("{}. {}", hit.rank, hit.headword);
                if !hit.definition.is_empty() {
                    println!("   {}", truncate(&hit.definition, 100));
                }
                for x in hit.examples.iter().take(3) {
                    println!("   - {} = {}", x.source, x.translation);
                }
            }
            Ok(())
        }
        Commands::Overview {
            field,
            dialect,
            limit,
        } => {
            let dialect = match dialect.as_deref() {
                Some(tag) => Some(
                    Dialect::from_tag(tag).ok_or_else(|| anyhow!("unknown dialect: {}", tag))?,
                ),
                None => None,
            };
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let rows = db::fetch_overview(&conn, field.as_deref(), dialect, limit)?;
            if rows.is_empty() {
                println!("No entries found.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<18} | {:<12} | {:<11} | {:<40} | {:>3}",
                "#", "Headword", "Grammar", "Field", "Definition", "Ex"
            );
            println!("{}", "-".repeat(102));

            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<18} | {:<12} | {:<11} | {:<40} | {:>3}",
                    i + 1,
                    truncate(&r.headword, 18),
                    truncate(&r.grammar, 12),
                    r.field,
                    truncate(&r.definition, 37),
                    r.examples
                );
            }
            println!("\n{} entries", rows.len());
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Entries:       {}", s.entries);
            println!("Examples:      {}", s.examples);
            println!("With field:    {}", s.with_field);
            println!("With dialects: {}", s.with_dialects);
            println!("With notes:    {}", s.with_notes);
            println!("Runs:          {}", s.runs);
            if let Some(run) = s.last_run {
                println!(
                    "Last run:      {} ({}) pages {} / blocks {} / entries {} / malformed {}",
                    run.run_id, run.source, run.pages, run.blocks, run.entries, run.malformed
                );
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn parse_pages(
    pages: &[source::Page],
    settings: &Settings,
) -> anyhow::Result<parser::ProcessedDocument> {
    use indicatif::{ProgressBar, ProgressStyle};

    let opts = settings.pipeline_options();
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} blocks ({per_sec})")?
            .progress_chars("#>-"),
    );

    let (blocks, skipped_pages) = parser::segment_pages(pages, &opts);
    pb.set_length(blocks.len() as u64);
    let doc = parser::extract_document(
        pages.len(),
        skipped_pages,
        &blocks,
        opts.chunk_size,
        |n| pb.inc(n as u64),
    );
    pb.finish_and_clear();
    Ok(doc)
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
