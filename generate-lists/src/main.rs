use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use generate_lists::ListsConfig;
use generate_lists::dedup::fill_duplicate_estimates;
use generate_lists::frequencies::FrequencyLookup;
use generate_lists::merge::merge_sources;
use generate_lists::pipeline::{Sources, generate, write_outputs};
use generate_lists::sources::{read_aoa_norms, read_frequency_records, read_pictures, read_sentences};
use generate_lists::table::{read_items_jsonl, write_jsonl};

/// Prepare stimulus lists for the picture naming study
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Combine the picture database with example sentences and frequencies
    Merge {
        /// Picture database (columns ITEM, NAME1, H_INDEX)
        #[arg(long)]
        pictures: PathBuf,

        /// Example sentences (columns ITEM, EXAMPLE)
        #[arg(long)]
        sentences: PathBuf,

        /// Frequency list (SUBTLEX-DE layout)
        #[arg(long)]
        frequencies: PathBuf,

        /// Merged item table to write (JSON lines)
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Copy AoA estimates to duplicate pictures that lack them
    FillDuplicates {
        /// Item table with estimates (JSON lines)
        #[arg(long)]
        items: PathBuf,

        #[arg(short, long)]
        out: PathBuf,
    },

    /// Deduplicate items and write control, experimental, repeated and familiarization lists
    Lists {
        /// Merged item table (JSON lines)
        #[arg(long)]
        items: PathBuf,

        /// AoA norms (columns Word, AoAestimate, SD)
        #[arg(long)]
        norms: PathBuf,

        /// Frequency list (SUBTLEX-DE layout)
        #[arg(long)]
        frequencies: PathBuf,

        /// Directory the lists are written to
        #[arg(short, long, default_value = "items_lists")]
        out_dir: PathBuf,

        /// JSON config file; defaults are used for missing fields
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overrides the seed from the config
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Command::Merge {
            pictures,
            sentences,
            frequencies,
            out,
        } => {
            println!(">> Load databases...");
            let pictures = read_pictures(&pictures)?;
            let sentences = read_sentences(&sentences)?;
            let lookup = FrequencyLookup::new(read_frequency_records(&frequencies)?);
            println!(
                "{} pictures, sentences for {} items, {} frequency entries",
                pictures.len(),
                sentences.len(),
                lookup.len()
            );

            let (items, report) = merge_sources(pictures, &sentences, &lookup);
            println!(
                "Frequencies found for {} names, missing for {}",
                report.matched,
                report.missed.len()
            );

            write_jsonl(&items, &out)?;
            println!("Wrote {}", out.display());
        }
        Command::FillDuplicates { items, out } => {
            let mut items = read_items_jsonl(&items)?;
            let filled = fill_duplicate_estimates(&mut items);
            println!("Filled in estimates for {filled} duplicate items");
            write_jsonl(&items, &out)?;
        }
        Command::Lists {
            items,
            norms,
            frequencies,
            out_dir,
            config,
            seed,
        } => {
            let mut config = match config {
                Some(path) => ListsConfig::from_file(&path)?,
                None => ListsConfig::default(),
            };
            if let Some(seed) = seed {
                config.seed = seed;
            }
            log::info!("config: {config:?}");

            println!(">> Load databases...");
            let sources = Sources {
                items: read_items_jsonl(&items)?,
                norms: read_aoa_norms(&norms)?,
                frequencies: FrequencyLookup::new(read_frequency_records(&frequencies)?),
            };

            let generated = generate(sources, &config).context("List generation failed")?;
            for duplicate in &generated.dedup.ambiguous {
                println!(
                    "Warning: duplicates of `{}` tie at the lowest H-index, keeping items {:?}",
                    duplicate.name, duplicate.item_numbers
                );
            }

            write_outputs(&generated, &out_dir)?;
            println!("Lists written to {}", out_dir.display());
        }
    }

    Ok(())
}
