//! phoneme-frames command line interface
//!
//! Builds, filters and segments phone description tables.

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use phoneme_frames::corpus::Corpus;
use phoneme_frames::decoder::{self, SymphoniaLoader};
use phoneme_frames::description::{self, DescriptionFilter};
use phoneme_frames::encoder::export_frames;
use phoneme_frames::processor::{FrameConfig, FrameExtractor, FrameSegmenter, TailPolicy};
use phoneme_frames::{DatasetResult, PhonemeDataset, PhonemeLabeler};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phoneme-frames")]
#[command(about = "Phone-level training frames from aligned speech corpora", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum CorpusArg {
    Arctic,
    Timit,
    Librispeech,
}

impl From<CorpusArg> for Corpus {
    fn from(arg: CorpusArg) -> Self {
        match arg {
            CorpusArg::Arctic => Corpus::Arctic,
            CorpusArg::Timit => Corpus::Timit,
            CorpusArg::Librispeech => Corpus::LibriSpeech,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the description table for a corpus
    Describe {
        /// Corpus layout
        #[arg(short, long, value_enum)]
        corpus: CorpusArg,

        /// Corpus root directory
        #[arg(short, long, value_name = "DIR")]
        root: PathBuf,

        /// Output CSV
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Phone class groups (JSON array of {"class", "phones"})
        #[arg(long, value_name = "FILE")]
        classes: Option<PathBuf>,

        /// Tag this fraction of rows as test (corpora without their own split)
        #[arg(long)]
        test_fraction: Option<f64>,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Select rows from a description table
    Filter {
        /// Input CSV
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output CSV
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Usage tag (train, test, ...)
        #[arg(long)]
        usage: Option<String>,

        /// Phone classes to keep (repeatable)
        #[arg(long = "class")]
        classes: Vec<String>,

        /// Gender code (M or F)
        #[arg(long)]
        gender: Option<String>,

        /// Dialects or first languages to keep (repeatable)
        #[arg(long = "dialect")]
        dialects: Vec<String>,

        /// Random fraction of the remaining rows
        #[arg(long)]
        fraction: Option<f64>,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Cut the audio behind a description table into frames
    Frames {
        /// Input CSV
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Corpus root directory
        #[arg(short, long, value_name = "DIR")]
        root: PathBuf,

        /// Frame width in samples
        #[arg(short, long, default_value = "1024")]
        frame_length: usize,

        /// Pad each interval to this width instead of windowing
        #[arg(short, long)]
        padding_length: Option<usize>,

        /// One unpadded frame per interval
        #[arg(long)]
        no_overlap: bool,

        /// Keep segments longer than the target width instead of truncating
        #[arg(long)]
        keep_oversized: bool,

        /// Write every frame as a WAV file into this directory
        #[arg(short, long, value_name = "DIR")]
        export: Option<PathBuf>,
    },

    /// Print audio file metadata
    Probe {
        /// Input audio file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env().filter_level(level).init();

    info!("phoneme-frames {}", phoneme_frames::VERSION);

    match cli.command {
        Commands::Describe {
            corpus,
            root,
            output,
            classes,
            test_fraction,
            seed,
        } => {
            let labeler = match classes {
                Some(path) => PhonemeLabeler::from_json_file(path)?,
                None => PhonemeLabeler::identity(),
            };
            let mut rows = Corpus::from(corpus).describe(&root, &labeler)?;
            if let Some(fraction) = test_fraction {
                description::assign_random_split(&mut rows, fraction, &mut StdRng::seed_from_u64(seed))?;
            }
            description::write_csv(&output, &rows)?;
        }
        Commands::Filter {
            input,
            output,
            usage,
            classes,
            gender,
            dialects,
            fraction,
            seed,
        } => {
            let filter = DescriptionFilter {
                usage,
                phone_classes: (!classes.is_empty()).then_some(classes),
                gender,
                dialects: (!dialects.is_empty()).then_some(dialects),
                fraction,
            };
            let rows = filter.apply(description::read_csv(&input)?, &mut StdRng::seed_from_u64(seed))?;
            description::write_csv(&output, &rows)?;
        }
        Commands::Frames {
            input,
            root,
            frame_length,
            padding_length,
            no_overlap,
            keep_oversized,
            export,
        } => {
            let config = FrameConfig {
                overlapping: !no_overlap,
                frame_length,
                padding_length,
                tail: if keep_oversized {
                    TailPolicy::KeepOversized
                } else {
                    TailPolicy::Truncate
                },
            };
            run_frames(input, root, config, export)?;
        }
        Commands::Probe { input } => {
            let metadata = decoder::probe(&input)?;
            println!("File:        {}", input.display());
            println!("Codec:       {}", metadata.codec);
            println!("Sample rate: {} Hz", metadata.sample_rate);
            println!("Channels:    {}", metadata.channels.name());
            if let Some(bit_depth) = metadata.bit_depth {
                println!("Bit depth:   {}", bit_depth.bits());
            }
            if let Some(seconds) = metadata.duration_secs() {
                println!("Duration:    {:.3} s", seconds);
            }
        }
    }

    Ok(())
}

fn run_frames(input: PathBuf, root: PathBuf, config: FrameConfig, export: Option<PathBuf>) -> DatasetResult<()> {
    let rows = description::read_csv(&input)?;
    let extractor = FrameExtractor::new(FrameSegmenter::new(config)?, SymphoniaLoader, &root);
    let (frames, stats) = extractor.extract(&rows)?;

    let dataset = PhonemeDataset::new(frames);
    println!("Files:     {}", stats.files_loaded);
    println!("Intervals: {}", stats.intervals_processed);
    println!("Frames:    {}", stats.frames_emitted);
    for (class_index, count) in dataset.class_counts() {
        println!("  class {:>3}: {}", class_index, count);
    }

    if let Some(dir) = export {
        export_frames(dir, dataset.frames())?;
    }
    Ok(())
}
