use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use scaffold_json::parser::{ParserConfig, ScaffoldParser, UnknownStrand};
use scaffold_json::watch::{ScaffoldWatcher, WatchConfig, DEFAULT_OUTPUT_NAME, DEFAULT_SUFFIX};
use scaffold_json::writer::{save_json, write_json};

#[derive(Parser)]
#[command(name = "scaffold-json")]
#[command(about = "Convert npScarf scaffold files into JSON assembly graphs", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch a directory and convert finished scaffold files as they appear
    Watch {
        /// Directory to monitor
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Directory the JSON graph is written to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// File name suffix of finished scaffold files
        #[arg(long, default_value = DEFAULT_SUFFIX)]
        suffix: String,

        /// Name of the JSON file written to the output directory
        #[arg(long, default_value = DEFAULT_OUTPUT_NAME)]
        output_name: String,

        /// Delay before reading a changed file, in milliseconds
        #[arg(long, default_value_t = 500)]
        debounce_ms: u64,

        #[command(flatten)]
        parsing: ParsingArgs,
    },

    /// Convert a single scaffold file
    Convert {
        /// Scaffold file to read
        input: PathBuf,

        /// JSON file to write; stdout if not given
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        parsing: ParsingArgs,
    },
}

#[derive(clap::Args)]
struct ParsingArgs {
    /// Fail on malformed sequence lines instead of using fallback values
    #[arg(long)]
    strict: bool,

    /// How to handle links whose lines carry no strand marker
    #[arg(long, value_enum, default_value_t = StrandPolicy::Omit)]
    unknown_strand: StrandPolicy,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrandPolicy {
    /// Leave the unknown end out of the link
    Omit,
    /// Use an empty id for the unknown end
    Blank,
    /// Skip the link
    Drop,
}

impl ParsingArgs {
    fn parser(&self) -> ScaffoldParser {
        let config = if self.strict {
            ParserConfig::strict()
        } else {
            ParserConfig::lenient()
        };
        let unknown_strand = match self.unknown_strand {
            StrandPolicy::Omit => UnknownStrand::Omit,
            StrandPolicy::Blank => UnknownStrand::Blank,
            StrandPolicy::Drop => UnknownStrand::Drop,
        };
        ScaffoldParser::with_config(config.with_unknown_strand(unknown_strand))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Watch {
            input,
            output,
            suffix,
            output_name,
            debounce_ms,
            parsing,
        } => {
            let config = WatchConfig {
                suffix,
                output_name,
                debounce: Duration::from_millis(debounce_ms),
                ..WatchConfig::new(input, output)
            };
            let watcher = ScaffoldWatcher::new(config, parsing.parser())?;
            watcher.run()?;
        }
        Commands::Convert {
            input,
            output,
            parsing,
        } => {
            let graph = parsing
                .parser()
                .parse_file(&input)
                .with_context(|| format!("Failed to parse {}", input.display()))?;

            match output {
                Some(path) => {
                    save_json(&graph, &path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote {}", path.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut writer = stdout.lock();
                    write_json(&graph, &mut writer)?;
                    writeln!(writer)?;
                }
            }
        }
    }

    Ok(())
}
