//! Directory watching: convert each finished scaffold file that
//! appears in an input directory into a JSON graph in an output
//! directory.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::{error, info, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::parser::ScaffoldParser;
use crate::writer::save_json;

/// Suffix of a finished npScarf scaffold file.
pub const DEFAULT_SUFFIX: &str = ".fin.japsa";
pub const DEFAULT_OUTPUT_NAME: &str = "assembly2.json";
/// Time to let the assembler finish writing before a file is read.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub suffix: String,
    pub output_name: String,
    pub debounce: Duration,
}

impl WatchConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input_dir: P, output_dir: Q) -> Self {
        WatchConfig {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            suffix: DEFAULT_SUFFIX.to_string(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_name)
    }

    /// True if `path` names a file this watcher should convert.
    pub fn is_trigger(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| name.ends_with(&self.suffix))
    }
}

/// Check that `dir` exists and is a directory.
pub fn check_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    let display = absolute(dir);
    if !dir.exists() {
        bail!("Directory does not exist: {}", display.display());
    }
    if !dir.is_dir() {
        bail!("Not a directory: {}", display.display());
    }
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Convert one scaffold file, writing the graph to the configured
/// output file. Returns the path written.
pub fn convert_file(
    config: &WatchConfig,
    parser: &ScaffoldParser,
    input: &Path,
) -> Result<PathBuf> {
    let graph = parser
        .parse_file(input)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    let output = config.output_path();
    save_json(&graph, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(output)
}

/// Trigger files named by one filesystem event.
fn trigger_paths<'a>(
    config: &'a WatchConfig,
    event: &'a Event,
) -> impl Iterator<Item = &'a PathBuf> + 'a {
    let relevant = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
    event
        .paths
        .iter()
        .filter(move |p| relevant && config.is_trigger(p))
}

fn collect(config: &WatchConfig, res: notify::Result<Event>, pending: &mut Vec<PathBuf>) {
    match res {
        Ok(event) => {
            for path in trigger_paths(config, &event) {
                info!("{:?}: {}", event.kind, path.display());
                if !pending.contains(path) {
                    pending.push(path.clone());
                }
            }
        }
        Err(err) => error!("File watcher error: {}", err),
    }
}

/// Block until some event names a trigger file, wait out the debounce,
/// then fold in whatever else queued up meanwhile. Paths come out in
/// arrival order, each once. Returns `None` once the channel closes.
fn next_batch(
    config: &WatchConfig,
    events: &Receiver<notify::Result<Event>>,
) -> Option<Vec<PathBuf>> {
    let mut pending = Vec::new();
    while pending.is_empty() {
        let res = events.recv().ok()?;
        collect(config, res, &mut pending);
    }

    thread::sleep(config.debounce);
    for res in events.try_iter() {
        collect(config, res, &mut pending);
    }
    Some(pending)
}

/// Watches the input directory and converts trigger files one at a
/// time, on the calling thread.
pub struct ScaffoldWatcher {
    config: WatchConfig,
    parser: ScaffoldParser,
    // dropping the watcher closes the event channel
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
}

impl ScaffoldWatcher {
    pub fn new(config: WatchConfig, parser: ScaffoldParser) -> Result<Self> {
        check_dir(&config.input_dir)?;
        check_dir(&config.output_dir)?;

        let (tx, events) = channel();
        let mut watcher = notify::recommended_watcher(tx)
            .context("Failed to create file watcher")?;
        watcher
            .watch(&config.input_dir, RecursiveMode::NonRecursive)
            .with_context(|| {
                format!("Failed to watch {}", config.input_dir.display())
            })?;

        Ok(ScaffoldWatcher {
            config,
            parser,
            _watcher: watcher,
            events,
        })
    }

    /// Process events until the watcher shuts down. Conversion
    /// failures are logged and don't stop the loop.
    pub fn run(&self) -> Result<()> {
        info!("Monitoring directory: {}", absolute(&self.config.input_dir).display());
        info!("Output directory: {}", absolute(&self.config.output_dir).display());

        while let Some(batch) = next_batch(&self.config, &self.events) {
            for path in batch {
                self.process(&path);
            }
        }

        warn!("File watcher stopped");
        Ok(())
    }

    fn process(&self, path: &Path) {
        match convert_file(&self.config, &self.parser, path) {
            Ok(output) => info!("Wrote {}", output.display()),
            Err(err) => error!("{:#}", err),
        }
    }
}
