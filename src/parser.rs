pub mod error;

pub use self::error::*;

use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::iter::Filter;
use std::path::Path;

use bstr::io::BufReadExt;
use bstr::{BString, ByteSlice};
use log::{debug, info, warn};

use crate::graph::{ContigLink, Graph, NameMap, Orientation};
use crate::scaffold::{is_header, ScaffoldState};
use crate::sequence::SequenceId;

/// What to do with a link when one of its lines carries no strand
/// marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownStrand {
    /// Leave the unknown end out of the link object.
    Omit,
    /// Use an empty id for the unknown end.
    Blank,
    /// Don't emit the link at all.
    Drop,
}

impl Default for UnknownStrand {
    fn default() -> Self {
        Self::Omit
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    pub tolerance: ParserTolerance,
    pub unknown_strand: UnknownStrand,
}

impl ParserConfig {
    pub fn lenient() -> Self {
        Default::default()
    }

    pub fn strict() -> Self {
        ParserConfig {
            tolerance: ParserTolerance::Strict,
            ..Default::default()
        }
    }

    pub fn with_unknown_strand(self, unknown_strand: UnknownStrand) -> Self {
        ParserConfig {
            unknown_strand,
            ..self
        }
    }
}

/// True for the lines of a scaffold file that take part in the parse:
/// lines starting with `>`, except those starting with `>>`.
#[inline]
pub fn is_relevant(line: &[u8]) -> bool {
    line.starts_with(b">") && !line.starts_with(b">>")
}

fn relevant_item<T: AsRef<[u8]>>(line: &T) -> bool {
    is_relevant(line.as_ref())
}

/// Lazily filter the relevant lines out of a scaffold file, keeping
/// their order. The result can be cloned to restart it if the input
/// iterator can.
pub fn classify_lines<I>(lines: I) -> Filter<I, fn(&I::Item) -> bool>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    lines.filter(relevant_item::<I::Item> as fn(&I::Item) -> bool)
}

/// One classified line, with sequence lines already matched against
/// the line grammars.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScaffoldLine {
    Header(BString),
    Sequence(BString, SequenceId),
}

impl ScaffoldLine {
    fn new(line: &[u8]) -> Self {
        if is_header(line) {
            ScaffoldLine::Header(line.into())
        } else {
            ScaffoldLine::Sequence(line.into(), SequenceId::parse(line))
        }
    }

    fn as_sequence(&self) -> Option<(&BString, &SequenceId)> {
        match self {
            ScaffoldLine::Sequence(raw, id) => Some((raw, id)),
            ScaffoldLine::Header(_) => None,
        }
    }
}

/// Converts scaffold files into graphs. The parser holds only its
/// configuration; every parse starts from fresh state, so one parser
/// can be reused for any number of files.
#[derive(Default, Debug, Clone)]
pub struct ScaffoldParser {
    config: ParserConfig,
}

impl ScaffoldParser {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        ScaffoldParser { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Build the graph for the lines of one scaffold file. In lenient
    /// mode this always succeeds; malformed lines degrade to fallback
    /// names and lengths.
    pub fn parse_lines<I>(&self, lines: I) -> ParseResult<Graph>
    where
        I: Iterator,
        I::Item: AsRef<[u8]>,
    {
        // `is_relevant` only looks at the first two bytes
        let lines: Vec<ScaffoldLine> = classify_lines(lines)
            .map(|l| ScaffoldLine::new(trim_line_end(l.as_ref())))
            .collect();

        let mut state = ScaffoldState::new();
        let mut names = NameMap::new();
        let mut resolved: Vec<Option<String>> = vec![None; lines.len()];
        let mut graph = Graph::new();

        for (ix, line) in lines.iter().enumerate() {
            let (raw, id) = match line {
                ScaffoldLine::Header(raw) => {
                    state.observe_header(raw, ix);
                    continue;
                }
                ScaffoldLine::Sequence(raw, id) => (raw, id),
            };

            self.check_sequence(raw, id)?;

            let name = names.resolve(id.base_name());
            graph.insert_contig(&name, id.length());
            resolved[ix] = Some(name.clone());

            match lines.get(ix + 1).and_then(ScaffoldLine::as_sequence) {
                Some((next_raw, next_id)) => {
                    let next_name = names.peek(next_id.base_name());
                    let orient = Orientation::resolve(raw, next_raw);
                    self.push_link(&mut graph, &name, &next_name, orient);
                }
                None => {
                    // last sequence of the scaffold
                    if !state.is_circular() {
                        continue;
                    }
                    let start = state.wrap_target().and_then(|start| {
                        let (start_raw, _) = lines.get(start)?.as_sequence()?;
                        let start_name = resolved.get(start)?.as_ref()?;
                        Some((start_raw, start_name))
                    });
                    if let Some((start_raw, start_name)) = start {
                        let orient = Orientation::resolve(raw, start_raw);
                        self.push_link(&mut graph, &name, start_name, orient);
                    }
                }
            }
        }

        Ok(graph)
    }

    /// Parse a scaffold file from a buffered reader.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> ParseResult<Graph> {
        let lines = reader.byte_lines().collect::<std::io::Result<Vec<_>>>()?;
        self.parse_lines(lines.iter())
    }

    /// Read and parse a scaffold file. Unlike the content of the file,
    /// failing to open or read it is always an error.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> ParseResult<Graph> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let graph = self.parse_reader(BufReader::new(file))?;
        if graph.is_empty() {
            warn!("No scaffolds found in {}", path.display());
        }
        info!(
            "Parsed {}: {} contigs, {} links",
            path.display(),
            graph.contig_count(),
            graph.link_count()
        );
        Ok(graph)
    }

    fn check_sequence(&self, raw: &[u8], id: &SequenceId) -> ParseResult<()> {
        let strict = self.config.tolerance == ParserTolerance::Strict;
        match id.length_field() {
            None => {
                if strict {
                    return Err(ParseError::unrecognized_line(raw));
                }
                debug!("Unrecognized sequence line {}", raw.as_bstr());
            }
            Some(Err(err)) => {
                if strict {
                    return Err(ParseError::invalid_line(err.clone(), raw));
                }
                debug!(
                    "{} in {}, using length {}",
                    err,
                    raw.as_bstr(),
                    id.length()
                );
            }
            Some(Ok(_)) => (),
        }
        Ok(())
    }

    fn push_link(
        &self,
        graph: &mut Graph,
        current: &str,
        next: &str,
        orient: Orientation,
    ) {
        let mut link = ContigLink::between(current, next, orient);
        if !link.is_complete() {
            debug!(
                "No strand marker for link {} -> {} ({:?})",
                current, next, self.config.unknown_strand
            );
            match self.config.unknown_strand {
                UnknownStrand::Omit => (),
                UnknownStrand::Blank => {
                    link.source.get_or_insert_with(String::new);
                    link.target.get_or_insert_with(String::new);
                }
                UnknownStrand::Drop => return,
            }
        }
        graph.insert_link(link);
    }
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Parse a scaffold file with the default, lenient configuration.
pub fn parse_scaffold_file<P: AsRef<Path>>(path: P) -> ParseResult<Graph> {
    ScaffoldParser::new().parse_file(path)
}
