//! The graph a scaffold file is converted into: every contig becomes
//! two nodes, one per end, joined by a contig entry, and consecutive
//! contigs are joined by links.

pub mod name_map;
pub mod orientation;

pub use self::name_map::*;
pub use self::orientation::*;

use serde::{Deserialize, Serialize};

/// Suffix distinguishing the two ends of a contig in node ids.
pub const PRIME: char = '\'';

/// The graph built from one scaffold file. Serializes to the JSON
/// document consumed by the visualisation front end.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    pub contig_data: Vec<ContigEntry>,
    pub nodes: Vec<GraphNode>,
    pub contig_links: Vec<ContigLink>,
}

impl Graph {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a contig under its resolved name: one contig entry plus
    /// the node pair for its two ends.
    pub fn insert_contig(&mut self, name: &str, length: i64) {
        let entry = ContigEntry::new(name, length);
        self.nodes.push(GraphNode::new(&entry.source));
        self.nodes.push(GraphNode::new(&entry.target));
        self.contig_data.push(entry);
    }

    pub fn insert_link(&mut self, link: ContigLink) {
        self.contig_links.push(link);
    }

    pub fn contig_count(&self) -> usize {
        self.contig_data.len()
    }

    pub fn link_count(&self) -> usize {
        self.contig_links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contig_data.is_empty() && self.contig_links.is_empty()
    }
}

/// A contig, running from its plain end to its primed end.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContigEntry {
    pub source: String,
    pub target: String,
    pub length: i64,
}

impl ContigEntry {
    pub fn new(name: &str, length: i64) -> Self {
        ContigEntry {
            source: name.to_string(),
            target: primed(name),
            length,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
}

impl GraphNode {
    pub fn new(id: &str) -> Self {
        GraphNode { id: id.to_string() }
    }
}

/// A directed adjacency between two contig ends. An end is `None`
/// when the strand of its line couldn't be determined, in which case
/// the key is left out of the JSON object.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContigLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl ContigLink {
    pub fn new(source: &str, target: &str) -> Self {
        ContigLink {
            source: Some(source.to_string()),
            target: Some(target.to_string()),
        }
    }

    /// Build the link from `current` to `next` for the given
    /// orientation code.
    ///
    /// | strand  | source     | target  |
    /// |---------|------------|---------|
    /// | forward | `current`  | `next'` |
    /// | reverse | `current'` | `next`  |
    pub fn between(current: &str, next: &str, orient: Orientation) -> Self {
        ContigLink {
            source: orient.current.source_end(current),
            target: orient.next.target_end(next),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.source.is_some() && self.target.is_some()
    }
}
