//! Converts the scaffold files written by npScarf into JSON graphs
//! for assembly visualisation.
//!
//! ```
//! use scaffold_json::parser::ScaffoldParser;
//! use scaffold_json::writer::graph_string;
//!
//! let input = ">A:0 Linear
//! >NODE_1_length_100_cov_2.0+(0,100)
//! >NODE_2_length_200_cov_2.0-(0,200)";
//!
//! let graph = ScaffoldParser::new().parse_lines(input.lines()).unwrap();
//! assert_eq!(4, graph.nodes.len());
//! assert!(graph_string(&graph).ends_with(r#""contigLinks":[{"source":"NODE_1","target":"NODE_2"}]}"#));
//! ```

pub mod graph;
pub mod parser;
pub mod scaffold;
pub mod sequence;
pub mod watch;
pub mod writer;
