use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::PathBuf;

use bstr::io::*;

use scaffold_json::graph::Graph;
use scaffold_json::parser::*;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn load_lines(path: &PathBuf) -> io::Result<Vec<Vec<u8>>> {
    let file = File::open(path)?;
    let lines = BufReader::new(file).byte_lines();
    lines.collect()
}

/// A synthetic scaffold file with `scaffolds` scaffolds of `per_scaffold`
/// contigs each, alternating topology and strand, with every tenth
/// contig name repeated.
fn synthetic_lines(scaffolds: usize, per_scaffold: usize) -> Vec<Vec<u8>> {
    let mut lines = Vec::with_capacity(scaffolds * (per_scaffold * 2 + 1));
    for s in 0..scaffolds {
        let topology = if s % 2 == 0 { "Linear" } else { "Circular" };
        lines.push(format!(">A:{} {}", s, topology).into_bytes());
        for c in 0..per_scaffold {
            let id = (s * per_scaffold + c) % (scaffolds * per_scaffold * 9 / 10 + 1);
            let strand = if c % 3 == 0 { '-' } else { '+' };
            let len = 500 + c * 37;
            if c % 5 == 4 {
                lines.push(
                    format!(">read{}_channel_{}_read_{}{}(0,{})", id, c, s, strand, len)
                        .into_bytes(),
                );
            } else {
                lines.push(
                    format!(">NODE_{}_length_{}_cov_12.5_ID_{}{}(0,{})", id, len, id, strand, len)
                        .into_bytes(),
                );
            }
            lines.push(b"ACGTACGTACGTACGTACGTACGTACGTACGT".to_vec());
        }
    }
    lines
}

fn parse_lines(input: &[Vec<u8>]) -> Graph {
    let parser = ScaffoldParser::new();
    parser.parse_lines(input.iter()).unwrap()
}

fn parse_lines_strict(input: &[Vec<u8>]) -> Graph {
    let parser = ScaffoldParser::with_config(ParserConfig::strict());
    parser.parse_lines(input.iter()).unwrap()
}

static SCAFFOLDPATH: &str = "./test/scaffolds/";

macro_rules! bench_file {
    ($parser:ident, $id:literal, $name:ident, $file:literal) => {
        fn $name(c: &mut Criterion) {
            let mut path = PathBuf::from(SCAFFOLDPATH);
            path.push($file);
            let lines: Vec<Vec<u8>> = load_lines(&path).unwrap();
            c.bench_with_input(BenchmarkId::new($id, $file), &lines, |b, l| {
                b.iter(|| $parser(&l));
            });
        }
    };
}

macro_rules! bench_synthetic {
    ($parser:ident, $id:literal, $name:ident, $scaffolds:literal, $per:literal) => {
        fn $name(c: &mut Criterion) {
            let lines = synthetic_lines($scaffolds, $per);
            let label = format!("{}x{}", $scaffolds, $per);
            c.bench_with_input(BenchmarkId::new($id, label), &lines, |b, l| {
                b.iter(|| $parser(&l));
            });
        }
    };
}

bench_file!(parse_lines, "lenient", lil_lenient, "lil.fin.japsa");

bench_synthetic!(parse_lines, "lenient", small_lenient, 10, 50);
bench_synthetic!(parse_lines, "lenient", large_lenient, 200, 500);
bench_synthetic!(parse_lines_strict, "strict", large_strict, 200, 500);

criterion_group!(
    name = scaffold_benches;
    config = Criterion::default().sample_size(25);
    targets = lil_lenient, small_lenient, large_lenient, large_strict
);

criterion_main!(scaffold_benches);
