use bstr::ByteSlice;
use lazy_static::lazy_static;
use nom::{bytes::complete::*, IResult};
use regex::bytes::Regex;

use crate::parser::error::{FieldResult, ParseFieldError};

/// Length used when an assembler line's length field isn't an integer.
pub const ASSEMBLER_LENGTH_FALLBACK: i64 = 0;
/// Length used when a nanopore line's coordinates aren't integers.
/// Zero-length contigs don't occur, so this is a small nonzero
/// placeholder.
pub const NANOPORE_LENGTH_FALLBACK: i64 = 100;

/// The two upstream encodings a sequence line can come in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// SPAdes-style `NODE_<n>_length_<len>_cov_<cov>`
    Assembler,
    /// Nanopore read names, `<name>_channel...(start,end)`
    Nanopore,
}

impl Encoding {
    #[inline]
    pub fn fallback_length(&self) -> i64 {
        match self {
            Encoding::Assembler => ASSEMBLER_LENGTH_FALLBACK,
            Encoding::Nanopore => NANOPORE_LENGTH_FALLBACK,
        }
    }
}

/// Identity of one sequence line: its base name (before duplicate
/// resolution) and its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceId {
    Matched {
        base_name: String,
        length: FieldResult<i64>,
        encoding: Encoding,
    },
    Unrecognized,
}

impl SequenceId {
    /// Match a raw sequence line against the assembler grammar, then
    /// the nanopore grammar.
    pub fn parse<T: AsRef<[u8]>>(line: T) -> Self {
        let line = line.as_ref();
        parse_assembler(line)
            .or_else(|| parse_nanopore(line))
            .unwrap_or(SequenceId::Unrecognized)
    }

    /// Base name of the sequence; empty if the line was unrecognized.
    pub fn base_name(&self) -> &str {
        match self {
            SequenceId::Matched { base_name, .. } => base_name,
            SequenceId::Unrecognized => "",
        }
    }

    /// Length of the sequence, substituting the encoding's fallback
    /// if the length field couldn't be parsed. Unrecognized lines
    /// have length 0.
    pub fn length(&self) -> i64 {
        match self {
            SequenceId::Matched {
                length, encoding, ..
            } => length
                .as_ref()
                .copied()
                .unwrap_or_else(|_| encoding.fallback_length()),
            SequenceId::Unrecognized => 0,
        }
    }

    /// The length field as parsed, without any fallback.
    pub fn length_field(&self) -> Option<&FieldResult<i64>> {
        match self {
            SequenceId::Matched { length, .. } => Some(length),
            SequenceId::Unrecognized => None,
        }
    }

    pub fn encoding(&self) -> Option<Encoding> {
        match self {
            SequenceId::Matched { encoding, .. } => Some(*encoding),
            SequenceId::Unrecognized => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, SequenceId::Matched { .. })
    }
}

fn parse_int(field: &[u8]) -> FieldResult<i64> {
    let s = std::str::from_utf8(field)?;
    let x = s.parse::<i64>()?;
    Ok(x)
}

/// Lengths are never negative; a signed length field counts as
/// unparseable.
fn parse_length(field: &[u8]) -> FieldResult<i64> {
    let len = parse_int(field)?;
    if len < 0 {
        return Err(ParseFieldError::ParseIntError);
    }
    Ok(len)
}

fn parse_assembler(line: &[u8]) -> Option<SequenceId> {
    lazy_static! {
        // the single byte after `_length` is the separator, `_` or `=`
        static ref RE: Regex =
            Regex::new(r"(?-u)(?P<name>NODE.*?)_length(?:.(?P<len>.*?)_cov)?")
                .unwrap();
    }

    let caps = RE.captures(line)?;
    let base_name = caps.name("name")?.as_bytes().to_str_lossy().into_owned();
    let length = caps
        .name("len")
        .ok_or(ParseFieldError::MissingToken("_cov"))
        .and_then(|len| parse_length(len.as_bytes()));

    Some(SequenceId::Matched {
        base_name,
        length,
        encoding: Encoding::Assembler,
    })
}

fn parse_nanopore(line: &[u8]) -> Option<SequenceId> {
    lazy_static! {
        // skip the leading `>`
        static ref RE: Regex = Regex::new(r"(?-u)^.(?P<name>.*?)_channel").unwrap();
    }

    let caps = RE.captures(line)?;
    let name = caps.name("name")?;
    let base_name = name.as_bytes().to_str_lossy().into_owned();
    let rest = &line[caps.get(0)?.end()..];

    Some(SequenceId::Matched {
        base_name,
        length: nanopore_length(rest),
        encoding: Encoding::Nanopore,
    })
}

fn parse_coordinates(i: &[u8]) -> IResult<&[u8], (&[u8], &[u8])> {
    use nom::sequence::{delimited, separated_pair};

    delimited(
        tag("("),
        separated_pair(is_not(",)"), tag(","), is_not(")")),
        tag(")"),
    )(i)
}

/// Length of a nanopore sequence from the first `(start,end)` pair
/// following the `_channel` token, as `end - start`. Reversed
/// coordinates are an error.
fn nanopore_length(rest: &[u8]) -> FieldResult<i64> {
    let open = rest
        .find_byte(b'(')
        .ok_or(ParseFieldError::MissingToken("("))?;
    let (_, (start, end)) = parse_coordinates(&rest[open..])
        .map_err(|_| ParseFieldError::InvalidCoordinates)?;
    let start = parse_int(start)?;
    let end = parse_int(end)?;
    end.checked_sub(start)
        .filter(|len| *len >= 0)
        .ok_or(ParseFieldError::InvalidCoordinates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembler_lines() {
        let id = SequenceId::parse(">NODE_12_length_5301_cov_22.41_ID_23+(0,5301)");
        assert_eq!("NODE_12", id.base_name());
        assert_eq!(5301, id.length());
        assert_eq!(Some(Encoding::Assembler), id.encoding());

        // `=` separators work too, and the name doesn't have to start
        // right after the marker
        let id = SequenceId::parse(">contig:NODE_3_length=77_cov=1.0-[0,77]");
        assert_eq!("NODE_3", id.base_name());
        assert_eq!(77, id.length());
    }

    #[test]
    fn assembler_length_fallback() {
        let id = SequenceId::parse(">NODE_12_length_abc_cov_22.41+(0,10)");
        assert_eq!("NODE_12", id.base_name());
        assert_eq!(0, id.length());
        assert_eq!(
            Some(&Err(ParseFieldError::ParseIntError)),
            id.length_field()
        );

        let id = SequenceId::parse(">NODE_12_length_40");
        assert_eq!("NODE_12", id.base_name());
        assert_eq!(0, id.length());
        assert_eq!(
            Some(&Err(ParseFieldError::MissingToken("_cov"))),
            id.length_field()
        );
    }

    #[test]
    fn nanopore_lines() {
        let id = SequenceId::parse(
            ">5d3e1f8a-read_channel_212_start_time_2016+(120,4620)",
        );
        assert_eq!("5d3e1f8a-read", id.base_name());
        assert_eq!(4500, id.length());
        assert_eq!(Some(Encoding::Nanopore), id.encoding());
    }

    #[test]
    fn nanopore_length_fallback() {
        let id = SequenceId::parse(">read7_channel_3+(12,x9)");
        assert_eq!("read7", id.base_name());
        assert_eq!(100, id.length());
        assert_eq!(Some(&Err(ParseFieldError::ParseIntError)), id.length_field());

        let id = SequenceId::parse(">read7_channel_3");
        assert_eq!(100, id.length());
        assert_eq!(
            Some(&Err(ParseFieldError::MissingToken("("))),
            id.length_field()
        );

        let id = SequenceId::parse(">read7_channel_3+(12)");
        assert_eq!(100, id.length());
        assert_eq!(
            Some(&Err(ParseFieldError::InvalidCoordinates)),
            id.length_field()
        );
    }

    #[test]
    fn lengths_are_never_negative() {
        let id = SequenceId::parse(">read1_channel_3_read_1-(600,100)");
        assert_eq!(100, id.length());
        assert_eq!(
            Some(&Err(ParseFieldError::InvalidCoordinates)),
            id.length_field()
        );

        let id = SequenceId::parse(">NODE_2_length_-5_cov_1+(0,5)");
        assert_eq!("NODE_2", id.base_name());
        assert_eq!(0, id.length());
        assert_eq!(Some(&Err(ParseFieldError::ParseIntError)), id.length_field());

        // an empty pair is fine
        assert_eq!(0, SequenceId::parse(">r_channel_1+(40,40)").length());
    }

    #[test]
    fn node_without_length_token() {
        let id = SequenceId::parse(">NODE_4_cov_2+(0,9)");
        assert_eq!(SequenceId::Unrecognized, id);

        // falls through to the nanopore grammar when it can
        let id = SequenceId::parse(">NODE_4_channel_2+(0,9)");
        assert_eq!(Some(Encoding::Nanopore), id.encoding());
        assert_eq!("NODE_4", id.base_name());
        assert_eq!(9, id.length());
    }

    #[test]
    fn unrecognized_lines() {
        let id = SequenceId::parse(">scaffold_9 some free text");
        assert_eq!(SequenceId::Unrecognized, id);
        assert_eq!("", id.base_name());
        assert_eq!(0, id.length());
        assert!(!id.is_recognized());
    }

    #[test]
    fn coordinates() {
        let (i, (s, e)) = parse_coordinates(b"(10,250)+x").unwrap();
        assert_eq!(b"+x", i);
        assert_eq!(b"10", s);
        assert_eq!(b"250", e);

        assert!(parse_coordinates(b"10,250)").is_err());
        assert!(parse_coordinates(b"(,250)").is_err());
    }
}
