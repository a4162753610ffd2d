use std::{error, fmt};

use bstr::ByteSlice;

pub type FieldResult<T> = Result<T, ParseFieldError>;
pub type ParseResult<T> = Result<T, ParseError>;

/// How the parser reacts to sequence lines it can only partially
/// understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserTolerance {
    /// Substitute the fallback lengths and keep going; a parse never
    /// fails because of the file contents.
    Lenient,
    /// Any field error or unrecognized sequence line aborts the parse.
    Strict,
}

impl Default for ParserTolerance {
    fn default() -> Self {
        Self::Lenient
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFieldError {
    /// A token the line grammar requires was not present. Includes
    /// the token.
    MissingToken(&'static str),
    /// A length or coordinate wasn't an integer
    ParseIntError,
    /// A field wasn't valid UTF-8
    Utf8Error,
    /// The `(start,end)` pair of a nanopore line was malformed
    InvalidCoordinates,
}

macro_rules! impl_many_from {
    ($to:ty, ($from:ty, $out:expr)) => (
        impl From<$from> for $to {
            fn from(_: $from) -> Self {
                $out
            }
        }
    );
    ($to:ty, ($from:ty, $out:expr), $(($f:ty, $o:expr)),* $(,)?) => (
        impl_many_from!($to, ($from, $out));
        impl_many_from!($to, $(($f, $o)),*);
    );
}

impl_many_from!(
    ParseFieldError,
    (std::str::Utf8Error, ParseFieldError::Utf8Error),
    (std::num::ParseIntError, ParseFieldError::ParseIntError),
);

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseFieldError as PFE;
        match self {
            PFE::MissingToken(token) => {
                write!(f, "Line is missing the `{}` token", token)
            }
            PFE::ParseIntError => {
                write!(f, "Failed to parse a length field as an integer")
            }
            PFE::Utf8Error => {
                write!(f, "Failed to parse a bytestring as a UTF-8 string")
            }
            PFE::InvalidCoordinates => {
                write!(f, "Failed to parse a `(start,end)` coordinate pair")
            }
        }
    }
}

impl error::Error for ParseFieldError {}

/// Errors produced while turning a scaffold file into a graph
#[derive(Debug)]
pub enum ParseError {
    /// A sequence line matched neither the assembler nor the
    /// nanopore grammar. Only returned by a strict parser.
    UnrecognizedLine(String),
    /// A field of a sequence line couldn't be parsed. Includes the
    /// problem line. Only returned by a strict parser.
    InvalidLine(ParseFieldError, String),
    /// Wrapper for an IO error.
    IOError(std::io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseError as PE;
        match self {
            PE::UnrecognizedLine(line) => {
                write!(f, "Unrecognized sequence line {}", line)
            }
            PE::InvalidLine(field_err, line) => {
                write!(f, "Failed to parse line {}, error: {}", line, field_err)
            }
            PE::IOError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl From<std::io::Error> for ParseError {
    #[inline]
    fn from(err: std::io::Error) -> Self {
        Self::IOError(err)
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParseError::InvalidLine(err, _) => Some(err),
            ParseError::IOError(err) => Some(err),
            ParseError::UnrecognizedLine(_) => None,
        }
    }
}

impl ParseError {
    #[inline]
    pub(crate) fn invalid_line(error: ParseFieldError, line: &[u8]) -> Self {
        Self::InvalidLine(error, line.to_str_lossy().into_owned())
    }

    #[inline]
    pub(crate) fn unrecognized_line(line: &[u8]) -> Self {
        Self::UnrecognizedLine(line.to_str_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_convert() {
        let int_err = "12a".parse::<i64>().unwrap_err();
        assert_eq!(ParseFieldError::from(int_err), ParseFieldError::ParseIntError);

        let utf8_err = std::str::from_utf8(&[0xff, 0xfe]).unwrap_err();
        assert_eq!(ParseFieldError::from(utf8_err), ParseFieldError::Utf8Error);
    }

    #[test]
    fn invalid_line_display() {
        let err = ParseError::invalid_line(
            ParseFieldError::ParseIntError,
            b">NODE_1_length_xx_cov_2.0",
        );
        assert_eq!(
            err.to_string(),
            "Failed to parse line >NODE_1_length_xx_cov_2.0, error: \
             Failed to parse a length field as an integer"
        );
    }
}
