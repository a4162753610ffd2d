use bstr::ByteSlice;

use super::PRIME;

/// Strand of a single sequence line, read from the marker that
/// precedes its coordinates: `+(`/`+[` is forward, `-(`/`-[` is
/// reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    Unknown,
}

impl Strand {
    /// Scan a raw sequence line for a strand marker. A forward marker
    /// takes precedence if a line somehow carries both.
    #[inline]
    pub fn from_line<T: AsRef<[u8]>>(line: T) -> Self {
        let line = line.as_ref();
        if line.contains_str("+(") || line.contains_str("+[") {
            Strand::Forward
        } else if line.contains_str("-(") || line.contains_str("-[") {
            Strand::Reverse
        } else {
            Strand::Unknown
        }
    }

    #[inline]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Forward => Some('+'),
            Self::Reverse => Some('-'),
            Self::Unknown => None,
        }
    }

    /// Node id a link leaves from when this strand is on the
    /// upstream side: the plain id going forward, the primed id in
    /// reverse.
    pub fn source_end(&self, name: &str) -> Option<String> {
        match self {
            Self::Forward => Some(name.to_string()),
            Self::Reverse => Some(primed(name)),
            Self::Unknown => None,
        }
    }

    /// Node id a link arrives at when this strand is on the
    /// downstream side; mirror image of `source_end`.
    pub fn target_end(&self, name: &str) -> Option<String> {
        match self {
            Self::Forward => Some(primed(name)),
            Self::Reverse => Some(name.to_string()),
            Self::Unknown => None,
        }
    }
}

impl Default for Strand {
    #[inline]
    fn default() -> Strand {
        Strand::Unknown
    }
}

/// The strands of two adjacent sequence lines, upstream first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Orientation {
    pub current: Strand,
    pub next: Strand,
}

impl Orientation {
    #[inline]
    pub fn new(current: Strand, next: Strand) -> Self {
        Orientation { current, next }
    }

    /// Resolve the orientation code for a current line and the line
    /// it links to, which is either the following line or the first
    /// line of a circular scaffold.
    #[inline]
    pub fn resolve<A, B>(current: A, next: B) -> Self
    where
        A: AsRef<[u8]>,
        B: AsRef<[u8]>,
    {
        Orientation::new(Strand::from_line(current), Strand::from_line(next))
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        self.current != Strand::Unknown && self.next != Strand::Unknown
    }
}

/// Displays the two-character orientation code, e.g. `+-`. An unknown
/// strand contributes no character, so the code can be shorter.
impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.current.as_char().into_iter().chain(self.next.as_char()) {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[inline]
pub(crate) fn primed(name: &str) -> String {
    let mut id = String::with_capacity(name.len() + 1);
    id.push_str(name);
    id.push(PRIME);
    id
}
