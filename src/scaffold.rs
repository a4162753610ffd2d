use bstr::ByteSlice;

/// Prefix of a scaffold header line.
pub const HEADER_SENTINEL: &[u8] = b">A:";

/// Whether the current scaffold wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Linear,
    Circular,
}

impl Default for Topology {
    fn default() -> Self {
        Topology::Linear
    }
}

/// Topology of the scaffold being read, updated from header lines.
/// `circular_start` is `Some` exactly when the topology is circular,
/// and holds the index of the line right after the header that made
/// it so.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldState {
    topology: Topology,
    circular_start: Option<usize>,
}

impl ScaffoldState {
    pub fn new() -> Self {
        Default::default()
    }

    /// Update the state from the header line at `index` of the
    /// classified lines. Headers mentioning neither topology leave the
    /// state as it was.
    pub fn observe_header<T: AsRef<[u8]>>(&mut self, line: T, index: usize) {
        let line = line.as_ref();
        if line.contains_str("Linear") {
            self.topology = Topology::Linear;
            self.circular_start = None;
        }
        if line.contains_str("Circular") {
            self.topology = Topology::Circular;
            self.circular_start = Some(index + 1);
        }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn is_circular(&self) -> bool {
        self.topology == Topology::Circular
    }

    /// Index of the line a circular scaffold wraps back to, if the
    /// current scaffold is circular.
    pub fn wrap_target(&self) -> Option<usize> {
        self.circular_start
    }
}

/// True if a classified line is a scaffold header rather than a
/// sequence line.
#[inline]
pub fn is_header<T: AsRef<[u8]>>(line: T) -> bool {
    line.as_ref().starts_with(HEADER_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_linear() {
        let state = ScaffoldState::new();
        assert_eq!(Topology::Linear, state.topology());
        assert_eq!(None, state.wrap_target());
    }

    #[test]
    fn transitions() {
        let mut state = ScaffoldState::new();

        state.observe_header(">A:scaffold0 Circular", 3);
        assert!(state.is_circular());
        assert_eq!(Some(4), state.wrap_target());

        // unrelated headers don't change anything
        state.observe_header(">A:scaffold0 length 5000", 7);
        assert!(state.is_circular());
        assert_eq!(Some(4), state.wrap_target());

        state.observe_header(">A:scaffold1 Linear", 9);
        assert_eq!(Topology::Linear, state.topology());
        assert_eq!(None, state.wrap_target());

        state.observe_header(">A:scaffold2 Circular", 12);
        assert_eq!(Some(13), state.wrap_target());
    }

    #[test]
    fn header_lines() {
        assert!(is_header(">A:scaffold0 Linear"));
        assert!(!is_header(">NODE_1_length_10_cov_1+(0,10)"));
        assert!(!is_header(">Acinetobacter_channel_1+(0,10)"));
    }
}
