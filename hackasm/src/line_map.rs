use bimap::BiMap;

/// Which source line produced which binary line.
///
/// Only lines that emitted code are present, and each such source line
/// produced exactly one binary line, so both directions live in a single
/// bijection and can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMap {
    lines: BiMap<usize, usize>,
}

impl LineMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn insert(&mut self, source_line: usize, binary_line: usize) {
        self.lines.insert(source_line, binary_line);
    }

    pub fn binary_line_for_source_line(&self, source_line: usize) -> Option<usize> {
        self.lines.get_by_left(&source_line).copied()
    }

    pub fn source_line_for_binary_line(&self, binary_line: usize) -> Option<usize> {
        self.lines.get_by_right(&binary_line).copied()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `(source line, binary line)` pairs ordered by binary line.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<_> = self.lines.iter().map(|(s, b)| (*s, *b)).collect();
        pairs.sort_by_key(|(_, binary)| *binary);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_in_both_directions() {
        let mut map = LineMap::new();
        map.insert(2, 0);
        map.insert(5, 1);

        assert_eq!(map.binary_line_for_source_line(5), Some(1));
        assert_eq!(map.source_line_for_binary_line(0), Some(2));
        assert_eq!(map.binary_line_for_source_line(3), None);
        assert_eq!(map.source_line_for_binary_line(7), None);
        assert_eq!(map.pairs(), vec![(2, 0), (5, 1)]);
    }

    #[test]
    fn reinserting_keeps_directions_consistent() {
        let mut map = LineMap::new();
        map.insert(2, 0);
        map.insert(2, 4);

        assert_eq!(map.len(), 1);
        assert_eq!(map.binary_line_for_source_line(2), Some(4));
        assert_eq!(map.source_line_for_binary_line(0), None);

        map.clear();
        assert!(map.is_empty());
    }
}
