/// Which side a position sticks to when content is inserted exactly at it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Assoc {
    /// Stay before inserted content
    Before,
    /// Move past inserted content
    After,
}

/// A replaced range in the old document
#[derive(Debug, Copy, Clone, PartialEq, Eq, new)]
pub struct MapRange {
    /// Start of the range
    pub start: usize,
    /// Size of the replaced content
    pub old_size: usize,
    /// Size of the replacement
    pub new_size: usize,
}

/// The result of mapping a position
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MapResult {
    /// The mapped position
    pub pos: usize,
    /// Whether the content on the `assoc` side of the position was deleted
    pub deleted: bool,
}

/// A map describing the deletions and insertions made by a step, which can be used to find the
/// correspondence between positions in the pre-step version of a document and the same position
/// in the post-step version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepMap {
    ranges: Vec<MapRange>,
}

impl StepMap {
    /// Create a position map. The ranges must be sorted and must not overlap.
    pub fn new(ranges: Vec<MapRange>) -> Self {
        StepMap { ranges }
    }

    /// A map that doesn't change any position.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Map a position through this map.
    pub fn map(&self, pos: usize, assoc: Assoc) -> usize {
        self.map_result(pos, assoc).pos
    }

    /// Map a position through this map, reporting whether it was deleted.
    pub fn map_result(&self, pos: usize, assoc: Assoc) -> MapResult {
        let mut diff: isize = 0;
        for range in &self.ranges {
            let start = range.start;
            if start > pos {
                break;
            }
            let end = start + range.old_size;
            if pos <= end {
                let side = if range.old_size == 0 {
                    assoc
                } else if pos == start {
                    Assoc::Before
                } else if pos == end {
                    Assoc::After
                } else {
                    assoc
                };
                let offset = match side {
                    Assoc::Before => 0,
                    Assoc::After => range.new_size,
                };
                let edge = match assoc {
                    Assoc::Before => start,
                    Assoc::After => end,
                };
                return MapResult {
                    pos: shift(start + offset, diff),
                    deleted: pos != edge,
                };
            }
            diff += range.new_size as isize - range.old_size as isize;
        }
        MapResult {
            pos: shift(pos, diff),
            deleted: false,
        }
    }
}

fn shift(pos: usize, diff: isize) -> usize {
    if diff < 0 {
        pos.saturating_sub(diff.unsigned_abs())
    } else {
        pos + diff as usize
    }
}

/// A mapping represents a pipeline of zero or more step maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    maps: Vec<StepMap>,
}

impl Mapping {
    /// Create a new, empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// The step maps in this mapping.
    pub fn maps(&self) -> &[StepMap] {
        &self.maps
    }

    /// Add a step map to the end of this mapping.
    pub fn append_map(&mut self, map: StepMap) {
        self.maps.push(map);
    }

    /// Add all the step maps in a given mapping to this one.
    pub fn append_mapping(&mut self, mapping: &Mapping) {
        self.maps.extend(mapping.maps.iter().cloned());
    }

    /// Map a position through this mapping.
    pub fn map(&self, pos: usize, assoc: Assoc) -> usize {
        self.map_result(pos, assoc).pos
    }

    /// Map a position through this mapping, reporting whether it was deleted by any step.
    pub fn map_result(&self, pos: usize, assoc: Assoc) -> MapResult {
        self.maps.iter().fold(
            MapResult {
                pos,
                deleted: false,
            },
            |acc, map| {
                let next = map.map_result(acc.pos, assoc);
                MapResult {
                    pos: next.pos,
                    deleted: acc.deleted || next.deleted,
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Assoc, MapRange, Mapping, StepMap};

    #[test]
    fn test_map_insertion() {
        let map = StepMap::new(vec![MapRange::new(7, 0, 1)]);
        assert_eq!(map.map(3, Assoc::After), 3);
        assert_eq!(map.map(7, Assoc::Before), 7);
        assert_eq!(map.map(7, Assoc::After), 8);
        assert_eq!(map.map(9, Assoc::Before), 10);
    }

    #[test]
    fn test_map_deletion() {
        let map = StepMap::new(vec![MapRange::new(3, 1, 0)]);
        assert_eq!(map.map(2, Assoc::After), 2);
        assert_eq!(map.map(3, Assoc::After), 3);
        assert!(!map.map_result(3, Assoc::Before).deleted);
        assert!(map.map_result(3, Assoc::After).deleted);
        assert_eq!(map.map(4, Assoc::Before), 3);
        assert_eq!(map.map(8, Assoc::After), 7);
    }

    #[test]
    fn test_mapping_pipeline() {
        let mut mapping = Mapping::new();
        mapping.append_map(StepMap::new(vec![MapRange::new(7, 0, 1)]));
        mapping.append_map(StepMap::new(vec![MapRange::new(3, 1, 0)]));
        assert_eq!(mapping.map(3, Assoc::After), 3);
        assert_eq!(mapping.map(7, Assoc::After), 7);
        assert_eq!(mapping.map(0, Assoc::Before), 0);
    }
}
