/// Dense map from first-sequence (reference) positions to second-sequence (query) positions.
///
/// Only positions aligned by a match or a mismatch are mapped. Iteration always goes in the
/// increasing order of reference positions.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PositionMap {
    targets: Vec<u32>,
    mapped: usize,
}

impl PositionMap {
    const UNMAPPED: u32 = u32::MAX;

    /// Empty map over a reference of the given length.
    pub fn new(reference_len: usize) -> Self {
        Self {
            targets: vec![Self::UNMAPPED; reference_len],
            mapped: 0,
        }
    }

    /// Map the reference position to the query position, replacing any previous target.
    ///
    /// Panics if the reference position is outside the map.
    pub fn insert(&mut self, reference: usize, query: usize) {
        debug_assert!(query < Self::UNMAPPED as usize);
        let slot = &mut self.targets[reference];
        if *slot == Self::UNMAPPED {
            self.mapped += 1;
        }
        *slot = query as u32;
    }

    pub fn get(&self, reference: usize) -> Option<usize> {
        match self.targets.get(reference) {
            Some(&x) if x != Self::UNMAPPED => Some(x as usize),
            _ => None,
        }
    }

    /// Mapped `(reference, query)` pairs in increasing reference order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter(|(_, x)| **x != Self::UNMAPPED)
            .map(|(reference, query)| (reference, *query as usize))
    }

    /// Number of mapped reference positions.
    pub fn len(&self) -> usize {
        self.mapped
    }

    pub fn is_empty(&self) -> bool {
        self.mapped == 0
    }

    pub fn reference_len(&self) -> usize {
        self.targets.len()
    }
}
