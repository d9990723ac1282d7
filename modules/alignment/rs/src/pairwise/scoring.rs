pub use tracecall_core_rs::num::Score;

/// Linear scoring scheme: a fixed score for matching and mismatching symbols and a fixed
/// penalty per gap position (no distinct open/extend costs).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Linear<S: Score> {
    pub matched: S,
    pub mismatched: S,
    pub gap: S,
}

impl<S: Score> Linear<S> {
    pub fn new(matched: S, mismatched: S, gap: S) -> Self {
        Self {
            matched,
            mismatched,
            gap,
        }
    }

    #[inline(always)]
    pub fn symbols(&self, s1: u8, s2: u8) -> S {
        if s1 == s2 {
            self.matched
        } else {
            self.mismatched
        }
    }
}

impl<S: Score> Default for Linear<S> {
    /// +2 for a match, -1 for a mismatch and -2 per gap position.
    fn default() -> Self {
        let two = S::one() + S::one();
        Self::new(two, -S::one(), -two)
    }
}
