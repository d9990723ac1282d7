use eyre::{eyre, Result};

use crate::pairwise::alignment::{LocalAlignment, Op, PositionMap, Step};
use crate::pairwise::scoring::{Linear, Score};

use super::tracemat::{Trace, TraceMatrix};

/// Smith-Waterman local aligner with linear gap costs.
///
/// The engine owns its dynamic programming buffers and reuses them between calls, so a single
/// instance per thread is enough to align any number of sequence pairs. Scores are kept for two
/// rows only while the traceback matrix covers the whole `(|seq1| + 1) x (|seq2| + 1)` grid.
#[derive(Clone, Debug, Default)]
pub struct Engine<S: Score = i32> {
    scoring: Linear<S>,
    prev: Vec<S>,
    cur: Vec<S>,
    tracemat: TraceMatrix,
}

impl<S: Score> Engine<S> {
    pub fn new(scoring: Linear<S>) -> Self {
        Self {
            scoring,
            prev: Vec::new(),
            cur: Vec::new(),
            tracemat: TraceMatrix::default(),
        }
    }

    pub fn scoring(&self) -> &Linear<S> {
        &self.scoring
    }

    /// Best local alignment of `seq2` (query) against `seq1` (reference).
    ///
    /// The reference is the outer loop of the scan and the first cell with a strictly greater
    /// score becomes the alignment end. Ties between recurrence terms resolve as diagonal, then
    /// up, then left. The traceback stops at the first zero cell.
    ///
    /// Fails only if the score type overflows.
    pub fn align(&mut self, seq1: &[u8], seq2: &[u8]) -> Result<LocalAlignment<S>> {
        let (rows, cols) = (seq1.len() + 1, seq2.len() + 1);
        self.tracemat.reset(rows, cols);
        for buffer in [&mut self.prev, &mut self.cur] {
            buffer.clear();
            buffer.resize(cols, S::zero());
        }

        let (mut best, mut best_row, mut best_col) = (S::zero(), 0, 0);
        for (row, s1) in (1..rows).zip(seq1) {
            self.cur[0] = S::zero();
            for (col, s2) in (1..cols).zip(seq2) {
                let diag = add(self.prev[col - 1], self.scoring.symbols(*s1, *s2))?;
                let up = add(self.prev[col], self.scoring.gap)?;
                let left = add(self.cur[col - 1], self.scoring.gap)?;

                let mut cell = (diag, Trace::Diagonal);
                if up > cell.0 {
                    cell = (up, Trace::Up);
                }
                if left > cell.0 {
                    cell = (left, Trace::Left);
                }
                if cell.0 <= S::zero() {
                    cell = (S::zero(), Trace::Stop);
                }

                self.cur[col] = cell.0;
                self.tracemat.set(row, col, cell.1);
                if cell.0 > best {
                    (best, best_row, best_col) = (cell.0, row, col);
                }
            }
            std::mem::swap(&mut self.prev, &mut self.cur);
        }

        Ok(self.traceback(seq1, seq2, best, best_row, best_col))
    }

    fn traceback(
        &self,
        seq1: &[u8],
        seq2: &[u8],
        score: S,
        end1: usize,
        end2: usize,
    ) -> LocalAlignment<S> {
        let mut map = PositionMap::new(seq1.len());
        let mut steps = Vec::new();

        let (mut row, mut col) = (end1, end2);
        loop {
            match self.tracemat.get(row, col) {
                Trace::Stop => break,
                Trace::Diagonal => {
                    row -= 1;
                    col -= 1;
                    map.insert(row, col);
                    let op = if seq1[row] == seq2[col] {
                        Op::Match
                    } else {
                        Op::Mismatch
                    };
                    steps.push(Step::single(op));
                }
                Trace::Up => {
                    row -= 1;
                    steps.push(Step::single(Op::GapSecond));
                }
                Trace::Left => {
                    col -= 1;
                    steps.push(Step::single(Op::GapFirst));
                }
            }
        }
        steps.reverse();
        Step::collapse(&mut steps);

        LocalAlignment::new(score, row..end1, col..end2, steps, map)
    }
}

#[inline(always)]
fn add<S: Score>(a: S, b: S) -> Result<S> {
    a.checked_add(&b)
        .ok_or_else(|| eyre!("Alignment score overflow: {:?} + {:?}", a, b))
}
