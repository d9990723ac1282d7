/// Traceback direction stored for each cell of the dynamic programming grid.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum Trace {
    /// The cell scored zero: a local alignment never extends past it
    #[default]
    Stop,
    Diagonal,
    /// Previous row, i.e. a symbol of the first sequence against a gap
    Up,
    /// Previous column, i.e. a symbol of the second sequence against a gap
    Left,
}

/// Row-major `rows x cols` matrix of traceback directions. The buffer is reused between runs.
#[derive(Clone, Debug, Default)]
pub struct TraceMatrix {
    cols: usize,
    cells: Vec<Trace>,
}

impl TraceMatrix {
    pub fn reset(&mut self, rows: usize, cols: usize) {
        self.cols = cols;
        self.cells.clear();
        self.cells.resize(rows * cols, Trace::Stop);
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, trace: Trace) {
        self.cells[row * self.cols + col] = trace;
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> Trace {
        self.cells[row * self.cols + col]
    }
}
