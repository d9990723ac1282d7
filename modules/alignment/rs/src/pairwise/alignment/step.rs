use std::borrow::Borrow;

use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use super::op::Op;

/// An alignment step: `len` consecutive operations of the same kind.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Getters, Dissolve)]
pub struct Step {
    /// The length of the operation, e.g. the number of consequent matches or gaps.
    /// Guaranteed to be greater than zero.
    len: u32,
    /// The alignment operation
    op: Op,
}

impl Step {
    pub fn new(op: Op, len: u32) -> Result<Self> {
        ensure!(len > 0, "Step length must be greater than zero");
        Ok(Self { len, op })
    }

    pub(crate) fn single(op: Op) -> Self {
        Self { len: 1, op }
    }

    /// Collapse identical consecutive operations in place.
    /// If the sum of the lengths exceeds the maximum value of the step size, the step is divided accordingly.
    pub fn collapse(steps: &mut Vec<Step>) {
        if steps.len() <= 1 {
            return;
        }

        let (mut writep, mut readp) = (0, 1);
        while readp < steps.len() {
            if steps[writep].op == steps[readp].op {
                match steps[writep].len.checked_add(steps[readp].len) {
                    Some(x) => steps[writep].len = x,
                    None => {
                        steps[readp].len -= u32::MAX - steps[writep].len;
                        steps[writep].len = u32::MAX;

                        writep += 1;
                        steps[writep] = steps[readp];
                    }
                }
            } else {
                writep += 1;
                steps[writep] = steps[readp];
            }
            readp += 1;
        }
        steps.truncate(writep + 1);
    }

    /// Run-length encoded representation of the steps, e.g. `150=1X149=`.
    pub fn rle_string(steps: impl Iterator<Item: Borrow<Step>>) -> String {
        // 2 symbols is an average length of a step
        // 1 is the length of the symbol
        let hint = match steps.size_hint() {
            (_, Some(upper)) => upper * 3,
            (lower, _) => lower * 3,
        };

        let mut result = String::with_capacity(hint);
        for step in steps {
            let step = step.borrow();
            result.push_str(&step.len.to_string());
            result.push(step.op.symbol());
        }
        result
    }
}
