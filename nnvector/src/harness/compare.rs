use std::fmt;

use anyhow::Result;

use crate::example::ExampleSide;
use crate::graph::Model;
use crate::tensor::DType;

use super::Tolerance;

/// One way an actual output differs from the expected one.
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    Missing {
        operand: String,
    },
    DType {
        operand: String,
        expected: DType,
        actual: DType,
    },
    Shape {
        operand: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    Value {
        operand: String,
        index: usize,
        expected: f64,
        actual: f64,
        tolerance: Tolerance,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Missing { operand } => write!(f, "{}: no output produced", operand),
            Mismatch::DType {
                operand,
                expected,
                actual,
            } => write!(
                f,
                "{}: expected {} data, got {}",
                operand,
                expected.as_str(),
                actual.as_str()
            ),
            Mismatch::Shape {
                operand,
                expected,
                actual,
            } => write!(f, "{}: expected dims {:?}, got {:?}", operand, expected, actual),
            Mismatch::Value {
                operand,
                index,
                expected,
                actual,
                tolerance,
            } => write!(
                f,
                "{}[{}]: expected {}, got {} (atol {}, rtol {})",
                operand, index, expected, actual, tolerance.atol, tolerance.rtol
            ),
        }
    }
}

/// Compare every model output of one example.
///
/// `float_override` replaces the float tolerance picked from the model's
/// relaxed flag.
pub fn compare_outputs(
    model: &Model,
    expected: &ExampleSide,
    actual: &ExampleSide,
    float_override: Option<Tolerance>,
) -> Result<Vec<Mismatch>> {
    let mut mismatches = Vec::new();
    for index in model.outputs() {
        let operand = model.operand(index)?;
        let name = operand.name.clone();
        let Some(want) = expected.get(index) else {
            continue;
        };
        let Some(got) = actual.get(index) else {
            mismatches.push(Mismatch::Missing { operand: name });
            continue;
        };
        if want.dtype() != got.dtype() {
            mismatches.push(Mismatch::DType {
                operand: name,
                expected: want.dtype(),
                actual: got.dtype(),
            });
            continue;
        }
        if want.shape() != got.shape() {
            mismatches.push(Mismatch::Shape {
                operand: name,
                expected: want.shape().to_vec(),
                actual: got.shape().to_vec(),
            });
            continue;
        }
        let tolerance = match float_override {
            Some(tol) if want.dtype().is_float() => tol,
            _ => Tolerance::for_dtype(want.dtype(), model.is_relaxed()),
        };
        let wants = want.to_f64_vec();
        let gots = got.to_f64_vec();
        for (idx, (w, g)) in wants.iter().zip(gots.iter()).enumerate() {
            if !tolerance.accepts(*w, *g) {
                mismatches.push(Mismatch::Value {
                    operand: name.clone(),
                    index: idx,
                    expected: *w,
                    actual: *g,
                    tolerance,
                });
            }
        }
    }
    Ok(mismatches)
}
