use crate::tensor::DType;

const F32_EPSILON: f64 = 1.1920928955078125e-7;
const F16_EPSILON: f64 = 0.0009765625;

/// Absolute and relative tolerance for one comparison.
///
/// An element passes when `|expected - actual| <= atol + rtol * |expected|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub atol: f64,
    pub rtol: f64,
}

impl Tolerance {
    pub const FLOAT32: Tolerance = Tolerance {
        atol: 1e-5,
        rtol: 5.0 * F32_EPSILON,
    };
    /// Relaxed float32 and float16 results.
    pub const RELAXED: Tolerance = Tolerance {
        atol: 5.0 * F16_EPSILON,
        rtol: 5.0 * F16_EPSILON,
    };
    pub const QUANT8: Tolerance = Tolerance {
        atol: 1.0,
        rtol: 0.0,
    };
    pub const EXACT: Tolerance = Tolerance {
        atol: 0.0,
        rtol: 0.0,
    };

    pub fn for_dtype(dtype: DType, relaxed: bool) -> Self {
        match dtype {
            DType::F32 if relaxed => Tolerance::RELAXED,
            DType::F32 => Tolerance::FLOAT32,
            DType::F16 => Tolerance::RELAXED,
            DType::U8 => Tolerance::QUANT8,
            DType::I32 | DType::Bool => Tolerance::EXACT,
        }
    }

    pub fn accepts(&self, expected: f64, actual: f64) -> bool {
        if expected.is_nan() || actual.is_nan() {
            return expected.is_nan() && actual.is_nan();
        }
        if expected == actual {
            return true;
        }
        (expected - actual).abs() <= self.atol + self.rtol * expected.abs()
    }
}
