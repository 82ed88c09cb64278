pub mod cpu;

pub use cpu::FusedActivation;

use anyhow::Result;

use crate::graph::OperationType;
use crate::tensor::{DType, TensorValue};

/// Numeric precision a kernel computes float32 data at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Full,
    /// Float32 computed at float16 precision.
    Relaxed,
}

pub type KernelFn = fn(&[TensorValue], Precision) -> Result<TensorValue>;

/// Find the reference kernel for `op` on tensors of `dtype`.
pub fn lookup_kernel(op: OperationType, dtype: DType) -> Option<KernelFn> {
    cpu::registry::lookup_kernel_cpu(op, dtype)
}
