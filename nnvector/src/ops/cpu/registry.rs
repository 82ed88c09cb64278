use crate::graph::OperationType;
use crate::ops::KernelFn;
use crate::registry::op_def;
use crate::tensor::DType;

use super::{activation, math, rounding};

pub fn lookup_kernel_cpu(op: OperationType, dtype: DType) -> Option<KernelFn> {
    let def = op_def(op)?;
    if !def.codes.iter().any(|code| code.dtype() == dtype) {
        return None;
    }
    let kernel: KernelFn = match op {
        OperationType::Floor => rounding::floor,
        OperationType::Abs => math::abs,
        OperationType::Neg => math::neg,
        OperationType::Relu => activation::relu,
        OperationType::Relu1 => activation::relu1,
        OperationType::Relu6 => activation::relu6,
        OperationType::Logistic => activation::logistic,
        OperationType::Tanh => activation::tanh,
        OperationType::Exp => math::exp,
        OperationType::Sqrt => math::sqrt,
        OperationType::Add => math::add,
        OperationType::Mul => math::mul,
        OperationType::Sub => math::sub,
        OperationType::Div => math::div,
    };
    Some(kernel)
}
