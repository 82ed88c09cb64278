use crate::graph::{OperandCode, OperationType};

#[derive(Debug, Clone, Copy)]
pub struct OpDef {
    pub op: OperationType,
    pub inputs: usize,
    pub outputs: usize,
    pub codes: &'static [OperandCode],
    pub broadcast: bool,
    /// The last input is an INT32 scalar selecting a fused activation.
    pub fused_activation: bool,
}

impl OpDef {
    /// Inputs that carry tensor data (everything but the activation code).
    pub fn tensor_inputs(&self) -> usize {
        self.inputs - self.fused_activation as usize
    }
}

const FLOAT_CODES: &[OperandCode] = &[OperandCode::TensorFloat32, OperandCode::TensorFloat16];

const SIGNED_CODES: &[OperandCode] = &[
    OperandCode::TensorFloat32,
    OperandCode::TensorFloat16,
    OperandCode::TensorInt32,
];

const fn unary(op: OperationType, codes: &'static [OperandCode]) -> OpDef {
    OpDef {
        op,
        inputs: 1,
        outputs: 1,
        codes,
        broadcast: false,
        fused_activation: false,
    }
}

const fn binary(op: OperationType) -> OpDef {
    OpDef {
        op,
        inputs: 3,
        outputs: 1,
        codes: FLOAT_CODES,
        broadcast: true,
        fused_activation: true,
    }
}

pub const OPS: &[OpDef] = &[
    unary(OperationType::Floor, FLOAT_CODES),
    unary(OperationType::Abs, SIGNED_CODES),
    unary(OperationType::Neg, SIGNED_CODES),
    unary(OperationType::Relu, SIGNED_CODES),
    unary(OperationType::Relu1, SIGNED_CODES),
    unary(OperationType::Relu6, SIGNED_CODES),
    unary(OperationType::Logistic, FLOAT_CODES),
    unary(OperationType::Tanh, FLOAT_CODES),
    unary(OperationType::Exp, FLOAT_CODES),
    unary(OperationType::Sqrt, FLOAT_CODES),
    binary(OperationType::Add),
    binary(OperationType::Mul),
    binary(OperationType::Sub),
    binary(OperationType::Div),
];

pub fn op_def(op: OperationType) -> Option<&'static OpDef> {
    OPS.iter().find(|def| def.op == op)
}
