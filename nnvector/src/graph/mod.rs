mod model;
mod operand;
mod operation;

pub use model::{describe_operation, Model, OperationBuilder};
pub use operand::{
    Input, Internal, Operand, OperandCode, OperandRole, OperandType, Output, Parameter,
};
pub use operation::{Operation, OperationType};
