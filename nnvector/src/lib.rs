pub mod logging;

mod declaration;
mod example;
mod executor;
mod formatting;
mod graph;
mod harness;
mod macros;
mod ops;
mod random;
mod registry;
mod tensor;
mod timer;

pub mod specs;

pub use declaration::{DeclarationParser, DeclarationWriter};
pub use example::{CaseDeserialize, CaseSerialize, Example, ExampleSide, Feed, TestCase};
pub use executor::{backend_for, Backend, Device, Executor, ReferenceBackend};
pub use formatting::{format_tensor, format_truncated, FormatValue};
pub use graph::{
    describe_operation, Input, Internal, Model, Operand, OperandCode, OperandRole, OperandType,
    Operation, OperationBuilder, OperationType, Output, Parameter,
};
pub use harness::{
    compare_outputs, synthesize_example, test_targets, CaseReport, ExampleReport, Harness,
    HarnessConfig, Mismatch, Tolerance,
};
pub use ops::{lookup_kernel, FusedActivation, KernelFn, Precision};
pub use random::{Random, RandomValue};
pub use registry::{op_def, OpDef, OPS};
pub use specs::{SpecEntry, CATALOG};
pub use tensor::{
    broadcast_shape, numel, round_to_f16, DType, Tensor, TensorElement, TensorValue, F16,
};
pub use timer::Timer;
