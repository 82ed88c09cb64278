mod scalar;
mod shape;
#[allow(clippy::module_inception)]
mod tensor;
mod value;

pub use scalar::{round_to_f16, F16};
pub use shape::{broadcast_shape, broadcast_strides, for_each_broadcast_index, numel};
pub use tensor::Tensor;
pub use value::{DType, TensorElement, TensorValue};
