use anyhow::{anyhow, Result};

use crate::ops::Precision;
use crate::tensor::{
    broadcast_shape, broadcast_strides, for_each_broadcast_index, round_to_f16, Tensor,
    TensorValue, F16,
};

use super::activation::FusedActivation;

/// Apply `f` to every element of a float tensor.
///
/// Relaxed float32 rounds operand and result through half precision.
pub fn unary_float(
    input: &TensorValue,
    precision: Precision,
    f: impl Fn(f32) -> f32,
) -> Result<TensorValue> {
    match input {
        TensorValue::F32(t) => Ok(TensorValue::F32(match precision {
            Precision::Full => t.map(|v| f(*v)),
            Precision::Relaxed => t.map(|v| round_to_f16(f(round_to_f16(*v)))),
        })),
        TensorValue::F16(t) => Ok(TensorValue::F16(t.map(|v| F16::from_f32(f(v.to_f32()))))),
        other => Err(anyhow!(
            "expected float tensor, got {}",
            other.dtype().as_str()
        )),
    }
}

/// Like `unary_float`, also accepting int32 tensors.
pub fn unary_signed(
    input: &TensorValue,
    precision: Precision,
    f: impl Fn(f32) -> f32,
    g: impl Fn(i32) -> i32,
) -> Result<TensorValue> {
    match input {
        TensorValue::I32(t) => Ok(TensorValue::I32(t.map(|v| g(*v)))),
        other => unary_float(other, precision, f),
    }
}

/// Broadcast `f` over two tensors of the same element type.
pub fn binary_broadcast<T: Copy + Default>(
    a: &Tensor<T>,
    b: &Tensor<T>,
    mut f: impl FnMut(T, T) -> T,
) -> Result<Tensor<T>> {
    let out_shape = broadcast_shape(a.shape(), b.shape())?;
    let a_strides = broadcast_strides(a.shape(), out_shape.len());
    let b_strides = broadcast_strides(b.shape(), out_shape.len());
    let mut data = vec![T::default(); out_shape.iter().product::<usize>()];
    for_each_broadcast_index(&out_shape, &a_strides, &b_strides, |out, ia, ib| {
        data[out] = f(a.data[ia], b.data[ib]);
    });
    Tensor::from_vec_with_shape(data, out_shape)
}

/// Binary float op followed by a fused activation.
pub fn binary_float(
    a: &TensorValue,
    b: &TensorValue,
    activation: &TensorValue,
    precision: Precision,
    f: impl Fn(f32, f32) -> f32,
) -> Result<TensorValue> {
    let activation = FusedActivation::from_value(activation)?;
    match (a, b) {
        (TensorValue::F32(a), TensorValue::F32(b)) => {
            let out = match precision {
                Precision::Full => binary_broadcast(a, b, |x, y| activation.apply(f(x, y)))?,
                Precision::Relaxed => binary_broadcast(a, b, |x, y| {
                    let value = f(round_to_f16(x), round_to_f16(y));
                    round_to_f16(activation.apply(value))
                })?,
            };
            Ok(TensorValue::F32(out))
        }
        (TensorValue::F16(a), TensorValue::F16(b)) => Ok(TensorValue::F16(binary_broadcast(
            a,
            b,
            |x, y| F16::from_f32(activation.apply(f(x.to_f32(), y.to_f32()))),
        )?)),
        (a, b) => Err(anyhow!(
            "binary op expects matching float tensors, got {} and {}",
            a.dtype().as_str(),
            b.dtype().as_str()
        )),
    }
}
