use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use super::{numel, Tensor, F16};

/// Element type of a value bucket.
///
/// Operand codes map onto these buckets; scalar and tensor codes of the same
/// element type share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    F32,
    F16,
    I32,
    U8,
    Bool,
}

impl DType {
    pub fn as_str(self) -> &'static str {
        match self {
            DType::F32 => "float32",
            DType::F16 => "float16",
            DType::I32 => "int32",
            DType::U8 => "quant8",
            DType::Bool => "bool8",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F16)
    }

    /// Size of one element in the raw operand-value encoding.
    pub fn byte_size(self) -> usize {
        match self {
            DType::F32 | DType::I32 => 4,
            DType::F16 => 2,
            DType::U8 | DType::Bool => 1,
        }
    }
}

/// Element type that can be converted to/from `TensorValue`.
pub trait TensorElement: Sized + Clone {
    const DTYPE: DType;
    /// Attempt to extract a typed tensor from a generic value.
    fn from_value(value: &TensorValue) -> Option<&Tensor<Self>>;
    /// Wrap a typed tensor into a generic value.
    fn into_value(tensor: Tensor<Self>) -> TensorValue;
}

macro_rules! impl_tensor_element {
    ($ty:ty, $variant:ident) => {
        impl TensorElement for $ty {
            const DTYPE: DType = DType::$variant;

            fn from_value(value: &TensorValue) -> Option<&Tensor<Self>> {
                match value {
                    TensorValue::$variant(tensor) => Some(tensor),
                    _ => None,
                }
            }

            fn into_value(tensor: Tensor<Self>) -> TensorValue {
                TensorValue::$variant(tensor)
            }
        }
    };
}

impl_tensor_element!(f32, F32);
impl_tensor_element!(F16, F16);
impl_tensor_element!(i32, I32);
impl_tensor_element!(u8, U8);
impl_tensor_element!(bool, Bool);

/// Typed tensor value, one variant per value bucket.
///
/// Serialized as a `{dtype, shape, values}` record whose values are literal
/// text, so non-finite floats survive JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TensorRecord", try_from = "TensorRecord")]
pub enum TensorValue {
    F32(Tensor<f32>),
    F16(Tensor<F16>),
    I32(Tensor<i32>),
    U8(Tensor<u8>),
    Bool(Tensor<bool>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TensorRecord {
    dtype: DType,
    shape: Vec<usize>,
    values: Vec<String>,
}

impl From<TensorValue> for TensorRecord {
    fn from(value: TensorValue) -> Self {
        TensorRecord {
            dtype: value.dtype(),
            shape: value.shape().to_vec(),
            values: value.to_literals(),
        }
    }
}

impl TryFrom<TensorRecord> for TensorValue {
    type Error = anyhow::Error;

    fn try_from(record: TensorRecord) -> Result<Self> {
        let literals: Vec<&str> = record.values.iter().map(String::as_str).collect();
        TensorValue::parse_literals(record.dtype, &literals, record.shape)
    }
}

impl TensorValue {
    pub fn dtype(&self) -> DType {
        match self {
            TensorValue::F32(_) => DType::F32,
            TensorValue::F16(_) => DType::F16,
            TensorValue::I32(_) => DType::I32,
            TensorValue::U8(_) => DType::U8,
            TensorValue::Bool(_) => DType::Bool,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            TensorValue::F32(t) => t.shape(),
            TensorValue::F16(t) => t.shape(),
            TensorValue::I32(t) => t.shape(),
            TensorValue::U8(t) => t.shape(),
            TensorValue::Bool(t) => t.shape(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TensorValue::F32(t) => t.len(),
            TensorValue::F16(t) => t.len(),
            TensorValue::I32(t) => t.len(),
            TensorValue::U8(t) => t.len(),
            TensorValue::Bool(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a value from numeric literals, converting to `dtype`.
    ///
    /// Integer buckets reject fractional or out-of-range literals.
    pub fn from_literals(dtype: DType, values: &[f64], shape: Vec<usize>) -> Result<Self> {
        let value = match dtype {
            DType::F32 => TensorValue::F32(Tensor::from_vec_with_shape(
                values.iter().map(|v| *v as f32).collect(),
                shape,
            )?),
            DType::F16 => TensorValue::F16(Tensor::from_vec_with_shape(
                values.iter().map(|v| F16::from_f32(*v as f32)).collect(),
                shape,
            )?),
            DType::I32 => {
                let data = values
                    .iter()
                    .map(|v| integral(*v, i32::MIN as f64, i32::MAX as f64).map(|v| v as i32))
                    .collect::<Result<Vec<_>>>()?;
                TensorValue::I32(Tensor::from_vec_with_shape(data, shape)?)
            }
            DType::U8 => {
                let data = values
                    .iter()
                    .map(|v| integral(*v, 0.0, u8::MAX as f64).map(|v| v as u8))
                    .collect::<Result<Vec<_>>>()?;
                TensorValue::U8(Tensor::from_vec_with_shape(data, shape)?)
            }
            DType::Bool => TensorValue::Bool(Tensor::from_vec_with_shape(
                values.iter().map(|v| *v != 0.0).collect(),
                shape,
            )?),
        };
        Ok(value)
    }

    /// Parse literal text into a value of `dtype`.
    ///
    /// Floats are parsed at their own width so that written values read back
    /// bit-identical.
    pub fn parse_literals(dtype: DType, literals: &[&str], shape: Vec<usize>) -> Result<Self> {
        let value = match dtype {
            DType::F32 => TensorValue::F32(Tensor::from_vec_with_shape(
                literals.iter().map(|s| parse_f32(s)).collect::<Result<_>>()?,
                shape,
            )?),
            DType::F16 => TensorValue::F16(Tensor::from_vec_with_shape(
                literals
                    .iter()
                    .map(|s| parse_f32(s).map(F16::from_f32))
                    .collect::<Result<_>>()?,
                shape,
            )?),
            DType::I32 => TensorValue::I32(Tensor::from_vec_with_shape(
                literals
                    .iter()
                    .map(|s| {
                        s.parse::<i32>()
                            .map_err(|err| anyhow!("invalid int32 literal '{}': {}", s, err))
                    })
                    .collect::<Result<_>>()?,
                shape,
            )?),
            DType::U8 => TensorValue::U8(Tensor::from_vec_with_shape(
                literals
                    .iter()
                    .map(|s| {
                        s.parse::<u8>()
                            .map_err(|err| anyhow!("invalid quant8 literal '{}': {}", s, err))
                    })
                    .collect::<Result<_>>()?,
                shape,
            )?),
            DType::Bool => TensorValue::Bool(Tensor::from_vec_with_shape(
                literals.iter().map(|s| parse_bool(s)).collect::<Result<_>>()?,
                shape,
            )?),
        };
        Ok(value)
    }

    /// Render each element as literal text accepted by `parse_literals`.
    pub fn to_literals(&self) -> Vec<String> {
        match self {
            TensorValue::F32(t) => t.data.iter().map(|v| format!("{:?}", v)).collect(),
            TensorValue::F16(t) => t.data.iter().map(|v| format!("{:?}", v.to_f32())).collect(),
            TensorValue::I32(t) => t.data.iter().map(|v| v.to_string()).collect(),
            TensorValue::U8(t) => t.data.iter().map(|v| v.to_string()).collect(),
            TensorValue::Bool(t) => t
                .data
                .iter()
                .map(|v| if *v { "True" } else { "False" }.to_string())
                .collect(),
        }
    }

    /// Widen every element to f64 for comparison.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            TensorValue::F32(t) => t.data.iter().map(|v| *v as f64).collect(),
            TensorValue::F16(t) => t.data.iter().map(|v| v.to_f32() as f64).collect(),
            TensorValue::I32(t) => t.data.iter().map(|v| *v as f64).collect(),
            TensorValue::U8(t) => t.data.iter().map(|v| *v as f64).collect(),
            TensorValue::Bool(t) => t.data.iter().map(|v| *v as u8 as f64).collect(),
        }
    }

    /// Encode as little-endian raw bytes, the layout of a constant operand.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            TensorValue::F32(t) => bytemuck::cast_slice(&t.data).to_vec(),
            TensorValue::F16(t) => bytemuck::cast_slice(&t.data).to_vec(),
            TensorValue::I32(t) => bytemuck::cast_slice(&t.data).to_vec(),
            TensorValue::U8(t) => t.data.clone(),
            TensorValue::Bool(t) => t.data.iter().map(|v| *v as u8).collect(),
        }
    }

    /// Decode raw operand bytes produced by `to_le_bytes`.
    pub fn from_le_bytes(dtype: DType, bytes: &[u8], shape: Vec<usize>) -> Result<Self> {
        let expected = numel(&shape) * dtype.byte_size();
        if bytes.len() != expected {
            return Err(anyhow!(
                "{} operand of shape {:?} expects {} bytes, got {}",
                dtype.as_str(),
                shape,
                expected,
                bytes.len()
            ));
        }
        let value = match dtype {
            DType::F32 => TensorValue::F32(Tensor::from_vec_with_shape(
                bytemuck::pod_collect_to_vec::<u8, f32>(bytes),
                shape,
            )?),
            DType::F16 => TensorValue::F16(Tensor::from_vec_with_shape(
                bytemuck::pod_collect_to_vec::<u8, F16>(bytes),
                shape,
            )?),
            DType::I32 => TensorValue::I32(Tensor::from_vec_with_shape(
                bytemuck::pod_collect_to_vec::<u8, i32>(bytes),
                shape,
            )?),
            DType::U8 => TensorValue::U8(Tensor::from_vec_with_shape(bytes.to_vec(), shape)?),
            DType::Bool => TensorValue::Bool(Tensor::from_vec_with_shape(
                bytes.iter().map(|b| *b != 0).collect(),
                shape,
            )?),
        };
        Ok(value)
    }

    /// Same data with a new shape.
    pub fn reshape(self, shape: Vec<usize>) -> Result<Self> {
        Ok(match self {
            TensorValue::F32(t) => TensorValue::F32(t.reshape(shape)?),
            TensorValue::F16(t) => TensorValue::F16(t.reshape(shape)?),
            TensorValue::I32(t) => TensorValue::I32(t.reshape(shape)?),
            TensorValue::U8(t) => TensorValue::U8(t.reshape(shape)?),
            TensorValue::Bool(t) => TensorValue::Bool(t.reshape(shape)?),
        })
    }

    /// Borrow the typed tensor, failing on a bucket mismatch.
    pub fn as_tensor<T: TensorElement>(&self) -> Result<&Tensor<T>> {
        T::from_value(self).ok_or_else(|| {
            anyhow!(
                "expected {} tensor, got {}",
                T::DTYPE.as_str(),
                self.dtype().as_str()
            )
        })
    }
}

impl<T: TensorElement> From<Tensor<T>> for TensorValue {
    fn from(value: Tensor<T>) -> Self {
        T::into_value(value)
    }
}

fn integral(value: f64, min: f64, max: f64) -> Result<f64> {
    if value.fract() != 0.0 || value < min || value > max {
        return Err(anyhow!(
            "literal {} is not an integer in [{}, {}]",
            value,
            min,
            max
        ));
    }
    Ok(value)
}

fn parse_f32(text: &str) -> Result<f32> {
    if let Ok(value) = text.parse::<f32>() {
        return Ok(value);
    }
    text.strip_suffix('f')
        .unwrap_or(text)
        .parse::<f32>()
        .map_err(|err| anyhow!("invalid float literal '{}': {}", text, err))
}

fn parse_bool(text: &str) -> Result<bool> {
    match text {
        "True" | "true" | "1" => Ok(true),
        "False" | "false" | "0" => Ok(false),
        other => Err(anyhow!("invalid bool literal '{}'", other)),
    }
}
