//! Operand codes, operand types and the declaration constructors.
//!
//! Operands are declared with a symbolic code string and a brace shape
//! literal, e.g. `Input::new("op1", "TENSOR_FLOAT32", "{1, 2, 2, 2}")`.
//! Quantized codes append scale and zero point: `"{3, 1}, 0.5f, 0"`.
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::tensor::{numel, DType, TensorValue};

/// Operand element type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperandCode {
    Float32,
    Int32,
    Bool,
    Float16,
    TensorFloat32,
    TensorInt32,
    TensorQuant8Asymm,
    TensorFloat16,
    TensorBool8,
}

impl OperandCode {
    pub const ALL: &'static [OperandCode] = &[
        OperandCode::Float32,
        OperandCode::Int32,
        OperandCode::Bool,
        OperandCode::Float16,
        OperandCode::TensorFloat32,
        OperandCode::TensorInt32,
        OperandCode::TensorQuant8Asymm,
        OperandCode::TensorFloat16,
        OperandCode::TensorBool8,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperandCode::Float32 => "FLOAT32",
            OperandCode::Int32 => "INT32",
            OperandCode::Bool => "BOOL",
            OperandCode::Float16 => "FLOAT16",
            OperandCode::TensorFloat32 => "TENSOR_FLOAT32",
            OperandCode::TensorInt32 => "TENSOR_INT32",
            OperandCode::TensorQuant8Asymm => "TENSOR_QUANT8_ASYMM",
            OperandCode::TensorFloat16 => "TENSOR_FLOAT16",
            OperandCode::TensorBool8 => "TENSOR_BOOL8",
        }
    }

    pub fn is_tensor(self) -> bool {
        matches!(
            self,
            OperandCode::TensorFloat32
                | OperandCode::TensorInt32
                | OperandCode::TensorQuant8Asymm
                | OperandCode::TensorFloat16
                | OperandCode::TensorBool8
        )
    }

    pub fn is_quantized(self) -> bool {
        self == OperandCode::TensorQuant8Asymm
    }

    /// Value bucket used for example and constant data.
    pub fn dtype(self) -> DType {
        match self {
            OperandCode::Float32 | OperandCode::TensorFloat32 => DType::F32,
            OperandCode::Float16 | OperandCode::TensorFloat16 => DType::F16,
            OperandCode::Int32 | OperandCode::TensorInt32 => DType::I32,
            OperandCode::TensorQuant8Asymm => DType::U8,
            OperandCode::Bool | OperandCode::TensorBool8 => DType::Bool,
        }
    }
}

impl fmt::Display for OperandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperandCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        OperandCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s.trim())
            .ok_or_else(|| anyhow!("unknown operand code: {}", s))
    }
}

/// Full operand type: code, dimensions and quantization parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperandType {
    pub code: OperandCode,
    pub dims: Vec<u32>,
    #[serde(default)]
    pub scale: f32,
    #[serde(default)]
    pub zero_point: i32,
}

impl OperandType {
    pub fn new(code: OperandCode, dims: Vec<u32>) -> Self {
        Self {
            code,
            dims,
            scale: 0.0,
            zero_point: 0,
        }
    }

    /// Parse a code string and a shape literal such as `"{1, 2, 2, 2}"`.
    pub fn parse(code: &str, shape: &str) -> Result<Self> {
        let code: OperandCode = code.parse()?;
        let shape = shape.trim();
        let open = shape
            .find('{')
            .ok_or_else(|| anyhow!("shape literal '{}' is missing '{{'", shape))?;
        let close = shape
            .find('}')
            .ok_or_else(|| anyhow!("shape literal '{}' is missing '}}'", shape))?;
        if close < open || !shape[..open].trim().is_empty() {
            return Err(anyhow!("malformed shape literal '{}'", shape));
        }
        let dims = shape[open + 1..close]
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| {
                item.parse::<u32>()
                    .map_err(|err| anyhow!("invalid dimension '{}' in '{}': {}", item, shape, err))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut ty = OperandType::new(code, dims);

        let rest: Vec<&str> = shape[close + 1..]
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect();
        match rest.as_slice() {
            [] => {}
            [scale, zero_point] => {
                ty.scale = scale
                    .trim_end_matches('f')
                    .parse::<f32>()
                    .map_err(|err| anyhow!("invalid scale '{}': {}", scale, err))?;
                ty.zero_point = zero_point
                    .parse::<i32>()
                    .map_err(|err| anyhow!("invalid zero point '{}': {}", zero_point, err))?;
            }
            _ => {
                return Err(anyhow!(
                    "shape literal '{}' expects at most scale and zero point after dims",
                    shape
                ))
            }
        }
        if !ty.code.is_tensor() && !ty.dims.is_empty() {
            return Err(anyhow!("scalar operand {} cannot have dims {:?}", ty.code, ty.dims));
        }
        Ok(ty)
    }

    /// Shape literal as written in declarations.
    pub fn shape_literal(&self) -> String {
        let dims = self
            .dims
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if self.code.is_quantized() || self.scale != 0.0 || self.zero_point != 0 {
            format!("{{{}}}, {:?}f, {}", dims, self.scale, self.zero_point)
        } else {
            format!("{{{}}}", dims)
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        self.dims.iter().map(|d| *d as usize).collect()
    }

    /// Element count implied by the dims (1 for scalars).
    pub fn numel(&self) -> usize {
        numel(&self.shape())
    }

    /// A tensor whose dims are unknown until execution.
    pub fn is_dynamic(&self) -> bool {
        self.code.is_tensor() && self.dims.iter().any(|d| *d == 0)
    }
}

/// Role of an operand in a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperandRole {
    Input,
    Output,
    Parameter,
    Internal,
}

impl OperandRole {
    pub fn as_str(self) -> &'static str {
        match self {
            OperandRole::Input => "Input",
            OperandRole::Output => "Output",
            OperandRole::Parameter => "Parameter",
            OperandRole::Internal => "Internal",
        }
    }
}

/// A named, typed operand. Parameters carry their constant value as raw
/// little-endian bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operand {
    pub name: String,
    pub ty: OperandType,
    pub role: OperandRole,
    #[serde(default)]
    pub value: Option<Vec<u8>>,
}

impl Operand {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> OperandCode {
        self.ty.code
    }

    fn declare(role: OperandRole, name: &str, code: &str, shape: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            ty: OperandType::parse(code, shape)?,
            role,
            value: None,
        })
    }

    /// Decode the constant value of a parameter.
    pub fn constant(&self) -> Result<Option<TensorValue>> {
        match &self.value {
            Some(bytes) => Ok(Some(TensorValue::from_le_bytes(
                self.ty.code.dtype(),
                bytes,
                self.ty.shape(),
            )?)),
            None => Ok(None),
        }
    }
}

/// Declares a model input operand.
pub struct Input;

impl Input {
    pub fn new(name: &str, code: &str, shape: &str) -> Result<Operand> {
        Operand::declare(OperandRole::Input, name, code, shape)
    }
}

/// Declares a model output operand.
pub struct Output;

impl Output {
    pub fn new(name: &str, code: &str, shape: &str) -> Result<Operand> {
        Operand::declare(OperandRole::Output, name, code, shape)
    }
}

/// Declares an intermediate operand between two operations.
pub struct Internal;

impl Internal {
    pub fn new(name: &str, code: &str, shape: &str) -> Result<Operand> {
        Operand::declare(OperandRole::Internal, name, code, shape)
    }
}

/// Declares a constant operand with an inline value.
pub struct Parameter;

impl Parameter {
    pub fn new(name: &str, code: &str, shape: &str, values: &[f64]) -> Result<Operand> {
        let mut operand = Operand::declare(OperandRole::Parameter, name, code, shape)?;
        let value = TensorValue::from_literals(operand.ty.code.dtype(), values, operand.ty.shape())?;
        operand.value = Some(value.to_le_bytes());
        Ok(operand)
    }

    /// Build a parameter from an already typed value.
    pub fn from_value(name: &str, code: &str, shape: &str, value: &TensorValue) -> Result<Operand> {
        let mut operand = Operand::declare(OperandRole::Parameter, name, code, shape)?;
        if value.dtype() != operand.ty.code.dtype() {
            return Err(anyhow!(
                "parameter {} of type {} cannot hold {} data",
                name,
                operand.ty.code,
                value.dtype().as_str()
            ));
        }
        let value = value.clone().reshape(operand.ty.shape())?;
        operand.value = Some(value.to_le_bytes());
        Ok(operand)
    }
}
