use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Operator kind supported by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Floor,
    Abs,
    Neg,
    Relu,
    Relu1,
    Relu6,
    Logistic,
    Tanh,
    Exp,
    Sqrt,
    Add,
    Mul,
    Sub,
    Div,
}

impl OperationType {
    pub const ALL: &'static [OperationType] = &[
        OperationType::Floor,
        OperationType::Abs,
        OperationType::Neg,
        OperationType::Relu,
        OperationType::Relu1,
        OperationType::Relu6,
        OperationType::Logistic,
        OperationType::Tanh,
        OperationType::Exp,
        OperationType::Sqrt,
        OperationType::Add,
        OperationType::Mul,
        OperationType::Sub,
        OperationType::Div,
    ];

    /// Identifier used in declarations.
    pub fn as_str(self) -> &'static str {
        match self {
            OperationType::Floor => "FLOOR",
            OperationType::Abs => "ABS",
            OperationType::Neg => "NEG",
            OperationType::Relu => "RELU",
            OperationType::Relu1 => "RELU1",
            OperationType::Relu6 => "RELU6",
            OperationType::Logistic => "LOGISTIC",
            OperationType::Tanh => "TANH",
            OperationType::Exp => "EXP",
            OperationType::Sqrt => "SQRT",
            OperationType::Add => "ADD",
            OperationType::Mul => "MUL",
            OperationType::Sub => "SUB",
            OperationType::Div => "DIV",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        OperationType::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s.trim())
            .ok_or_else(|| anyhow!("unknown operation: {}", s))
    }
}

/// One operator node; operands are referenced by model index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub op: OperationType,
    pub inputs: Vec<usize>,
    pub outputs: Vec<usize>,
}
