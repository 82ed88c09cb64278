use anyhow::Result;

use crate::example::ExampleSide;
use crate::graph::Model;
use crate::ops::Precision;

use super::{Backend, Executor};

/// CPU reference backend.
///
/// With `honor_relaxed`, relaxed models compute float32 at half precision;
/// otherwise every model runs at full precision.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceBackend {
    honor_relaxed: bool,
}

impl ReferenceBackend {
    pub fn new() -> Self {
        Self {
            honor_relaxed: true,
        }
    }

    pub fn strict() -> Self {
        Self {
            honor_relaxed: false,
        }
    }

    pub fn precision_for(&self, model: &Model) -> Precision {
        if self.honor_relaxed && model.is_relaxed() {
            Precision::Relaxed
        } else {
            Precision::Full
        }
    }
}

impl Default for ReferenceBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for ReferenceBackend {
    fn name(&self) -> &'static str {
        if self.honor_relaxed {
            "reference"
        } else {
            "reference-strict"
        }
    }

    fn execute(&self, model: &Model, inputs: &ExampleSide) -> Result<ExampleSide> {
        let mut exec = Executor::new(model, self.precision_for(model));
        for (index, value) in inputs.iter() {
            exec.insert(index, value.clone())?;
        }
        exec.run()?;
        exec.outputs()
    }
}
