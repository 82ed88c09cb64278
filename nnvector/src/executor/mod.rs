use std::str::FromStr;

use anyhow::{anyhow, Result};

use crate::example::ExampleSide;
use crate::graph::Model;

#[allow(clippy::module_inception)]
mod executor;
mod reference;

pub use executor::Executor;
pub use reference::ReferenceBackend;

/// Execution targets known to the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Reference,
    ReferenceStrict,
}

impl Device {
    pub fn as_str(self) -> &'static str {
        match self {
            Device::Reference => "reference",
            Device::ReferenceStrict => "reference-strict",
        }
    }
}

impl FromStr for Device {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "reference" => Ok(Device::Reference),
            "reference-strict" => Ok(Device::ReferenceStrict),
            other => Err(anyhow!(
                "unknown device '{}'; expected reference or reference-strict",
                other
            )),
        }
    }
}

/// An execution backend under test.
pub trait Backend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run `model` on one example's inputs and return every model output.
    fn execute(&self, model: &Model, inputs: &ExampleSide) -> Result<ExampleSide>;
}

pub fn backend_for(device: Device) -> Box<dyn Backend> {
    match device {
        Device::Reference => Box::new(ReferenceBackend::new()),
        Device::ReferenceStrict => Box::new(ReferenceBackend::strict()),
    }
}
