//! Runs test cases on a backend and checks outputs against expectations.
//!
//! Mismatches are reported as data in a [`CaseReport`]; only infrastructure
//! problems (invalid case, backend failure) are returned as errors.
mod compare;
mod synthesize;
mod tolerance;

use std::env;

use anyhow::{anyhow, Result};
use rayon::prelude::*;

use crate::example::TestCase;
use crate::executor::{backend_for, Backend, Device};
use crate::formatting::format_truncated;
use crate::timer::Timer;

pub use compare::{compare_outputs, Mismatch};
pub use synthesize::synthesize_example;
pub use tolerance::Tolerance;

/// Harness knobs.
#[derive(Debug, Clone, Default)]
pub struct HarnessConfig {
    /// Replaces the float tolerance chosen from the relaxed flag.
    pub float_tolerance: Option<Tolerance>,
    /// Also run each case with unknown output dims.
    pub dynamic_output_shape: bool,
}

/// Outcome of one example.
#[derive(Debug, Clone)]
pub struct ExampleReport {
    pub index: usize,
    pub ignored: bool,
    pub mismatches: Vec<Mismatch>,
}

impl ExampleReport {
    pub fn passed(&self) -> bool {
        self.ignored || self.mismatches.is_empty()
    }
}

/// Outcome of one case on one backend.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub case: String,
    pub backend: String,
    pub examples: Vec<ExampleReport>,
    pub elapsed_ns: u128,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.examples.iter().all(ExampleReport::passed)
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &Mismatch> {
        self.examples.iter().flat_map(|example| example.mismatches.iter())
    }

    /// Turn a failing report into an error listing the first mismatches.
    pub fn into_result(self) -> Result<Self> {
        if self.passed() {
            return Ok(self);
        }
        let lines: Vec<String> = self.mismatches().map(|m| m.to_string()).collect();
        Err(anyhow!(
            "{} failed on {}: {}",
            self.case,
            self.backend,
            format_truncated(&lines)
        ))
    }
}

pub struct Harness {
    backend: Box<dyn Backend>,
    config: HarnessConfig,
}

impl Harness {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            config: HarnessConfig::default(),
        }
    }

    pub fn for_device(device: Device) -> Self {
        Self::new(backend_for(device))
    }

    pub fn with_config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate `case` and run every example that is not ignored.
    pub fn run_case(&self, case: &TestCase) -> Result<CaseReport> {
        case.validate()?;
        let label = format!("{}@{}", case.name(), self.backend.name());
        crate::trace!("run {}", label);
        Timer::start(&label);
        let mut examples = Vec::with_capacity(case.examples().len());
        for (index, example) in case.examples().iter().enumerate() {
            if case.is_ignored(index) {
                examples.push(ExampleReport {
                    index,
                    ignored: true,
                    mismatches: Vec::new(),
                });
                continue;
            }
            let actual = self
                .backend
                .execute(case.model(), &example.inputs)
                .map_err(|err| {
                    crate::error!("{} example {}: {}", label, index, err);
                    anyhow!("{} example {}: {}", label, index, err)
                })?;
            let mismatches = compare_outputs(
                case.model(),
                &example.outputs,
                &actual,
                self.config.float_tolerance,
            )?;
            for mismatch in &mismatches {
                crate::warning!("{} example {}: {}", label, index, mismatch);
            }
            examples.push(ExampleReport {
                index,
                ignored: false,
                mismatches,
            });
        }
        let elapsed_ns = Timer::stop(&label);
        Ok(CaseReport {
            case: case.name().to_string(),
            backend: self.backend.name().to_string(),
            examples,
            elapsed_ns,
        })
    }

    /// Run `case` and, when configured, its dynamic-output-shape variant.
    pub fn run_case_variants(&self, case: &TestCase) -> Result<Vec<CaseReport>> {
        let mut reports = vec![self.run_case(case)?];
        if self.config.dynamic_output_shape {
            reports.push(self.run_case(&case.dynamic_output_shape()?)?);
        }
        Ok(reports)
    }

    /// Run many independent cases on the rayon pool.
    pub fn run_all(&self, cases: &[TestCase]) -> Result<Vec<CaseReport>> {
        let reports = cases
            .par_iter()
            .map(|case| self.run_case_variants(case))
            .collect::<Result<Vec<_>>>()?;
        Ok(reports.into_iter().flatten().collect())
    }
}

/// Devices named by `TEST_TARGETS` (comma separated), defaulting to the
/// relaxed-aware reference backend.
pub fn test_targets() -> Result<Vec<Device>> {
    let raw = env::var("TEST_TARGETS").unwrap_or_else(|_| "reference".to_string());
    let mut targets = Vec::new();
    for item in raw.split(',') {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        targets.push(trimmed.parse::<Device>()?);
    }
    if targets.is_empty() {
        targets.push(Device::Reference);
    }
    Ok(targets)
}
