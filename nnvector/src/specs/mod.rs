//! Built-in test case declarations.
use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;

use crate::example::TestCase;

mod floor;
mod floor_relaxed;
mod mul;
mod relu_floor_chain;

/// A named declaration. `build` returns a fresh case on every call.
#[derive(Debug, Clone, Copy)]
pub struct SpecEntry {
    pub name: &'static str,
    pub build: fn() -> Result<TestCase>,
}

pub static CATALOG: Lazy<Vec<SpecEntry>> = Lazy::new(|| {
    vec![
        SpecEntry {
            name: "floor_relaxed",
            build: floor_relaxed::build,
        },
        SpecEntry {
            name: "floor",
            build: floor::build,
        },
        SpecEntry {
            name: "mul",
            build: mul::build,
        },
        SpecEntry {
            name: "relu_floor_chain",
            build: relu_floor_chain::build,
        },
    ]
});

pub fn catalog() -> &'static [SpecEntry] {
    &CATALOG
}

pub fn find(name: &str) -> Result<TestCase> {
    let entry = CATALOG
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| anyhow!("no declaration named {}", name))?;
    (entry.build)()
}

pub fn build_all() -> Result<Vec<TestCase>> {
    CATALOG.iter().map(|entry| (entry.build)()).collect()
}
