use anyhow::Result;
use serde_json::Value;

use super::TestCase;

pub struct CaseSerialize;

impl CaseSerialize {
    pub fn json(case: &TestCase) -> Result<Value> {
        Ok(serde_json::to_value(case)?)
    }

    pub fn pretty(case: &TestCase) -> Result<String> {
        Ok(serde_json::to_string_pretty(case)?)
    }
}

pub struct CaseDeserialize;

impl CaseDeserialize {
    pub fn from_json(value: Value) -> Result<TestCase> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_text(text: &str) -> Result<TestCase> {
        Ok(serde_json::from_str(text)?)
    }
}
