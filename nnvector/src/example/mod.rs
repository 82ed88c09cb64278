mod case;
mod json;
mod side;

pub use case::{Example, TestCase};
pub use json::{CaseDeserialize, CaseSerialize};
pub use side::{ExampleSide, Feed};
