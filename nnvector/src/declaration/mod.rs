//! Declaration text form of a test case.
//!
//! ```text
//! model = Model()
//! o0 = Input("op1", "TENSOR_FLOAT32", "{1, 2, 2, 2}")
//! o1 = Output("op2", "TENSOR_FLOAT32", "{1, 2, 2, 2}")
//! model = model.Operation("FLOOR", o0).To(o1)
//! model = model.RelaxedExecution(True)
//! input0 = {o0: [-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 10.2]}
//! output0 = {o1: [-2.0, -1.0, -1.0, 0.0, 0.0, 1.0, 1.0, 10.0]}
//! Example((input0, output0))
//! ```
//!
//! Statements may span lines and `#` starts a comment.
mod lexer;
mod parser;
mod writer;

pub use parser::DeclarationParser;
pub use writer::DeclarationWriter;
