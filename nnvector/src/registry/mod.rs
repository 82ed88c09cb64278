mod op_defs;

pub use op_defs::{op_def, OpDef, OPS};
