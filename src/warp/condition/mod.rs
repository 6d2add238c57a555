// SPDX-License-Identifier: MIT

//! Condition evaluation for Warp jobs
//!
//! A job fires when its condition tree evaluates to true. Trees combine
//! typed comparisons with `and`/`or`/`not`, e.g.
//! - `{"expr": {"timestamp": {"comparator": "1700000000", "op": "gt"}}}`
//! - `{"expr": {"uint": {"left": {"env": "time"}, "op": "gt", "right": {"ref": "$warp.variable.next"}}}}`

mod ast;
mod evaluator;
mod numeric;
mod ops;
pub mod value;

pub use ast::{
    BlockExpr, Condition, Expr, GenExpr, NumOp, StringOp, StringValue, TimeExpr, TimeOp,
    UnrecognizedExpr,
};
pub use numeric::{apply_num_expr, apply_num_fn};
pub use ops::{resolve_height_op, resolve_num_op, resolve_string_op, resolve_time_op};
pub use value::{
    Decimal256, Int128, NumEnvValue, NumExprOp, NumExprValue, NumFnOp, NumFnValue, NumLiteral,
    NumValue, Uint256, Uint64,
};
