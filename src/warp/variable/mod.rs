// SPDX-License-Identifier: MIT

//! Job variables and their resolution
//!
//! Variables come in three kinds:
//! - `static` - value stored with the job
//! - `external` - fetched over HTTP, extracted with JSONPath
//! - `query` - read through the resolver contract, extracted with JSONPath

mod external;
mod query;
mod reference;
mod resolution;
mod resolver;
mod selector;
mod types;

pub use external::build_request;
pub use reference::{VariableRef, VARIABLE_REF_PREFIX};
pub use resolution::Resolution;
pub use resolver::find_variable;
pub use selector::select_first;
pub use types::{
    ExternalExpr, ExternalInput, ExternalVariable, Method, QueryExpr, QueryVariable,
    StaticVariable, UpdateFn, UpdateFnValue, Variable, VariableKind,
};
