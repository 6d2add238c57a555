// SPDX-License-Identifier: MIT

//! Condition tree and expression evaluation

use super::ast::{Condition, Expr, GenExpr, NumOp, StringValue};
use super::ops::{resolve_height_op, resolve_num_op, resolve_string_op, resolve_time_op};
use super::value::{NumLiteral, NumValue};
use crate::sdk::error::ResolveError;
use crate::warp::resolver::Resolver;
use crate::warp::variable::{find_variable, Resolution, Variable, VariableRef};
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

impl Resolver {
    /// Evaluate a condition tree.
    ///
    /// `and`/`or` evaluate every child concurrently and never short-circuit,
    /// so every external input of the tree is fetched. Structural errors in
    /// any child fail the whole evaluation.
    pub fn resolve_condition<'a>(
        &'a self,
        condition: &'a Condition,
        vars: &'a [Variable],
    ) -> BoxFuture<'a, Result<bool, ResolveError>> {
        async move {
            match condition {
                Condition::And(children) => {
                    let results =
                        join_all(children.iter().map(|c| self.resolve_condition(c, vars))).await;
                    let mut all = true;
                    for result in results {
                        all &= result?;
                    }
                    Ok(all)
                }
                Condition::Or(children) => {
                    let results =
                        join_all(children.iter().map(|c| self.resolve_condition(c, vars))).await;
                    let mut any = false;
                    for result in results {
                        any |= result?;
                    }
                    Ok(any)
                }
                Condition::Not(inner) => Ok(!self.resolve_condition(inner, vars).await?),
                Condition::Expr(expr) => self.resolve_expr(expr, vars).await,
            }
        }
        .boxed()
    }

    pub async fn resolve_expr(&self, expr: &Expr, vars: &[Variable]) -> Result<bool, ResolveError> {
        match expr {
            Expr::String(cmp) => {
                let left = self.resolve_string_value(&cmp.left, vars).await?;
                let right = self.resolve_string_value(&cmp.right, vars).await?;
                Ok(resolve_string_op(&left, &right, cmp.op))
            }
            Expr::Uint(cmp) => self.resolve_num_expr(cmp, vars).await,
            Expr::Int(cmp) => self.resolve_num_expr(cmp, vars).await,
            Expr::Decimal(cmp) => self.resolve_num_expr(cmp, vars).await,
            Expr::Timestamp(time) => {
                let header = self.chain.latest_block_header().await?;
                Ok(resolve_time_op(header.unix_seconds(), time.comparator.0, time.op))
            }
            Expr::BlockHeight(block) => {
                let header = self.chain.latest_block_header().await?;
                Ok(resolve_height_op(header.height, block.comparator.0, block.op))
            }
            Expr::Bool(reference) => self.resolve_bool_ref(reference, vars).await,
            Expr::Unrecognized(unrecognized) => {
                log::warn!(
                    "Unrecognized expression '{}', evaluating to false",
                    unrecognized.tag().unwrap_or("?")
                );
                Ok(false)
            }
        }
    }

    async fn resolve_num_expr<T>(
        &self,
        cmp: &GenExpr<NumValue<T>, NumOp>,
        vars: &[Variable],
    ) -> Result<bool, ResolveError>
    where
        T: NumLiteral + Sync,
    {
        let left = self.resolve_num_value(&cmp.left, vars).await?;
        let right = self.resolve_num_value(&cmp.right, vars).await?;
        Ok(resolve_num_op(&left, &right, cmp.op))
    }

    pub async fn resolve_string_value(
        &self,
        value: &StringValue,
        vars: &[Variable],
    ) -> Result<Resolution<String>, ResolveError> {
        match value {
            StringValue::Simple(s) => Ok(Resolution::Resolved(s.clone())),
            StringValue::Ref(reference) => {
                let variable = find_variable(vars, reference)?;
                self.resolve_variable(variable, Ok).await
            }
        }
    }

    /// A `bool` expression must produce a value; unresolved is an error here
    async fn resolve_bool_ref(
        &self,
        reference: &VariableRef,
        vars: &[Variable],
    ) -> Result<bool, ResolveError> {
        let variable = find_variable(vars, reference)?;
        let name = variable.name().to_string();
        let value = self
            .resolve_variable(variable, |raw| Ok(parse_bool(&raw)))
            .await?;

        value
            .into_option()
            .ok_or(ResolveError::UnresolvedBool { name })
    }
}

/// Only `true` (any case) is truthy; every other resolved value reads as false
fn parse_bool(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}
