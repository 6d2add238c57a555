// SPDX-License-Identifier: MIT

//! Numeric value resolution and arithmetic

use super::value::{NumEnvValue, NumExprOp, NumFnOp, NumLiteral, NumValue, DECIMAL_PLACES};
use crate::sdk::error::{NumericDomainError, ResolveError};
use crate::warp::resolver::Resolver;
use crate::warp::variable::{find_variable, Resolution, Variable};
use bigdecimal::{BigDecimal, RoundingMode, Zero};
use futures::future::BoxFuture;
use futures::FutureExt;

impl Resolver {
    /// Resolve a numeric value node to a decimal.
    ///
    /// Operands are resolved left to right. If any operand depends on an
    /// external input that could not be fetched, the result is unresolved.
    pub fn resolve_num_value<'a, T>(
        &'a self,
        value: &'a NumValue<T>,
        vars: &'a [Variable],
    ) -> BoxFuture<'a, Result<Resolution<BigDecimal>, ResolveError>>
    where
        T: NumLiteral + Sync,
    {
        async move {
            match value {
                NumValue::Simple(literal) => Ok(Resolution::Resolved(literal.to_decimal()?)),
                NumValue::Expr(expr) => {
                    let left = self.resolve_num_value(&expr.left, vars).await?;
                    let right = self.resolve_num_value(&expr.right, vars).await?;
                    match (left, right) {
                        (Resolution::Resolved(l), Resolution::Resolved(r)) => {
                            Ok(Resolution::Resolved(apply_num_expr(expr.op, l, r)?))
                        }
                        _ => Ok(Resolution::Unresolved),
                    }
                }
                NumValue::Fn(func) => {
                    if !T::supports(func.op) {
                        return Err(ResolveError::UnsupportedFunction {
                            op: func.op.to_string(),
                            domain: T::DOMAIN,
                        });
                    }
                    let operand = self.resolve_num_value(&func.right, vars).await?;
                    Ok(operand.try_map(|v| apply_num_fn(func.op, v))?)
                }
                NumValue::Ref(reference) => {
                    let variable = find_variable(vars, reference)?;
                    self.resolve_variable(variable, |raw| Ok(T::parse_raw(&raw)?))
                        .await
                }
                NumValue::Env(env) => {
                    let header = self.chain.latest_block_header().await?;
                    let value = match env {
                        NumEnvValue::Time => BigDecimal::from(header.unix_seconds()),
                        NumEnvValue::BlockHeight => BigDecimal::from(header.height),
                    };
                    Ok(Resolution::Resolved(value))
                }
            }
        }
        .boxed()
    }
}

/// Binary arithmetic; division and sqrt results carry 18 fractional digits
pub fn apply_num_expr(
    op: NumExprOp,
    left: BigDecimal,
    right: BigDecimal,
) -> Result<BigDecimal, NumericDomainError> {
    match op {
        NumExprOp::Add => Ok(left + right),
        NumExprOp::Sub => Ok(left - right),
        NumExprOp::Mul => Ok(left * right),
        NumExprOp::Div => {
            if right.is_zero() {
                return Err(NumericDomainError::DivisionByZero);
            }
            Ok(round_fraction(left / right))
        }
        NumExprOp::Mod => {
            if right.is_zero() {
                return Err(NumericDomainError::DivisionByZero);
            }
            Ok(left % right)
        }
    }
}

pub fn apply_num_fn(op: NumFnOp, value: BigDecimal) -> Result<BigDecimal, NumericDomainError> {
    match op {
        NumFnOp::Abs => Ok(value.abs()),
        NumFnOp::Neg => Ok(-value),
        NumFnOp::Floor => Ok(value.with_scale_round(0, RoundingMode::Floor)),
        NumFnOp::Ceil => Ok(value.with_scale_round(0, RoundingMode::Ceiling)),
        NumFnOp::Sqrt => {
            if value < BigDecimal::zero() {
                return Err(NumericDomainError::NegativeSqrt(value.to_string()));
            }
            value
                .sqrt()
                .map(round_fraction)
                .ok_or_else(|| NumericDomainError::NegativeSqrt(value.to_string()))
        }
    }
}

fn round_fraction(value: BigDecimal) -> BigDecimal {
    value.with_scale_round(DECIMAL_PLACES as i64, RoundingMode::HalfEven)
}
