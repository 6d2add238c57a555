// SPDX-License-Identifier: MIT

//! Variable lookup and raw value resolution

use super::reference::VariableRef;
use super::resolution::Resolution;
use super::types::{ExternalInput, Variable};
use crate::sdk::error::ResolveError;
use crate::warp::resolver::Resolver;
use futures::future::join_all;

/// Find the variable a reference points at (linear scan by name)
pub fn find_variable<'a>(
    vars: &'a [Variable],
    reference: &VariableRef,
) -> Result<&'a Variable, ResolveError> {
    vars.iter()
        .find(|v| v.name() == reference.name())
        .ok_or_else(|| ResolveError::UnknownVariable {
            name: reference.name().to_string(),
        })
}

impl Resolver {
    /// Resolve a variable's raw string value and convert it with `cast`.
    ///
    /// External and query variables that cannot be fetched come back as
    /// [`Resolution::Unresolved`] without calling `cast`.
    pub async fn resolve_variable<T, F>(
        &self,
        variable: &Variable,
        cast: F,
    ) -> Result<Resolution<T>, ResolveError>
    where
        F: FnOnce(String) -> Result<T, ResolveError>,
    {
        let raw = self.resolve_raw(variable).await;
        if !raw.is_resolved() {
            log::debug!("Variable '{}' is unresolved", variable.name());
        }
        raw.try_map(cast)
    }

    async fn resolve_raw(&self, variable: &Variable) -> Resolution<String> {
        match variable {
            Variable::Static(v) => Resolution::Resolved(v.value.clone()),
            Variable::External(v) => self.resolve_external(&v.init_fn).await.into(),
            Variable::Query(v) => self.resolve_query(&v.init_fn).await.into(),
        }
    }

    /// Pre-resolve every external variable so its value can be submitted
    /// with an execute transaction. Variables whose call fails are left out.
    pub async fn resolve_external_inputs(&self, vars: &[Variable]) -> Vec<ExternalInput> {
        let externals: Vec<_> = vars
            .iter()
            .filter_map(|v| match v {
                Variable::External(ext) => Some(ext),
                _ => None,
            })
            .collect();

        let resolved = join_all(
            externals
                .iter()
                .map(|ext| self.resolve_external(&ext.init_fn)),
        )
        .await;

        externals
            .into_iter()
            .zip(resolved)
            .filter_map(|(ext, input)| match input {
                Some(input) => Some(ExternalInput {
                    name: ext.name.clone(),
                    input,
                }),
                None => {
                    log::warn!("Skipping external input '{}': not resolved", ext.name);
                    None
                }
            })
            .collect()
    }
}
