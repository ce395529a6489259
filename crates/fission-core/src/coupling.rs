//! Variable-identifier dispatch for off-diagonal Jacobian requests.

use fission_types::error::{FissionError, FissionResult};
use fission_types::state::VariableId;
use std::collections::HashMap;

/// What a coupled variable identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coupling {
    /// Flux of the kernel's own group.
    OwnFlux,
    /// Flux of another group.
    Flux(usize),
    Temperature,
    /// Not tracked: the term does not depend on it.
    Unrecognized,
}

/// Immutable map from variable identifier to [`Coupling`].
#[derive(Debug, Clone)]
pub struct CouplingTable {
    entries: HashMap<VariableId, Coupling>,
}

impl CouplingTable {
    /// Build the table for `own_group`. Every identifier may appear once.
    pub fn new(
        own_group: usize,
        group_fluxes: &[VariableId],
        temperature: Option<VariableId>,
    ) -> FissionResult<Self> {
        if own_group >= group_fluxes.len() {
            return Err(FissionError::GroupOutOfRange {
                group: own_group,
                num_groups: group_fluxes.len(),
            });
        }

        let mut entries = HashMap::with_capacity(group_fluxes.len() + 1);
        for (g, &id) in group_fluxes.iter().enumerate() {
            let coupling = if g == own_group {
                Coupling::OwnFlux
            } else {
                Coupling::Flux(g)
            };
            if entries.insert(id, coupling).is_some() {
                return Err(FissionError::DuplicateVariable(id));
            }
        }
        if let Some(id) = temperature {
            if entries.insert(id, Coupling::Temperature).is_some() {
                return Err(FissionError::DuplicateVariable(id));
            }
        }
        Ok(CouplingTable { entries })
    }

    pub fn resolve(&self, jvar: VariableId) -> Coupling {
        self.entries
            .get(&jvar)
            .copied()
            .unwrap_or(Coupling::Unrecognized)
    }

    /// Tracked identifiers in ascending order.
    pub fn tracked(&self) -> Vec<(VariableId, Coupling)> {
        let mut out: Vec<_> = self.entries.iter().map(|(&id, &c)| (id, c)).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
