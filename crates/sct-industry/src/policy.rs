//! Siting and operation policy for the steel pathway.
//!
//! [`SteelOptions`] is the user-facing configuration; absent keys default to
//! `false`. [`SteelPolicy`] is its resolved, inverted form as consumed by the
//! link and store builders. The two switches are coupled: without
//! flexibility there are no stores and every furnace must run at full
//! capacity, so production tracks the flat demand exactly.

use sct_core::{Megawatts, PerUnit};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteelOptions {
    /// Allow furnace capacity to be sited independently of local demand
    pub relocation_steel: bool,
    /// Allow time-varying furnace operation and commodity buffering
    pub flexibility_steel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SteelPolicy {
    pub no_relocation: bool,
    pub no_flexibility: bool,
}

impl SteelPolicy {
    /// Resolve options into builder flags, logging the outcome of each.
    pub fn resolve(options: &SteelOptions) -> Self {
        let policy = Self {
            no_relocation: !options.relocation_steel,
            no_flexibility: !options.flexibility_steel,
        };
        info!(
            "Steel industry relocation{} activated.",
            if policy.no_relocation { " not" } else { "" }
        );
        info!(
            "Steel industry flexibility{} activated.",
            if policy.no_flexibility { " not" } else { "" }
        );
        policy
    }

    /// Capacity limit for a link sized at `local_cap`
    pub fn p_nom_max(&self, local_cap: Megawatts) -> Megawatts {
        if self.no_relocation {
            local_cap
        } else {
            Megawatts::INFINITY
        }
    }

    /// Minimum dispatch fraction for furnace links
    pub fn p_min_pu(&self) -> PerUnit {
        if self.no_flexibility {
            PerUnit::ONE
        } else {
            PerUnit::ZERO
        }
    }

    pub fn buffers_enabled(&self) -> bool {
        !self.no_flexibility
    }
}

impl From<&SteelOptions> for SteelPolicy {
    fn from(options: &SteelOptions) -> Self {
        SteelPolicy::resolve(options)
    }
}
