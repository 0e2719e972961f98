//! Bound set - admissible hardpoint intervals per subsystem
//!
//! Linkage bounds are keyed by [`Hardpoint`]. Strut and spring points have no
//! generator yet, so their bounds are keyed by label and only validated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::linkage::Subsystem;
use crate::core::sampling::{Bound, Hardpoint};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundSet {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub linkage: BTreeMap<Hardpoint, Bound>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub strut: BTreeMap<String, Bound>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub spring: BTreeMap<String, Bound>,
}

impl BoundSet {
    pub fn linkage_bound(&self, hardpoint: Hardpoint) -> Option<&Bound> {
        self.linkage.get(&hardpoint)
    }

    /// Whether any bounds were given for a subsystem
    pub fn has(&self, subsystem: Subsystem) -> bool {
        match subsystem {
            Subsystem::Linkage => !self.linkage.is_empty(),
            Subsystem::Strut => !self.strut.is_empty(),
            Subsystem::Spring => !self.spring.is_empty(),
        }
    }

    /// Subsystems with bounds, in generation order
    pub fn subsystems(&self) -> Vec<Subsystem> {
        Subsystem::ALL.into_iter().filter(|s| self.has(*s)).collect()
    }

    /// Check every interval of every subsystem
    pub fn validate(&self) -> Result<()> {
        for (hp, bound) in &self.linkage {
            bound.validate(&format!("bound.linkage.{}", hp))?;
        }
        for (name, bound) in &self.strut {
            bound.validate(&format!("bound.strut.{}", name))?;
        }
        for (name, bound) in &self.spring {
            bound.validate(&format!("bound.spring.{}", name))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampling::Convention;
    use crate::entities::design::DesignFile;

    #[test]
    fn test_example_bounds_are_valid() {
        let bounds = DesignFile::example().bound;
        assert!(bounds.validate().is_ok());
        assert_eq!(
            bounds.subsystems(),
            vec![Subsystem::Linkage, Subsystem::Strut, Subsystem::Spring]
        );
        assert_eq!(bounds.strut["PA"].convention, Convention::Radial);
    }

    #[test]
    fn test_invalid_strut_bound_names_its_path() {
        let mut bounds = BoundSet::default();
        bounds
            .strut
            .insert("RA".to_string(), Bound::cartesian([[2.0, 1.0], [0.0, 0.0], [0.0, 0.0]]));
        let err = bounds.validate().unwrap_err();
        assert!(err.to_string().contains("bound.strut.RA[X]"));
        assert_eq!(bounds.subsystems(), vec![Subsystem::Strut]);
    }
}
