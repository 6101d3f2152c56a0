//! The four pipeline case combinations.
//!
//! Classification scheme (three-state vs two-state) and the
//! permanent-water removal flag combine into four mutually exclusive
//! cases. Modeling them as one enum keeps every combination individually
//! testable instead of burying them in nested conditionals.

use crate::classifier::ClassificationScheme;

/// Discriminated configuration of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineCase {
    /// Three-state map, permanent water removed from the output.
    /// The mask comes from the classifier; no alignment needed.
    ThreeStateRemoval,
    /// Three-state map, permanent water kept.
    ThreeStateKeep,
    /// Two-state map, permanent water removed via an externally generated
    /// land-cover mask aligned onto the model output grid.
    TwoStateRemoval,
    /// Two-state map, permanent water kept.
    TwoStateKeep,
}

impl PipelineCase {
    /// Build the case from the two run flags.
    pub fn from_flags(scheme: ClassificationScheme, remove_permanent_water: bool) -> Self {
        match (scheme, remove_permanent_water) {
            (ClassificationScheme::ThreeState, true) => Self::ThreeStateRemoval,
            (ClassificationScheme::ThreeState, false) => Self::ThreeStateKeep,
            (ClassificationScheme::TwoState, true) => Self::TwoStateRemoval,
            (ClassificationScheme::TwoState, false) => Self::TwoStateKeep,
        }
    }

    /// The classification scheme of this case.
    pub fn scheme(&self) -> ClassificationScheme {
        match self {
            Self::ThreeStateRemoval | Self::ThreeStateKeep => ClassificationScheme::ThreeState,
            Self::TwoStateRemoval | Self::TwoStateKeep => ClassificationScheme::TwoState,
        }
    }

    /// Whether permanent water is removed from the composite.
    pub fn removes_permanent_water(&self) -> bool {
        matches!(self, Self::ThreeStateRemoval | Self::TwoStateRemoval)
    }

    /// Whether the run must generate a mask from an external land-cover
    /// source before the model runs.
    pub fn needs_external_mask(&self) -> bool {
        matches!(self, Self::TwoStateRemoval)
    }
}

impl std::fmt::Display for PipelineCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ThreeStateRemoval => "three-state with permanent water removal",
            Self::ThreeStateKeep => "three-state without permanent water removal",
            Self::TwoStateRemoval => "two-state with external permanent water mask",
            Self::TwoStateKeep => "two-state without permanent water removal",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_four_combinations() {
        assert_eq!(
            PipelineCase::from_flags(ClassificationScheme::ThreeState, true),
            PipelineCase::ThreeStateRemoval
        );
        assert_eq!(
            PipelineCase::from_flags(ClassificationScheme::ThreeState, false),
            PipelineCase::ThreeStateKeep
        );
        assert_eq!(
            PipelineCase::from_flags(ClassificationScheme::TwoState, true),
            PipelineCase::TwoStateRemoval
        );
        assert_eq!(
            PipelineCase::from_flags(ClassificationScheme::TwoState, false),
            PipelineCase::TwoStateKeep
        );
    }

    #[test]
    fn test_only_two_state_removal_needs_external_mask() {
        assert!(PipelineCase::TwoStateRemoval.needs_external_mask());
        assert!(!PipelineCase::ThreeStateRemoval.needs_external_mask());
        assert!(!PipelineCase::ThreeStateKeep.needs_external_mask());
        assert!(!PipelineCase::TwoStateKeep.needs_external_mask());
    }

    #[test]
    fn test_removal_flag() {
        assert!(PipelineCase::ThreeStateRemoval.removes_permanent_water());
        assert!(PipelineCase::TwoStateRemoval.removes_permanent_water());
        assert!(!PipelineCase::ThreeStateKeep.removes_permanent_water());
        assert!(!PipelineCase::TwoStateKeep.removes_permanent_water());
    }
}
