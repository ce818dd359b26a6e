//! Static plan defects, reported before any network effect occurs

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// A defect found during static validation of a [`crate::DeploymentPlan`].
///
/// Validation runs before execution, so none of these ever leave a plan
/// partially applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanValidationError {
    /// The plan contains no steps
    EmptyPlan,
    /// Two steps share an identifier
    DuplicateStepId {
        /// The repeated identifier
        id: String,
    },
    /// A step argument references an identifier not declared anywhere in the
    /// plan
    UnknownReference {
        /// The step whose argument holds the reference
        step: String,
        /// The unresolvable identifier
        reference: String,
    },
    /// A step argument references a step declared later in the plan, whose
    /// address cannot exist yet at deployment time
    ForwardReference {
        /// The step whose argument holds the reference
        step: String,
        /// The identifier declared later in the plan
        reference: String,
    },
    /// A wiring action argument references an identifier not declared in the
    /// plan
    UnknownWiringReference {
        /// The method the wiring action would call
        method: String,
        /// The unresolvable identifier
        reference: String,
    },
    /// A wiring action targets a step not declared in the plan
    UnknownWiringTarget {
        /// The method the wiring action would call
        method: String,
        /// The undeclared target identifier
        target: String,
    },
}

impl Display for PlanValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PlanValidationError::EmptyPlan => write!(f, "plan contains no steps"),
            PlanValidationError::DuplicateStepId { id } => {
                write!(f, "duplicate step id `{}`", id)
            }
            PlanValidationError::UnknownReference { step, reference } => {
                write!(f, "step `{}` references unknown step `{}`", step, reference)
            }
            PlanValidationError::ForwardReference { step, reference } => {
                write!(
                    f,
                    "step `{}` references step `{}` before it is deployed",
                    step, reference
                )
            }
            PlanValidationError::UnknownWiringReference { method, reference } => {
                write!(
                    f,
                    "wiring action `{}` references unknown step `{}`",
                    method, reference
                )
            }
            PlanValidationError::UnknownWiringTarget { method, target } => {
                write!(
                    f,
                    "wiring action `{}` targets unknown step `{}`",
                    method, target
                )
            }
        }
    }
}

impl Error for PlanValidationError {}

#[cfg(test)]
mod tests {
    use super::PlanValidationError;

    #[test]
    fn test_display_names_the_offending_reference() {
        let err = PlanValidationError::ForwardReference {
            step: "staking".to_string(),
            reference: "token".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("staking"));
        assert!(rendered.contains("token"));

        let err = PlanValidationError::UnknownWiringTarget {
            method: "addMinter".to_string(),
            target: "vault".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("addMinter"));
        assert!(rendered.contains("vault"));
    }
}
