//! Core request/response model for the calculator backend
//!
//! Everything here is pure data: parsing field text, building request
//! bodies and turning response bodies into display strings. No UI state
//! and no I/O.

pub mod parser;
pub mod request;
pub mod response;

pub use parser::{parse_field, ParseError};
pub use request::OperationRequest;
pub use response::{format_fixed, interpret, OperationResult, ResponseShapeError};

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the backend-delegated linear-algebra operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Normalize a vector
    UnitVector,
    /// Angle between two vectors, in degrees
    AngleBetween,
    /// Orthogonality test with dot product
    Orthogonality,
    /// Parallelism test with cross product
    Parallelism,
    /// Weighted sum of vectors
    LinearCombination,
    /// Solve `A x = b`
    SolveSystem,
    /// Matrix transpose
    Transpose,
    /// Matrix product
    Multiply,
}

impl Operation {
    /// All operations, in page order
    pub const ALL: [Self; 8] = [
        Self::UnitVector,
        Self::AngleBetween,
        Self::Orthogonality,
        Self::Parallelism,
        Self::LinearCombination,
        Self::SolveSystem,
        Self::Transpose,
        Self::Multiply,
    ];

    /// Backend endpoint path
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::UnitVector => "/unit_vector",
            Self::AngleBetween => "/angle_between",
            Self::Orthogonality => "/orthogonality",
            Self::Parallelism => "/parallelism",
            Self::LinearCombination => "/linear_combination",
            Self::SolveSystem => "/solve_system",
            Self::Transpose => "/matrix_transpose",
            Self::Multiply => "/matrix_multiply",
        }
    }

    /// Input field ids, in request-field order
    #[must_use]
    pub const fn field_ids(self) -> &'static [&'static str] {
        match self {
            Self::UnitVector => &["vectorInput"],
            Self::AngleBetween => &["v1Input", "v2Input"],
            Self::Orthogonality => &["orthV1", "orthV2"],
            Self::Parallelism => &["parV1", "parV2"],
            Self::LinearCombination => &["vectorsInput", "coeffInput"],
            Self::SolveSystem => &["AInput", "bInput"],
            Self::Transpose => &["matrixInput"],
            Self::Multiply => &["m1Input", "m2Input"],
        }
    }

    /// Id of the button that triggers this operation
    #[must_use]
    pub const fn button_id(self) -> &'static str {
        match self {
            Self::UnitVector => "btn-unit-vector",
            Self::AngleBetween => "btn-angle",
            Self::Orthogonality => "btn-orthogonality",
            Self::Parallelism => "btn-parallelism",
            Self::LinearCombination => "btn-linear-combination",
            Self::SolveSystem => "btn-solve-system",
            Self::Transpose => "btn-transpose",
            Self::Multiply => "btn-multiply",
        }
    }

    /// Human-readable title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::UnitVector => "Unit Vector",
            Self::AngleBetween => "Angle Between Vectors",
            Self::Orthogonality => "Orthogonality",
            Self::Parallelism => "Parallelism",
            Self::LinearCombination => "Linear Combination",
            Self::SolveSystem => "Solve Linear System",
            Self::Transpose => "Matrix Transpose",
            Self::Multiply => "Matrix Multiplication",
        }
    }

    /// Finds the operation triggered by a button id
    #[must_use]
    pub fn from_button(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.button_id() == id)
    }

    /// Finds the operation owning an input field
    #[must_use]
    pub fn from_field(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.field_ids().contains(&id))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<_> = Operation::ALL.iter().map(|op| op.path()).collect();
        assert_eq!(paths.len(), Operation::ALL.len());
    }

    #[test]
    fn test_each_field_maps_to_exactly_one_operation() {
        let mut seen = HashSet::new();
        for op in Operation::ALL {
            for id in op.field_ids() {
                assert!(seen.insert(*id), "field {id} reused");
                assert_eq!(Operation::from_field(id), Some(op));
            }
        }
    }

    #[test]
    fn test_from_button_roundtrip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_button(op.button_id()), Some(op));
        }
        assert_eq!(Operation::from_button("btn-visualize"), None);
    }

    #[test]
    fn test_from_field_unknown() {
        assert_eq!(Operation::from_field("visV1"), None);
    }

    #[test]
    fn test_display_uses_title() {
        assert_eq!(Operation::SolveSystem.to_string(), "Solve Linear System");
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&Operation::LinearCombination).unwrap();
        assert_eq!(json, "\"linear-combination\"");
    }
}
