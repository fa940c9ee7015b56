//! Request bodies for the backend endpoints

use super::Operation;
use serde_json::{json, Value};

/// A fully parsed request, one variant per operation
///
/// Payloads are carried as JSON values; the backend validates numeric
/// shape and reports problems through its `error` field.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationRequest {
    /// `POST /unit_vector`
    UnitVector {
        /// Vector to normalize
        vector: Value,
    },
    /// `POST /angle_between`
    AngleBetween {
        /// First vector
        v1: Value,
        /// Second vector
        v2: Value,
    },
    /// `POST /orthogonality`
    Orthogonality {
        /// First vector
        v1: Value,
        /// Second vector
        v2: Value,
    },
    /// `POST /parallelism`
    Parallelism {
        /// First vector
        v1: Value,
        /// Second vector
        v2: Value,
    },
    /// `POST /linear_combination`
    LinearCombination {
        /// Vectors to combine
        vectors: Value,
        /// One coefficient per vector
        coefficients: Value,
    },
    /// `POST /solve_system`
    SolveSystem {
        /// Coefficient matrix, sent as `A`
        a: Value,
        /// Right-hand side
        b: Value,
    },
    /// `POST /matrix_transpose`
    Transpose {
        /// Matrix to transpose
        matrix: Value,
    },
    /// `POST /matrix_multiply`
    Multiply {
        /// Left operand
        m1: Value,
        /// Right operand
        m2: Value,
    },
}

impl OperationRequest {
    /// Builds a request from parsed field values given in `field_ids` order.
    ///
    /// Missing values become `null`.
    #[must_use]
    pub fn from_values(operation: Operation, values: Vec<Value>) -> Self {
        let mut values = values.into_iter();
        let mut next = || values.next().unwrap_or(Value::Null);
        match operation {
            Operation::UnitVector => Self::UnitVector { vector: next() },
            Operation::AngleBetween => Self::AngleBetween {
                v1: next(),
                v2: next(),
            },
            Operation::Orthogonality => Self::Orthogonality {
                v1: next(),
                v2: next(),
            },
            Operation::Parallelism => Self::Parallelism {
                v1: next(),
                v2: next(),
            },
            Operation::LinearCombination => Self::LinearCombination {
                vectors: next(),
                coefficients: next(),
            },
            Operation::SolveSystem => Self::SolveSystem {
                a: next(),
                b: next(),
            },
            Operation::Transpose => Self::Transpose { matrix: next() },
            Operation::Multiply => Self::Multiply {
                m1: next(),
                m2: next(),
            },
        }
    }

    /// The operation this request belongs to
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::UnitVector { .. } => Operation::UnitVector,
            Self::AngleBetween { .. } => Operation::AngleBetween,
            Self::Orthogonality { .. } => Operation::Orthogonality,
            Self::Parallelism { .. } => Operation::Parallelism,
            Self::LinearCombination { .. } => Operation::LinearCombination,
            Self::SolveSystem { .. } => Operation::SolveSystem,
            Self::Transpose { .. } => Operation::Transpose,
            Self::Multiply { .. } => Operation::Multiply,
        }
    }

    /// Endpoint path
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.operation().path()
    }

    /// JSON body containing exactly the operation's named fields
    #[must_use]
    pub fn to_body(&self) -> Value {
        match self {
            Self::UnitVector { vector } => json!({ "vector": vector }),
            Self::AngleBetween { v1, v2 }
            | Self::Orthogonality { v1, v2 }
            | Self::Parallelism { v1, v2 } => json!({ "v1": v1, "v2": v2 }),
            Self::LinearCombination {
                vectors,
                coefficients,
            } => json!({ "vectors": vectors, "coefficients": coefficients }),
            Self::SolveSystem { a, b } => json!({ "A": a, "b": b }),
            Self::Transpose { matrix } => json!({ "matrix": matrix }),
            Self::Multiply { m1, m2 } => json!({ "m1": m1, "m2": m2 }),
        }
    }
}
