pub type Result<T, E = KnapsackError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnapsackError {
    #[error("Catalog contains no items")]
    EmptyCatalog,

    #[error("Item '{name}' has weight {weight}, weights must be positive")]
    InvalidWeight { name: String, weight: i64 },

    #[error("Item '{name}' has value {value}, values must be non-negative")]
    InvalidValue { name: String, value: i64 },

    #[error("Capacity {0} is negative")]
    InvalidCapacity(i64),

    #[error("Item name '{0}' appears more than once")]
    DuplicateName(String),

    #[error("Total {0} of the catalog exceeds u64::MAX")]
    TotalOverflow(&'static str),

    #[error("Target node count must be positive")]
    InvalidTarget,

    #[error("Invalid synthesis config: {0}")]
    InvalidConfig(String),

    #[error("State bitmask holds at most {max} items, catalog has {num_items}")]
    TooManyItems { num_items: usize, max: usize },

    #[error("Exceeded {resource} limit of {limit}")]
    ResourceExhausted { resource: &'static str, limit: usize },

    #[error("No viable test case found for target of {target_nodes} nodes")]
    SearchExhausted { target_nodes: usize },

    #[error("Invalid solution: {0}")]
    InvalidSolution(String),
}

impl KnapsackError {
    /// True for malformed catalogs, as opposed to resource or search failures.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            KnapsackError::EmptyCatalog
                | KnapsackError::InvalidWeight { .. }
                | KnapsackError::InvalidValue { .. }
                | KnapsackError::InvalidCapacity(_)
                | KnapsackError::DuplicateName(_)
                | KnapsackError::TotalOverflow(_)
                | KnapsackError::InvalidTarget
        )
    }

    pub fn is_resource_exhausted(&self) -> bool {
        matches!(
            self,
            KnapsackError::TooManyItems { .. } | KnapsackError::ResourceExhausted { .. }
        )
    }
}
