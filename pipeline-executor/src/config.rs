//! Order Executor policy configuration (§4.6).

/// Constant policy fields the executor stamps onto every Order Request.
/// `default_quantity` is fixed at 1 regardless of a condition's configured
/// quantity — preserved verbatim from the original as a documented
/// oversight rather than "fixed" here (see the Open Questions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    pub default_quantity: i64,
    pub note: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            default_quantity: 1,
            note: "pipeline-executor".to_string(),
        }
    }
}
