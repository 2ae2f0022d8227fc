use serde::{Deserialize, Serialize};

/// How the line items of an `Order` were obtained from its stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemShape {
    /// The record carried a non-empty `orderItems` sequence.
    Structured,
    /// The record predates `orderItems`; one item was built from its flat fields.
    Legacy,
    /// Neither shape carried anything.
    #[default]
    Empty,
}

impl ItemShape {
    pub fn is_legacy(&self) -> bool {
        matches!(self, ItemShape::Legacy)
    }
}
