use crate::model::LineItem;

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Current stock level, read-only.
    CheckStock,
    /// Decrement stock by the given quantity if enough is available, and
    /// return the product frozen as an order line.
    Reserve(u32),
    /// Return units to stock.
    Release(u32),
    /// First phase of a delete: refuse further reservations.
    Retire,
    /// Undo `Retire` when the delete is refused.
    Reinstate,
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    Stock(u32),
    Reserved(LineItem),
    Released(u32),
    Retired { title: String },
    Reinstated,
}
