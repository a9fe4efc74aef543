use crate::model::{CartLine, ProductId};

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add units, merging into an existing line.
    Add { product_id: ProductId, quantity: u32 },
    /// Set a line's quantity; zero or less removes it.
    SetQuantity { product_id: ProductId, quantity: i64 },
    Remove { product_id: ProductId },
    /// Take the quantities of a placed order out of the cart.
    Deduct(Vec<CartLine>),
}
