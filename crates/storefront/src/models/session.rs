//! Session-related types.
//!
//! The cart is the only visitor state; it lives in the session under
//! [`keys::CART`] as a serialized [`wildlife_prints_core::Cart`].

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";
}
