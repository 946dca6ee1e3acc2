//! Wildlife Prints Core - Shared types library.
//!
//! This crate provides common types used across all Wildlife Prints components:
//! - `storefront` - Public-facing print shop (catalog, cart, checkout)
//! - `cli` - Command-line tools for checking spreadsheet catalogs
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and payment methods
//! - [`product`] - Product records as shown in a catalog snapshot
//! - [`cart`] - Cart line items and the cart reducer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod product;
pub mod types;

pub use cart::{Cart, CartAction, LineItem, MAX_QUANTITY};
pub use product::Product;
pub use types::*;
