// shopcart/src/lib.rs

//! Shopping cart and wishlist rules.
//!
//! `ShoppingCartService` decides whether a product may be added to a cart,
//! merges and updates cart lines, removes them, validates whole carts and
//! migrates carts between customers. Rule violations come back as lists of
//! human readable warnings; `CartError` is only returned for misuse and
//! collaborator failures.
//!
//! Storage, catalog, customers, permissions, events, localization and time
//! are collaborators behind the traits in [`ports`]. The [`adapters`] module
//! provides in-memory implementations.

pub mod adapters;
pub mod attribute_parser;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod localization;
pub mod models;
pub mod pipelines;
pub mod ports;
pub mod services;
pub mod state;

pub use config::CartSettings;
pub use errors::{CartError, Result};
pub use localization::DefaultLocalizer;
pub use services::{AddToCartRequest, CartItemUpdate, ItemWarningRequest, ShoppingCartService, WarningChecks};
pub use state::CartDeps;
