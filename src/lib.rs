//! Storefront backend: CRUD over customers, products, categories, and
//! orders, checkout delegation to an external payment processor, and the
//! order-reconciliation workflow driven by the processor's webhook.
//!
//! The document store, payment processor, and identity provider are
//! collaborators behind traits ([`store`], [`payments`], [`identity`]);
//! [`state::AppState`] wires concrete implementations in once per process.

pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod payments;
pub mod reconcile;
pub mod state;
pub mod store;
