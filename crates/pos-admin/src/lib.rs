//! # POS Admin
//!
//! The administrative side of a retail point of sale: operators add products
//! to a catalog and record sales against it.
//!
//! - **[model]**: the `Product`, `Sale` and `Operator` records.
//! - **[product_store]**, **[sale_store]**, **[auth]**: one collection each,
//!   with their record hooks and error types.
//! - **[clients]**: typed wrappers over the collection clients.
//! - **[pages]**: headless view-models for the add-product and sell screens.
//! - **[validation]**, **[ui]**: form checks and the notification seams.
//! - **[lifecycle]**: [`PosSystem`](lifecycle::PosSystem) wires it together.
//!
//! Storage is provided by the `live_collections` crate.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod pages;
pub mod product_store;
pub mod sale_store;
pub mod ui;
pub mod validation;
