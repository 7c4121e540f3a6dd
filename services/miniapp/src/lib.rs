//! Client core of the buyback Mini App
//!
//! Sellers list products, buyers walk a fixed eight-step
//! purchase-and-proof workflow, moderators review listings and push
//! notifications. This crate holds everything below the rendering layer:
//! the REST client with its re-authentication flow, the Telegram bridge
//! seam, the step state machine, back-button routing and payout math.

pub mod api;
pub mod app;
pub mod flow;
pub mod models;
pub mod nav;
pub mod payout;
pub mod routes;
pub mod session;
pub mod telegram;
pub mod validation;
