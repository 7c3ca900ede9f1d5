//! # Core Application Logic
//!
//! The recommendation view's state and the rules that change it.
//! It knows nothing about terminals or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐            ┌────────────┐
//!             │    TUI     │            │  Backend   │
//!             │  Adapter   │            │  (reqwest) │
//!             │ (ratatui)  │            │            │
//!             └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct: all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`suggest`]: Type-ahead matching over the catalog
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod state;
pub mod suggest;
