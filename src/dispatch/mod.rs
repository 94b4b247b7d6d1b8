//! Dispatch Module
//!
//! This module decides how accepted connections become sessions.
//!
//! ## Architecture
//!
//! ```text
//!                ┌──────────────────────┐
//!                │      Dispatcher      │
//!                │  (owns the listener) │
//!                └──────────┬───────────┘
//!                           │ accept()
//!                           ▼
//!                ┌──────────────────────┐
//!                │   DispatchStrategy   │
//!                └──────────┬───────────┘
//!              sequential   │   parallel
//!             ┌─────────────┴─────────────┐
//!             ▼                           ▼
//!   ┌──────────────────┐       ┌──────────────────┐
//!   │  SerialDispatch  │       │  SpawnDispatch   │
//!   │  await session   │       │  spawn task per  │
//!   │  inline          │       │  session         │
//!   └──────────────────┘       └──────────────────┘
//! ```
//!
//! The mode comes from the command line at startup and is fixed for the
//! process lifetime. Sequential mode means waiting clients queue in the
//! listen backlog until the running session ends; parallel mode admits
//! an unbounded number of concurrent sessions.

pub mod dispatcher;
pub mod strategy;

// Re-export commonly used types
pub use dispatcher::Dispatcher;
pub use strategy::{
    DispatchMode, DispatchStrategy, ParseDispatchModeError, SerialDispatch, SpawnDispatch,
};
