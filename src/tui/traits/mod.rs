//! Component trait system for TUI architecture
//!
//! This module defines the contracts that UI components implement.
//! Instead of App knowing how to render/scroll/edit for every panel,
//! components declare their own capabilities through traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         App                                 │
//! │      (state machine: routes events, emits commands)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!         ┌──────────────┬─────┴────────┬──────────────┐
//!         ▼              ▼              ▼              ▼
//!   ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!   │   File   │   │ Content  │   │ History  │   │   Text   │
//!   │ Selector │   │ Viewport │   │ Viewport │   │  Input   │
//!   └──────────┘   └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! # Traits Overview
//!
//! - [`Component`] - Base trait: render
//! - [`Scrollable`] - Components with scrollable content
//! - [`Interactive`] - Components that handle keyboard input

mod component;
mod interactive;
mod scrollable;

pub use component::{Component, RenderContext};
pub use interactive::{Handled, Interactive};
pub use scrollable::Scrollable;
