//! A headless windowing (virtualization) engine for large scrollable
//! collections.
//!
//! Rendering thousands of items at once is the one thing a list UI must never
//! do. This crate maintains a sliding visible range over an ordered item
//! sequence and reconciles two independent signals into it:
//!
//! - scroll-offset **estimation** (cheap, runs on every scroll event), and
//! - **boundary-crossing** notifications from the host's visibility
//!   primitive, which correct the estimate once scrolling settles.
//!
//! It supports fixed-size and dynamically measured items, overscan, and a
//! row-major grid adaptation that reuses the 1-D range engine.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - viewport size and scroll offsets (plus a monotonic `now_ms` clock)
//! - boundary-crossing events for registered, rendered items
//! - size measurements for dynamic items after they render
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod controller;
mod debounce;
mod engine;
mod estimator;
mod grid;
mod metrics;
mod observer;
mod options;
mod position;
mod reconciler;
mod types;


pub use cache::SizeCache;
pub use controller::{Controller, Easing, Tween};
pub use debounce::ScrollDebouncer;
pub use engine::WindowEngine;
pub use estimator::estimate_range;
pub use grid::{GridLayout, GridWindow};
pub use metrics::Metrics;
pub use observer::{ObservationRegistry, Registration};
pub use options::{RangeChangeCallback, VisibilityCallback, WindowingOptions};
pub use position::PositionModel;
pub use reconciler::RangeReconciler;
pub use types::{
    Align, ObserverConfig, ScrollBehavior, ScrollDirection, SizeMode, VirtualItem, VisibleRange,
};
