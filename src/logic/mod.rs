//! Core non-UI logic: the view-state controller.

pub mod controller;

pub use controller::{KeyOutcome, ViewController};
