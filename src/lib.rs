//! Library entry for shibuya-view.
//!
//! A terminal scene viewer for the Shibuya building model. The label text of
//! every control is swapped between English and Japanese from one translation
//! document, and a view-state controller drives the camera, selection and
//! overlays of a [`viewport::SceneViewport`].

pub mod app;
pub mod config;
pub mod events;
pub mod i18n;
pub mod logic;
pub mod state;
pub mod ui;
pub mod viewport;
