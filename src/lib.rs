//! Newt Settings
//!
//! Settings panel core for the Newt tab page: theme and keyboard-shortcut
//! selection over built-in and user-created items, a one-shot migration of
//! legacy local settings into synced storage, and the terminal/CLI hosts
//! that drive it.
//!
//! The core never touches storage directly; every component receives a
//! shared [`store::PreferenceStore`].

pub mod affordance;
pub mod binder;
pub mod cli;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod migration;
pub mod models;
pub mod panel;
pub mod reconcile;
pub mod store;
pub mod tui;
