// ABOUTME: Core types, host interfaces and utilities for the Reseller Store settings panel
// ABOUTME: Foundational package shared by storage, settings, api and cli

pub mod constants;
pub mod hooks;
pub mod host;
pub mod utils;

// Re-export main types
pub use hooks::{EventBus, Filter};
pub use host::{
    AdminHost, Asset, AssetKind, InProcessHost, MenuPage, MetaBox, PostMeta, StorefrontStatus,
};

// Re-export utilities
pub use utils::{html_escape, is_admin_uri};
