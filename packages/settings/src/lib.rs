// ABOUTME: Settings panel of the Reseller Store plugin
// ABOUTME: Field schema, form rendering, save handling, filters and import/export controls

pub mod controller;
pub mod debug;
pub mod filters;
pub mod import_export;
pub mod nonce;
pub mod render;
pub mod schema;
pub mod types;
pub mod validation;

pub use controller::{PanelConfig, SettingsController, DEBUG_META_BOX_ID};
pub use nonce::{NonceAge, NonceService};
pub use render::DisplayFormat;
pub use schema::reseller_settings;
pub use types::{FieldKind, SettingDefinition, Submission};
pub use validation::SaveError;
