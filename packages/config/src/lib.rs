// ABOUTME: Configuration constants for the Reseller Store settings panel
// ABOUTME: Single place naming every environment variable the binary reads

pub mod constants;
