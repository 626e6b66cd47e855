//! Asset format version.

/// Version of the JSON asset layout accepted by the `json` loader.
pub const ASSET_FORMAT_VERSION: u32 = 1;
