//! Embedded assets — static files compiled into the CLI binary.
//!
//! At compile time, `include_dir!` embeds everything under `cli/assets/`:
//!   - `gitignore`            — written to new repos by `slipway init`
//!   - `slipway.sample.yaml`  — written by `slipway config init`

use anyhow::Result;
use include_dir::{Dir, include_dir};

static EMBEDDED_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Return an embedded asset as UTF-8 text.
///
/// # Errors
///
/// Returns an error if no asset with the given `name` exists or it is not
/// valid UTF-8.
pub fn asset_text(name: &str) -> Result<&'static str> {
    EMBEDDED_ASSETS
        .get_file(name)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| anyhow::anyhow!("embedded asset not found: {name}"))
}
