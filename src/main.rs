//! The main entry point for the streamlog demo.
mod app;

use anyhow::Result;

/// The main function of the application.
///
/// Installs the logging backend, then redirects a few streams into it.
///
/// # Errors
///
/// Returns an error if setup fails or a stream cannot be redirected.
fn main() -> Result<()> {
    app::launch()
}
