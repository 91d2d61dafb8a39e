//! # photo-cleanup CLI
//!
//! Command-line interface for the photo cleanup engine.
//!
//! ## Usage
//! ```bash
//! photo-cleanup scan ~/Pictures
//! photo-cleanup remove screenshot ~/Pictures --all --yes
//! photo-cleanup trash list
//! ```

mod cli;

use photo_cleanup::Result;

fn main() -> Result<()> {
    photo_cleanup::init_tracing();
    cli::run()
}
