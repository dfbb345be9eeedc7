//! # Voxel World Entry Point
//!
//! Runs the library's headless demo loop.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    match voxel_world::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("voxel-world: {err}");
            ExitCode::FAILURE
        }
    }
}
