//! Helpers for mods built as native libraries
//!
//! A mod exports its entry type as a symbol and, optionally, a mount hook:
//!
//! ```rust,ignore
//! mod_bootstrap::export_entry!(com_example_Cool);
//! mod_bootstrap::export_mount!(com_example_Cool__mount, || {
//!     install_textures()?;
//!     Ok(())
//! });
//! ```
//!
//! The host and the mod do not share a Rust runtime, so a panic must never
//! leave the hook. `export_mount!` runs the body through [`guarded_mount`].

use std::panic::{self, UnwindSafe};

/// Status a hook returns when the body failed with an error
pub const MOUNT_FAILED: i32 = 1;
/// Status a hook returns when the body panicked
pub const MOUNT_PANICKED: i32 = 2;

/// Run a mount body, turning errors and panics into a nonzero status.
/// The failure is written to stderr from inside the mod.
pub fn guarded_mount<F, E>(body: F) -> i32
where
    F: FnOnce() -> Result<(), E> + UnwindSafe,
    E: std::fmt::Display,
{
    match panic::catch_unwind(body) {
        Ok(Ok(())) => 0,
        Ok(Err(e)) => {
            eprintln!("mount failed: {}", e);
            MOUNT_FAILED
        }
        Err(_) => MOUNT_PANICKED,
    }
}

/// Export the marker symbol an entry id resolves to (`com.example.Cool`
/// becomes `com_example_Cool`)
#[macro_export]
macro_rules! export_entry {
    ($symbol:ident) => {
        #[no_mangle]
        #[allow(non_upper_case_globals)]
        pub static $symbol: u8 = 0;
    };
}

/// Export `<symbol>` as a mount hook running `$body` under [`guarded_mount`]
#[macro_export]
macro_rules! export_mount {
    ($symbol:ident, $body:expr) => {
        #[no_mangle]
        #[allow(non_snake_case)]
        pub extern "C" fn $symbol() -> i32 {
            $crate::plugin_api::guarded_mount($body)
        }
    };
}
