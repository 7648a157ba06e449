//! Mount invoker - runs each mod's `mount` hook in isolation

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::application::errors::MountError;
use crate::domain::entities::{LoadedMod, ModTable, MountOutcome};

/// Best-effort text of a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

thread_local! {
    static MOUNTING: Cell<bool> = Cell::new(false);
}

static PANIC_HOOK: Once = Once::new();

/// Route panics raised while a hook runs on this thread into the log.
/// Every other panic still goes to the previously installed hook.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if MOUNTING.with(Cell::get) {
                tracing::error!("{}", info);
            } else {
                previous(info);
            }
        }));
    });
}

fn run_hook<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    install_panic_hook();
    MOUNTING.with(|m| m.set(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    MOUNTING.with(|m| m.set(false));
    result
}

/// Mount a single mod. Never panics and never fails the caller.
pub fn mount(loaded: &LoadedMod) -> MountOutcome {
    let name = &loaded.display_name;
    tracing::info!("Mounting mod '{}'", name);

    let Some(hook) = loaded.entry.mount_hook() else {
        tracing::warn!("Failed to mount mod '{}', it does not define `mount` method", name);
        return MountOutcome::NotMountable;
    };

    let result = run_hook(|| hook.mount())
        .unwrap_or_else(|payload| Err(MountError::Panicked(panic_message(payload.as_ref()))));

    match result {
        Ok(()) => {
            tracing::info!("Mounted mod '{}'", name);
            MountOutcome::Mounted
        }
        Err(e) => {
            tracing::warn!("Failed to mount mod '{}': {}", name, e);
            tracing::warn!(
                "Mount failure detail for '{}' (bundle '{}', entry '{}'): {:?}",
                name,
                loaded.bundle,
                loaded.entry.id(),
                e
            );
            MountOutcome::Failed(e.to_string())
        }
    }
}

/// Mount every mod in table order
pub fn mount_all(mods: &ModTable) -> Vec<(String, MountOutcome)> {
    mods.iter()
        .map(|loaded| (loaded.display_name.clone(), mount(loaded)))
        .collect()
}
