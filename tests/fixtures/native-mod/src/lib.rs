//! Test mod exporting entry types the way a real native mod does

#![allow(non_upper_case_globals, non_snake_case)]

use std::panic;
use std::sync::atomic::{AtomicU32, Ordering};

static COOL_MOUNTS: AtomicU32 = AtomicU32::new(0);

#[no_mangle]
pub static com_example_Cool: u8 = 0;

#[no_mangle]
pub extern "C" fn com_example_Cool__mount() -> i32 {
    COOL_MOUNTS.fetch_add(1, Ordering::SeqCst);
    0
}

#[no_mangle]
pub extern "C" fn native_fixture_cool_mounts() -> u32 {
    COOL_MOUNTS.load(Ordering::SeqCst)
}

#[no_mangle]
pub static com_example_Bad: u8 = 0;

#[no_mangle]
pub extern "C" fn com_example_Bad__mount() -> i32 {
    3
}

#[no_mangle]
pub static com_example_Panicky: u8 = 0;

/// Catches its own panic, as every native hook must
#[no_mangle]
pub extern "C" fn com_example_Panicky__mount() -> i32 {
    match panic::catch_unwind(|| panic!("native boom")) {
        Ok(()) => 0,
        Err(_) => 2,
    }
}

#[no_mangle]
pub static com_example_Plain: u8 = 0;
