//! Process-wide debug tracing flag for the overlap sweep.
//!
//! Mirrors the upstream `GEODEBUG`/`geo_debug` switch: a single unsynchronized
//! (here, `Relaxed`-ordered) boolean, toggled only by explicit calls to
//! `geopoly_debug(i)`, never read for anything production behavior depends
//! on. Tracing lines follow the bracket-tag style already used elsewhere in
//! this codebase's lineage (`"[Polar] ..."` in the teacher's spatial
//! indexing code).

use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable or disable `[Overlap]`-tagged tracing from the plane sweep.
pub fn set_debug(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Whether debug tracing is currently enabled.
pub fn debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Print a bracket-tagged diagnostic line iff debug tracing is enabled.
macro_rules! geodebug {
    ($($arg:tt)*) => {
        if $crate::debug::debug_enabled() {
            eprintln!("[Overlap] {}", format!($($arg)*));
        }
    };
}

pub(crate) use geodebug;
