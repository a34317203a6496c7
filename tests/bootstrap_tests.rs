//! Process-level behaviour of the environment bootstrap.
//!
//! Every test in this binary shares one process, so they only assert
//! properties that hold whichever test runs first.

use std::sync::Barrier;

use odx::bootstrap::{self, BootstrapState};

#[test]
fn test_package_surface_is_importable() {
    use odx::{OdbEnv, OdbLexic, OdbObject, StringParser};

    let _parser = StringParser::new("lat,lon");
    let _lexic = OdbLexic::builtin();
    let _env = OdbEnv::new();
    let missing: odx::Result<OdbObject> = OdbObject::open("/nonexistent/obs.odb");
    assert!(missing.is_err());
}

#[test]
fn test_repeated_initialization_returns_same_environment() {
    let first = odx::ensure_initialized().expect("bootstrap failed");
    assert!(odx::is_initialized());
    assert_eq!(bootstrap::state(), BootstrapState::Initialized);

    for _ in 0..5 {
        let again = odx::ensure_initialized().expect("bootstrap failed");
        assert!(std::ptr::eq(first, again));
    }

    let stored = odx::environment().expect("environment not stored");
    assert!(std::ptr::eq(first, stored));
    assert!(stored.is_initialized());
    assert!(std::env::var_os(odx::env::ODB_IO_METHOD).is_some());
}

#[test]
fn test_concurrent_initialization_yields_one_environment() {
    const THREADS: usize = 8;
    let barrier = Barrier::new(THREADS);

    let addresses: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    let env = odx::ensure_initialized().expect("bootstrap failed");
                    env as *const odx::OdbEnv as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    assert!(odx::is_initialized());
}

#[test]
fn test_flag_never_reverts() {
    odx::ensure_initialized().expect("bootstrap failed");
    for _ in 0..100 {
        assert!(odx::is_initialized());
    }
}
