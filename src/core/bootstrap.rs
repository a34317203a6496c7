//! Process-wide, at-most-once initialization of the ODB environment.
//!
//! Nothing happens at load time. Callers run [`ensure_initialized`] (the CLI
//! does so on startup); the first successful call builds and initializes the
//! [`OdbEnv`] and keeps it for the rest of the process, later calls return it.

use once_cell::sync::OnceCell;
use std::fmt;
use tracing::{debug, info};

use crate::core::env::OdbEnv;
use crate::core::error::Result;

/// Lifecycle of a [`Bootstrap`] guard. There is no way back to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Uninitialized,
    Initialized,
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapState::Uninitialized => f.write_str("uninitialized"),
            BootstrapState::Initialized => f.write_str("initialized"),
        }
    }
}

/// Do-once guard around a value built by a fallible initializer.
///
/// Concurrent callers block while one initializer runs, so the initializer
/// executes at most once successfully. A failed initializer leaves the guard
/// uninitialized and its error goes back to the caller that ran it.
pub struct Bootstrap<T> {
    cell: OnceCell<T>,
}

impl<T> Bootstrap<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Run `init` unless a value is already stored, and return the stored value.
    pub fn ensure<F, E>(&self, init: F) -> std::result::Result<&T, E>
    where
        F: FnOnce() -> std::result::Result<T, E>,
    {
        self.cell.get_or_try_init(init)
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn state(&self) -> BootstrapState {
        if self.is_initialized() {
            BootstrapState::Initialized
        } else {
            BootstrapState::Uninitialized
        }
    }
}

impl<T> Default for Bootstrap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Bootstrap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bootstrap")
            .field("state", &self.state())
            .finish()
    }
}

static ENVIRONMENT: Bootstrap<OdbEnv> = Bootstrap::new();

/// Build and initialize the process environment once.
///
/// Configuration and initialization errors propagate; the guard stays
/// uninitialized in that case and a later call tries again.
pub fn ensure_initialized() -> Result<&'static OdbEnv> {
    ENVIRONMENT.ensure(|| -> Result<OdbEnv> {
        debug!("Bootstrapping ODB environment");
        let mut env = OdbEnv::from_env()?;
        env.init()?;
        info!(version = crate::build::VERSION, "odx environment ready");
        Ok(env)
    })
}

/// `true` once [`ensure_initialized`] has succeeded in this process.
pub fn is_initialized() -> bool {
    ENVIRONMENT.is_initialized()
}

/// The initialized environment, if any.
pub fn environment() -> Option<&'static OdbEnv> {
    ENVIRONMENT.get()
}

pub fn state() -> BootstrapState {
    ENVIRONMENT.state()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    #[test]
    fn test_first_call_initializes() {
        let guard = Bootstrap::new();
        let calls = AtomicUsize::new(0);
        assert_eq!(guard.state(), BootstrapState::Uninitialized);

        let value = guard
            .ensure(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ()>(42)
            })
            .unwrap();

        assert_eq!(*value, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(guard.state(), BootstrapState::Initialized);
    }

    #[test]
    fn test_repeated_calls_run_once() {
        let guard = Bootstrap::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..10 {
            let value = guard
                .ensure(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>("env")
                })
                .unwrap();
            assert_eq!(*value, "env");
            assert!(guard.is_initialized());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_leaves_guard_uninitialized() {
        let guard: Bootstrap<u32> = Bootstrap::new();

        let err = guard.ensure(|| Err("init failed")).unwrap_err();
        assert_eq!(err, "init failed");
        assert_eq!(guard.state(), BootstrapState::Uninitialized);
        assert!(guard.get().is_none());

        assert_eq!(*guard.ensure(|| Ok::<_, &str>(7)).unwrap(), 7);
        assert_eq!(*guard.ensure(|| Ok::<_, &str>(8)).unwrap(), 7);
    }

    #[test]
    fn test_concurrent_callers_run_once() {
        const THREADS: usize = 16;
        let guard = Bootstrap::new();
        let calls = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);

        std::thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    barrier.wait();
                    let value = guard
                        .ensure(|| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(std::time::Duration::from_millis(10));
                            Ok::<_, ()>(calls.load(Ordering::SeqCst))
                        })
                        .unwrap();
                    assert_eq!(*value, 1);
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(BootstrapState::Uninitialized.to_string(), "uninitialized");
        assert_eq!(BootstrapState::Initialized.to_string(), "initialized");
        assert_eq!(
            format!("{:?}", Bootstrap::<u8>::new()),
            "Bootstrap { state: Uninitialized }"
        );
    }
}
