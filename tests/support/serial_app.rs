//! A Bevy `App` shared by rspec scenarios, and the serial runner they need.
//!
//! rspec clones its environment into every block and demands
//! `Clone + Send + Sync`, which `App` is not. [`SharedApp`] hands out one
//! mutex-guarded app to all clones; [`run_serial`] keeps every scenario on
//! the test thread.

use std::fmt;
use std::io;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::prelude::App;
use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};

/// The app itself, only ever reached through [`SharedApp::lock`].
pub struct AppCell(App);

impl Deref for AppCell {
    type Target = App;

    fn deref(&self) -> &App {
        &self.0
    }
}

impl DerefMut for AppCell {
    fn deref_mut(&mut self) -> &mut App {
        &mut self.0
    }
}

// SAFETY: `AppCell` lives only inside the mutex of a `SharedApp`, and suites
// are executed by `run_serial` with parallelism off, so no two threads ever
// hold the app.
unsafe impl Send for AppCell {}
unsafe impl Sync for AppCell {}

/// Cloneable handle to one app.
#[derive(Clone)]
pub struct SharedApp(Arc<Mutex<AppCell>>);

impl SharedApp {
    pub fn new(app: App) -> Self {
        Self(Arc::new(Mutex::new(AppCell(app))))
    }

    /// Locks the app. A scenario that panicked while holding it leaves the
    /// app usable for the rest of the suite.
    pub fn lock(&self) -> MutexGuard<'_, AppCell> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SharedApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedApp")
    }
}

/// Runs `suite` on the calling thread, failing the test on the first
/// failed expectation.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + fmt::Debug,
{
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
        .unwrap_or_else(|e| panic!("invalid rspec configuration: {e}"));
    let report = Arc::new(Logger::new(io::stdout()));
    Runner::new(config, vec![report]).run(suite);
}
