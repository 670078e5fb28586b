// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! Hot reload of the watched shader file.
//!
//! [`HotReload`] keeps the current program and the shader-local time
//! origin. Each [`HotReload::check`] stats the file once; a changed
//! timestamp triggers a rebuild through a [`ProgramFactory`]. The new
//! program replaces the old one only when the build succeeds.
//!
//! ```text
//!   NoProgram ──build ok──▶ Active ──build ok──▶ Active'   (origin reset)
//!       │                     │
//!   build err              build err
//!       ▼                     ▼
//!   NoProgram              Active                         (unchanged)
//! ```

use crate::error::ShaderError;
use log::{error, info, warn};
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
    time::{Instant, SystemTime},
};

/// Builds a program from fragment-shader text
pub trait ProgramFactory {
    type Program;

    fn build(&mut self, source: &str) -> Result<Self::Program, ShaderError>;
}

/// Result of one reload check
#[derive(Debug, Clone, PartialEq)]
pub enum ReloadOutcome {
    /// File could not be stat'ed or read, nothing changed
    Unavailable,
    Unchanged,
    Reloaded,
    /// Build failed, previous program (if any) still active
    Failed(ShaderError),
}

/// Last observed file state and the shader-local clock
#[derive(Debug, Clone, Default)]
struct ReloadState {
    last_modified: Option<SystemTime>,
    /// instant the current program became active
    origin: Option<Instant>,
}

pub struct HotReload<P> {
    path: PathBuf,
    state: ReloadState,
    current: Option<P>,
    reloads: u64,
}

impl<P> HotReload<P> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            state: ReloadState::default(),
            current: None,
            reloads: 0,
        }
    }

    /// Poll the file and rebuild if its modification time changed
    pub fn check<F>(&mut self, factory: &mut F, now: Instant) -> ReloadOutcome
    where
        F: ProgramFactory<Program = P>,
    {
        let Ok(modified) = fs::metadata(&self.path).and_then(|m| m.modified()) else {
            return ReloadOutcome::Unavailable;
        };
        if self.state.last_modified == Some(modified) {
            return ReloadOutcome::Unchanged;
        }
        let Ok(bytes) = fs::read(&self.path) else {
            return ReloadOutcome::Unavailable;
        };
        self.state.last_modified = Some(modified);

        // invalid UTF-8 is handed to the compiler as U+FFFD
        let source = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = source {
            warn!("shader {:?} is not valid UTF-8", self.path);
        }

        match factory.build(&source) {
            Ok(program) => {
                // old program is released only after the new one exists
                self.current = Some(program);
                self.state.origin = Some(now);
                self.reloads += 1;
                info!("loaded shader {:?} (build #{})", self.path, self.reloads);
                ReloadOutcome::Reloaded
            }
            Err(e) => {
                error!("loading shader {:?} failed!\n{}", self.path, e);
                ReloadOutcome::Failed(e)
            }
        }
    }

    pub fn current(&self) -> Option<&P> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Seconds since the current program became active, 0 if none
    pub fn elapsed(&self, now: Instant) -> f32 {
        self.state
            .origin
            .map(|origin| now.saturating_duration_since(origin).as_secs_f32())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting(u32);

    impl ProgramFactory for Counting {
        type Program = u32;

        fn build(&mut self, source: &str) -> Result<u32, ShaderError> {
            self.0 += 1;
            if source.contains("mainImage") {
                Ok(self.0)
            } else {
                Err(ShaderError::Link("no mainImage".to_string()))
            }
        }
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let mut reload: HotReload<u32> = HotReload::new("/nonexistent/shaderdude/none.glsl");
        let mut factory = Counting(0);
        assert_eq!(
            reload.check(&mut factory, Instant::now()),
            ReloadOutcome::Unavailable
        );
        assert_eq!(factory.0, 0);
        assert!(!reload.is_active());
        assert_eq!(reload.elapsed(Instant::now()), 0.0);
    }
}
