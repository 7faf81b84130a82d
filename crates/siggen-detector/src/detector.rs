//! A detector with a lazily solved, shared field grid.
//!
//! The grid is solved on first use and cached as an `Arc<FieldGrid>`.
//! Readers clone the `Arc` under a read lock and keep using their grid
//! even if a later update replaces it. Updates take the write lock, swap
//! in a validated configuration, drop the cached grid when a field-scope
//! parameter changed, and bump the [`ParameterVersion`].

use std::ops::ControlFlow;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use siggen_core::{DetectorInstanceId, ParameterVersion};
use siggen_field::{FieldGrid, SolveProgress};

use crate::config::{DetectorConfig, ParameterUpdate};
use crate::error::DetectorError;

struct DetectorState {
    config: DetectorConfig,
    grid: Option<Arc<FieldGrid>>,
    version: ParameterVersion,
}

/// A consistent snapshot of a detector: configuration, solved grid and
/// the parameter version they belong to.
#[derive(Clone, Debug)]
pub struct DetectorView {
    /// The detector this view was taken from.
    pub id: DetectorInstanceId,
    /// Configuration at the time of the view.
    pub config: DetectorConfig,
    /// Field grid for `config`. Its own version is the one it was solved
    /// for, which predates `version` after signal-only updates.
    pub grid: Arc<FieldGrid>,
    /// Parameter version of `config`.
    pub version: ParameterVersion,
}

/// A point-contact detector.
///
/// `Detector` is `Send + Sync`; share it by reference or `Arc` between
/// threads.
pub struct Detector {
    id: DetectorInstanceId,
    state: RwLock<DetectorState>,
}

impl Detector {
    /// Validate `config` and create a detector. The field is not solved yet.
    pub fn new(config: DetectorConfig) -> Result<Self, DetectorError> {
        config.validate()?;
        let id = DetectorInstanceId::next();
        tracing::debug!(%id, "detector created");
        Ok(Self {
            id,
            state: RwLock::new(DetectorState {
                config,
                grid: None,
                version: ParameterVersion::default(),
            }),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, DetectorState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DetectorState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// This detector's instance ID.
    pub fn id(&self) -> DetectorInstanceId {
        self.id
    }

    /// A copy of the current configuration.
    pub fn config(&self) -> DetectorConfig {
        self.read().config.clone()
    }

    /// The current parameter version.
    pub fn version(&self) -> ParameterVersion {
        self.read().version
    }

    /// Returns `true` if a solved grid is cached for the current parameters.
    pub fn is_solved(&self) -> bool {
        self.read().grid.is_some()
    }

    /// The field grid for the current parameters, solving it if needed.
    pub fn field_grid(&self) -> Result<Arc<FieldGrid>, DetectorError> {
        Ok(self.view()?.grid)
    }

    /// The current configuration together with its solved grid.
    pub fn view(&self) -> Result<DetectorView, DetectorError> {
        self.view_with_progress(|_| ControlFlow::Continue(()))
    }

    /// Like [`view`](Self::view), reporting solve progress to `hook` if a
    /// solve is needed. A cancelled solve caches nothing.
    pub fn view_with_progress<F>(&self, hook: F) -> Result<DetectorView, DetectorError>
    where
        F: FnMut(&SolveProgress) -> ControlFlow<()>,
    {
        {
            let state = self.read();
            if let Some(grid) = &state.grid {
                return Ok(self.snapshot(&state, Arc::clone(grid)));
            }
        }

        let mut state = self.write();
        if let Some(grid) = &state.grid {
            return Ok(self.snapshot(&state, Arc::clone(grid)));
        }
        tracing::debug!(id = %self.id, version = %state.version, "solving field grid");
        let grid = Arc::new(
            state
                .config
                .field
                .solve_with_progress(hook)?
                .with_version(state.version),
        );
        state.grid = Some(Arc::clone(&grid));
        Ok(self.snapshot(&state, grid))
    }

    fn snapshot(&self, state: &DetectorState, grid: Arc<FieldGrid>) -> DetectorView {
        DetectorView {
            id: self.id,
            config: state.config.clone(),
            grid,
            version: state.version,
        }
    }

    /// Apply `update` atomically.
    ///
    /// An invalid update leaves the detector unchanged. A successful one
    /// bumps the parameter version; the cached grid is dropped only if a
    /// field-scope parameter changed value.
    pub fn update_parameters(
        &self,
        update: &ParameterUpdate,
    ) -> Result<ParameterVersion, DetectorError> {
        let mut state = self.write();
        let (config, field_changed) = update.apply(&state.config)?;
        state.config = config;
        state.version = state.version.bumped();
        if field_changed {
            state.grid = None;
        }
        tracing::debug!(
            id = %self.id,
            version = %state.version,
            field_changed,
            "detector parameters updated"
        );
        Ok(state.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siggen_field::SolverSettings;

    fn coarse() -> DetectorConfig {
        let mut c = DetectorConfig::default();
        c.field.solver = SolverSettings::default().with_grid_spacing(1.0);
        c
    }

    #[test]
    fn detector_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Detector>();
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut c = coarse();
        c.field.geometry.radius = -1.0;
        match Detector::new(c) {
            Err(DetectorError::InvalidGeometry(e)) => assert_eq!(e.parameter, "xtal_radius"),
            other => panic!("expected InvalidGeometry, got {:?}", other.map(|d| d.id())),
        }
    }

    #[test]
    fn grid_is_cached() {
        let d = Detector::new(coarse()).unwrap();
        assert!(!d.is_solved());
        let a = d.field_grid().unwrap();
        let b = d.field_grid().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(d.is_solved());
    }

    #[test]
    fn cancelled_solve_caches_nothing() {
        let mut c = coarse();
        c.field.solver.progress_interval = 1;
        let d = Detector::new(c).unwrap();
        let err = d.view_with_progress(|_| ControlFlow::Break(())).unwrap_err();
        assert!(matches!(err, DetectorError::Field(_)));
        assert!(!d.is_solved());
    }
}
