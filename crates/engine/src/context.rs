//! Engine contexts.

use crate::backends::filesystem::FilesystemEngine;
use crate::error::{EngineError, EngineResult};
use crate::traits::StorageEngine;
use lattice_core::EngineConfig;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

static GLOBAL_CONTEXT: OnceLock<Context> = OnceLock::new();

/// A handle bundling engine configuration, the engine instance, and the
/// most recent error recorded by engine calls made through it.
///
/// Contexts are cheap to clone and may be shared across arrays. The
/// last-error slot is the only interior state; callers sharing one context
/// across concurrent tasks share a single slot and get whatever ordering
/// the engine's own guarantees provide.
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    engine: Arc<dyn StorageEngine>,
    config: EngineConfig,
    last_error: Mutex<Option<String>>,
}

impl Context {
    /// Create a context over the default filesystem engine.
    ///
    /// The configuration is validated and stored; applying it to the
    /// engine is not wired up yet.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate().map_err(EngineError::Engine)?;
        Ok(Self::with_engine(Arc::new(FilesystemEngine::new()), config))
    }

    /// Create a context over an explicit engine instance.
    pub fn with_engine(engine: Arc<dyn StorageEngine>, config: EngineConfig) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                engine,
                config,
                last_error: Mutex::new(None),
            }),
        }
    }

    /// The process-wide default context.
    ///
    /// Created on first use with the default configuration and alive until
    /// process exit. Prefer passing an explicit context; this exists for
    /// ergonomic defaulting.
    pub fn global() -> &'static Context {
        GLOBAL_CONTEXT.get_or_init(|| {
            Self::with_engine(Arc::new(FilesystemEngine::new()), EngineConfig::default())
        })
    }

    /// The engine behind this context.
    pub fn engine(&self) -> &Arc<dyn StorageEngine> {
        &self.inner.engine
    }

    /// The configuration this context was created with.
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Message of the most recent error recorded on this context, or `None`
    /// if no error has been recorded.
    ///
    /// Retrieval itself can fail; that failure surfaces as the
    /// [`EngineError::ErrorReporting`] meta-error.
    pub fn last_error(&self) -> EngineResult<Option<String>> {
        match self.inner.last_error.lock() {
            Ok(slot) => Ok(slot.clone()),
            Err(_) => Err(EngineError::ErrorReporting(
                "last-error slot poisoned".to_string(),
            )),
        }
    }

    /// Record an error message on this context. Engine backends call this
    /// before returning a failed status.
    pub fn record_error(&self, message: impl Into<String>) {
        if let Ok(mut slot) = self.inner.last_error.lock() {
            *slot = Some(message.into());
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("engine", &self.inner.engine.engine_name())
            .field("config", &self.inner.config)
            .finish()
    }
}
