//! Owning controller: applies edits, tracks what is stale, renders.
//!
//! Configurations are immutable values; every edit replaces the held value
//! and bumps a revision counter. Rasters carry the revision they started
//! from and only replace a stored raster that is not newer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use buttonsmith_spec::{
    persist, restore_button, restore_nine_patch, ButtonChanges, ButtonConfig, ButtonEdit,
    InteractionState, NinePatchConfig, NinePatchEdit, NoiseRefresh, PerState, RestoreReport,
    SnapshotStore, StoreError, BUTTON_KEY, NINE_PATCH_KEY,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::bitmap::Bitmap;
use crate::button::render_button;
use crate::noise::NoiseLayer;
use crate::patch::{render_nine_patch, NinePatchRaster};
use crate::png::PngError;
use crate::rng::NoiseRng;
use crate::source::load_source;
use crate::text::FontLoader;
use crate::tokens::{button_tokens, StyleTokens};

/// Export failures. The controller state is left untouched.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no raster rendered yet for state '{0}'")]
    NotRendered(InteractionState),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] PngError),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Owner of the button and nine-patch configurations and their outputs.
pub struct Controller {
    button: ButtonConfig,
    nine_patch: NinePatchConfig,
    base_dir: Option<PathBuf>,
    sources: PerState<Option<Arc<Bitmap>>>,
    noise: NoiseLayer,
    rng: NoiseRng,
    fonts: FontLoader,
    revision: u64,
    rasters: PerState<Option<NinePatchRaster>>,
}

impl Controller {
    pub fn new(
        button: ButtonConfig,
        nine_patch: NinePatchConfig,
        fonts: FontLoader,
        rng: NoiseRng,
    ) -> Self {
        Self::with_base_dir(button, nine_patch, None, fonts, rng)
    }

    /// Like [`Controller::new`], resolving relative source paths against
    /// `base_dir`.
    pub fn with_base_dir(
        button: ButtonConfig,
        nine_patch: NinePatchConfig,
        base_dir: Option<PathBuf>,
        fonts: FontLoader,
        rng: NoiseRng,
    ) -> Self {
        let mut controller = Self {
            button,
            nine_patch,
            base_dir,
            sources: PerState::default(),
            noise: NoiseLayer::new(),
            rng,
            fonts,
            revision: 0,
            rasters: PerState::default(),
        };
        controller.reload_sources();
        controller
            .noise
            .update(&controller.button.noise, false, &mut controller.rng);
        controller
    }

    /// Build a controller from persisted snapshots, falling back per field.
    pub fn restore(
        store: &dyn SnapshotStore,
        base_dir: Option<PathBuf>,
        fonts: FontLoader,
        rng: NoiseRng,
    ) -> (Self, RestoreReport) {
        let (button, mut report) = restore_button(store);
        let (nine_patch, nine_patch_report) = restore_nine_patch(store);
        report.discarded.extend(nine_patch_report.discarded);
        (
            Self::with_base_dir(button, nine_patch, base_dir, fonts, rng),
            report,
        )
    }

    /// Resolve relative source paths against `dir` and reload sources.
    pub fn set_base_dir(&mut self, dir: impl Into<PathBuf>) {
        self.base_dir = Some(dir.into());
        self.reload_sources();
    }

    pub fn button(&self) -> &ButtonConfig {
        &self.button
    }

    pub fn nine_patch(&self) -> &NinePatchConfig {
        &self.nine_patch
    }

    pub fn noise(&self) -> &NoiseLayer {
        &self.noise
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Decoded source of a state, if it loaded.
    pub fn source(&self, state: InteractionState) -> Option<&Bitmap> {
        self.sources.get(state).as_deref()
    }

    fn reload_sources(&mut self) {
        for state in InteractionState::ALL {
            self.reload_source(state);
        }
    }

    fn reload_source(&mut self, state: InteractionState) {
        let reference = self.nine_patch.states.get(state).source_image.as_deref();
        let loaded = reference.and_then(|reference| {
            match load_source(reference, self.base_dir.as_deref()) {
                Ok(bitmap) => Some(Arc::new(bitmap)),
                Err(e) => {
                    warn!(%state, error = %e, "source image unavailable");
                    None
                }
            }
        });
        *self.sources.get_mut(state) = loaded;
    }

    /// Apply a button edit and refresh the noise layer as needed.
    pub fn apply_button(&mut self, edit: &ButtonEdit) -> ButtonChanges {
        let (next, changes) = self.button.with_edit(edit);
        self.button = next;

        match changes.noise {
            NoiseRefresh::Keep => {}
            NoiseRefresh::Restyle => {
                self.noise.update(&self.button.noise, false, &mut self.rng);
            }
            NoiseRefresh::Regenerate => {
                self.noise.update(&self.button.noise, true, &mut self.rng);
            }
        }
        if changes.tokens || changes.noise != NoiseRefresh::Keep {
            self.revision += 1;
        }
        debug!(?edit, ?changes, revision = self.revision, "button edit applied");
        changes
    }

    /// Apply a nine-patch edit, returning the states whose raster is stale.
    pub fn apply_nine_patch(&mut self, edit: &NinePatchEdit) -> PerState<bool> {
        let (next, dirty) = self.nine_patch.with_edit(edit);
        self.nine_patch = next;

        if let NinePatchEdit::SourceImage(state, _) = edit {
            if *dirty.get(*state) {
                self.reload_source(*state);
            }
        }
        if dirty.iter().any(|(_, d)| *d) {
            self.revision += 1;
        }
        debug!(?edit, ?dirty, revision = self.revision, "nine-patch edit applied");
        dirty
    }

    /// Style tokens for the current button configuration.
    pub fn tokens(&self) -> StyleTokens {
        button_tokens(&self.button, &self.noise)
    }

    /// Render one nine-patch state and store the result.
    pub async fn render_state(&mut self, state: InteractionState) -> Option<&NinePatchRaster> {
        let revision = self.revision;
        let source = self.sources.get(state).clone();
        let raster = render_nine_patch(
            &mut self.fonts,
            &self.nine_patch.label,
            self.nine_patch.states.get(state),
            state,
            source.as_deref(),
            revision,
        )
        .await;
        self.accept(raster);
        self.rasters.get(state).as_ref()
    }

    /// Re-render every state flagged in `dirty`. Returns how many ran.
    pub async fn render_dirty(&mut self, dirty: PerState<bool>) -> usize {
        let mut rendered = 0;
        for state in InteractionState::ALL {
            if *dirty.get(state) {
                self.render_state(state).await;
                rendered += 1;
            }
        }
        rendered
    }

    pub async fn render_all(&mut self) {
        self.render_dirty(PerState::new(true, true, true)).await;
    }

    /// Store `raster` unless a newer one is already held for its state.
    pub fn accept(&mut self, raster: NinePatchRaster) -> bool {
        let slot = self.rasters.get_mut(raster.state);
        if let Some(current) = slot.as_ref() {
            if current.revision > raster.revision {
                debug!(
                    state = %raster.state,
                    stale = raster.revision,
                    current = current.revision,
                    "dropping stale raster"
                );
                return false;
            }
        }
        *slot = Some(raster);
        true
    }

    pub fn raster(&self, state: InteractionState) -> Option<&NinePatchRaster> {
        self.rasters.get(state).as_ref()
    }

    /// Rasterize the gradient button for `state`.
    pub async fn render_button(&mut self, state: InteractionState) -> Bitmap {
        let readiness = self.fonts.ready(&self.button.label.font_family).await;
        tokio::task::yield_now().await;
        render_button(&self.button, state, &self.noise, readiness.face())
    }

    /// PNG bytes of the stored raster for `state`.
    pub fn export_png(&self, state: InteractionState) -> Result<Vec<u8>, ExportError> {
        let raster = self
            .raster(state)
            .ok_or(ExportError::NotRendered(state))?;
        Ok(raster.to_png()?)
    }

    /// Write the stored raster for `state` into `dir`. Returns the file path.
    pub fn export_to_dir(&self, state: InteractionState, dir: &Path) -> Result<PathBuf, ExportError> {
        let raster = self
            .raster(state)
            .ok_or(ExportError::NotRendered(state))?;
        let bytes = raster.to_png()?;
        let path = dir.join(raster.file_name(&self.nine_patch.label));
        std::fs::write(&path, bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(%state, path = %path.display(), "nine-patch exported");
        Ok(path)
    }

    /// Persist both configurations.
    pub fn persist(&self, store: &dyn SnapshotStore) -> Result<(), StoreError> {
        persist(store, BUTTON_KEY, &self.button)?;
        persist(store, NINE_PATCH_KEY, &self.nine_patch)
    }
}
