//! The generation pipeline and the last outputs it produced.
//!
//! One `generate` call validates the destination, renders and publishes the
//! QR preview, then waits for copy and composes the design block. Starting a
//! new call cancels the copy request of the previous one, and a result whose
//! generation is no longer current is never stored.

use std::sync::Arc;

use copy_client::{CopyRequest, CopyService};
use design_block::{ComposedDesign, DesignError, Fonts, Purpose, compose_design_block, encode_png};
use image::DynamicImage;
use qr_engine::{BrandColorPair, Destination, QrError, QrRequest, QrStyle, QrSymbol, decode_logo, render_request};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Inputs of one generation.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Raw destination as typed; normalized before use.
    pub destination: String,
    pub purpose: Option<Purpose>,
    pub instruction: Option<String>,
    pub colors: BrandColorPair,
    pub style: QrStyle,
    /// Encoded logo upload (PNG or JPEG).
    pub logo: Option<Vec<u8>>,
}

impl GenerateRequest {
    pub fn new(destination: impl Into<String>, colors: BrandColorPair) -> Self {
        Self {
            destination: destination.into(),
            purpose: None,
            instruction: None,
            colors,
            style: QrStyle::default(),
            logo: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{0}")]
    Validation(QrError),

    #[error("QR render failed: {0}")]
    Render(QrError),

    #[error("Generation {generation} was superseded by a newer request")]
    Superseded { generation: u64 },

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// The QR surface shown before copy arrives.
#[derive(Debug, Clone)]
pub struct QrPreview {
    pub generation: u64,
    pub destination: Destination,
    pub symbol: QrSymbol,
    pub colors: BrandColorPair,
    pub style: QrStyle,
}

impl QrPreview {
    /// The bare QR raster as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, DesignError> {
        encode_png(&self.symbol.raster)
    }
}

/// Shared generation state. Cheap to clone.
pub struct Session<S> {
    inner: Arc<SessionInner<S>>,
}

impl<S> Clone for Session<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct SessionInner<S> {
    copy: S,
    fonts: Fonts,
    state: Mutex<SessionState>,
}

#[derive(Default)]
struct SessionState {
    generation: u64,
    cancel: Option<CancellationToken>,
    preview: Option<Arc<QrPreview>>,
    design: Option<Arc<ComposedDesign>>,
}

impl<S: CopyService> Session<S> {
    pub fn new(copy: S, fonts: Fonts) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                copy,
                fonts,
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    /// Id of the most recently started generation (0 before the first).
    pub async fn current_generation(&self) -> u64 {
        self.inner.state.lock().await.generation
    }

    /// Latest published QR preview.
    pub async fn preview(&self) -> Option<Arc<QrPreview>> {
        self.inner.state.lock().await.preview.clone()
    }

    /// Latest composed design block.
    pub async fn design(&self) -> Option<Arc<ComposedDesign>> {
        self.inner.state.lock().await.design.clone()
    }

    /// Run one generation end to end.
    ///
    /// Validation errors return before any surface is rendered and leave the
    /// in-flight generation untouched. Logo decode failures only drop the
    /// logo. Copy failures are absorbed by the copy service.
    pub async fn generate(&self, request: GenerateRequest) -> Result<Arc<ComposedDesign>, GenerateError> {
        let destination = Destination::normalize(&request.destination).map_err(GenerateError::Validation)?;
        let (generation, token) = self.begin().await;

        let logo = match request.logo {
            Some(bytes) => decode_logo_off_thread(bytes).await,
            None => None,
        };
        if token.is_cancelled() {
            return Err(GenerateError::Superseded { generation });
        }

        let qr_request = QrRequest::new(destination.clone(), request.colors, request.style, logo.is_some());
        let symbol = tokio::task::spawn_blocking(move || render_request(&qr_request, logo.as_ref()))
            .await?
            .map_err(GenerateError::Render)?;
        let preview = Arc::new(QrPreview {
            generation,
            destination,
            symbol,
            colors: request.colors,
            style: request.style,
        });
        self.publish(generation, |state| state.preview = Some(Arc::clone(&preview)))
            .await?;
        info!(
            generation,
            destination = %preview.destination,
            level = preview.symbol.error_correction.as_str(),
            "QR preview ready"
        );

        let copy_request = CopyRequest {
            purpose: request.purpose,
            destination: preview.destination.as_str().to_string(),
            instruction: request.instruction.filter(|i| !i.trim().is_empty()),
        };
        let copy = tokio::select! {
            copy = self.inner.copy.generate(&copy_request) => copy,
            _ = token.cancelled() => {
                warn!(generation, "Copy request superseded");
                return Err(GenerateError::Superseded { generation });
            }
        };

        let fonts = self.inner.fonts.clone();
        let source = Arc::clone(&preview);
        let design = tokio::task::spawn_blocking(move || {
            compose_design_block(&copy, &source.symbol, &source.colors, source.style, &fonts)
        })
        .await
        .map(Arc::new)?;
        self.publish(generation, |state| state.design = Some(Arc::clone(&design)))
            .await?;
        info!(generation, title = %design.copy().title, "Design block ready");
        Ok(design)
    }

    /// Take a new generation id and cancel the previous one.
    async fn begin(&self) -> (u64, CancellationToken) {
        let mut state = self.inner.state.lock().await;
        state.generation += 1;
        let token = CancellationToken::new();
        if let Some(previous) = state.cancel.replace(token.clone()) {
            previous.cancel();
        }
        debug!(generation = state.generation, "Generation started");
        (state.generation, token)
    }

    /// Apply `update` only if `generation` is still current.
    async fn publish(
        &self,
        generation: u64,
        update: impl FnOnce(&mut SessionState),
    ) -> Result<(), GenerateError> {
        let mut state = self.inner.state.lock().await;
        if state.generation != generation {
            warn!(generation, current = state.generation, "Discarding stale result");
            return Err(GenerateError::Superseded { generation });
        }
        update(&mut state);
        Ok(())
    }
}

async fn decode_logo_off_thread(bytes: Vec<u8>) -> Option<DynamicImage> {
    match tokio::task::spawn_blocking(move || decode_logo(&bytes)).await {
        Ok(Ok(img)) => Some(img),
        Ok(Err(e)) => {
            warn!(error = %e, "Logo decode failed, continuing without logo");
            None
        }
        Err(e) => {
            warn!(error = %e, "Logo decode task failed, continuing without logo");
            None
        }
    }
}
