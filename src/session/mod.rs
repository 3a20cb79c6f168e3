//! The digit pad session.
//!
//! A [`Session`] owns the drawing surface, the active stroke, the classifier
//! (once loaded) and the last predicted label. It is driven by a single thread;
//! the only concurrent activity is the one-shot [`ModelLoader`].
//!
//! # Lifecycle
//!
//! The model starts out [`ModelState::Loading`]. Delivering a loaded classifier
//! moves it to [`ModelState::Ready`] for the rest of the session; a failed load
//! moves it to [`ModelState::Failed`]. Predictions are rejected with
//! [`DigitError::NotReady`] until the model is ready.

pub mod loader;

pub use loader::ModelLoader;

use crate::canvas::{StrokeCapture, Surface};
use crate::core::config::DigitPadConfig;
use crate::core::{DigitError, DigitResult, UNSET_LABEL_TEXT};
use crate::domain::{InputEvent, Prediction, SurfaceRect};
use crate::models::Classifier;
use crate::processors::{NormalizedInput, SurfaceNormalizer, Topk};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Availability of the classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    Loading,
    Ready,
    /// The load failed; the session cannot predict.
    Failed(String),
}

/// Whether a prediction is being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictPhase {
    Idle,
    Predicting,
}

/// Whether the surface holds any strokes since the last clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingState {
    Empty,
    HasDrawing,
}

/// A drawing pad bound to a digit classifier.
#[derive(Debug)]
pub struct Session<C> {
    surface: Surface,
    capture: StrokeCapture,
    normalizer: SurfaceNormalizer,
    topk: Topk,
    k: usize,
    labels: Vec<String>,
    model_path: PathBuf,
    classifier: Option<C>,
    load_error: Option<Arc<DigitError>>,
    loader: Option<ModelLoader<C>>,
    model_state: ModelState,
    predict_phase: PredictPhase,
    drawing_state: DrawingState,
    predicted_label: Option<usize>,
}

impl<C: Classifier> Session<C> {
    /// Creates a session whose model is still loading.
    ///
    /// The classifier is delivered later through [`Session::model_loaded`].
    pub fn new(config: &DigitPadConfig) -> DigitResult<Self> {
        Ok(Self {
            surface: Surface::from_config(&config.surface),
            capture: StrokeCapture::new(config.stroke.clone()),
            normalizer: SurfaceNormalizer::new(&config.normalizer)?,
            topk: Topk::from_class_names(config.model.labels.clone()),
            k: config.topk(),
            labels: config.model.labels.clone(),
            model_path: config.model.model_path.clone(),
            classifier: None,
            load_error: None,
            loader: None,
            model_state: ModelState::Loading,
            predict_phase: PredictPhase::Idle,
            drawing_state: DrawingState::Empty,
            predicted_label: None,
        })
    }

    /// Creates a session that receives its classifier from `loader`.
    pub fn with_loader(config: &DigitPadConfig, loader: ModelLoader<C>) -> DigitResult<Self> {
        let mut session = Self::new(config)?;
        session.loader = Some(loader);
        Ok(session)
    }

    /// Creates a session with an already loaded classifier.
    pub fn with_classifier(config: &DigitPadConfig, classifier: C) -> DigitResult<Self> {
        let mut session = Self::new(config)?;
        session.model_loaded(Ok(classifier));
        Ok(session)
    }

    /// Delivers the outcome of the model load.
    ///
    /// Only the first delivery counts; once the model is ready, later
    /// deliveries are dropped.
    pub fn model_loaded(&mut self, result: DigitResult<C>) {
        if self.model_state != ModelState::Loading {
            warn!(state = ?self.model_state, "ignoring repeated model delivery");
            return;
        }
        match result {
            Ok(classifier) => {
                let model_info = classifier.info();
                if model_info.labels.len() != self.labels.len() {
                    warn!(
                        model = %model_info.model_name,
                        model_labels = model_info.labels.len(),
                        session_labels = self.labels.len(),
                        "classifier label count differs from configuration"
                    );
                }
                info!(model = %model_info.model_name, "model ready");
                self.classifier = Some(classifier);
                self.model_state = ModelState::Ready;
            }
            Err(err) => {
                warn!(error = %err, "model load failed");
                self.model_state = ModelState::Failed(err.to_string());
                self.load_error = Some(Arc::new(err));
            }
        }
    }

    /// Collects the loader result if it is available. Returns the model state.
    pub fn poll_model(&mut self) -> &ModelState {
        if let Some(result) = self.loader.as_mut().and_then(ModelLoader::try_take) {
            self.loader = None;
            self.model_loaded(result);
        }
        &self.model_state
    }

    /// Blocks until the loader delivers. Returns the model state.
    pub fn wait_for_model(&mut self) -> &ModelState {
        if let Some(result) = self.loader.take().and_then(|mut loader| loader.wait()) {
            self.model_loaded(result);
        }
        &self.model_state
    }

    /// Classifies the current surface and records the predicted label.
    ///
    /// # Errors
    ///
    /// * [`DigitError::NotReady`] while the model is loading. The label is left
    ///   untouched.
    /// * [`DigitError::ModelLoad`] if the model failed to load.
    /// * Any normalization or inference error.
    pub fn predict(&mut self) -> DigitResult<Prediction> {
        self.poll_model();
        let classifier = match (&self.model_state, self.classifier.as_ref()) {
            (ModelState::Ready, Some(classifier)) => classifier,
            (ModelState::Failed(_), _) => {
                warn!("predict requested but the model failed to load");
                return Err(self.load_failure());
            }
            _ => {
                warn!("predict requested while the model is still loading");
                return Err(DigitError::NotReady);
            }
        };

        self.predict_phase = PredictPhase::Predicting;
        let outcome = Self::run_prediction(
            classifier,
            &self.normalizer,
            &self.surface,
            &self.topk,
            self.k,
        );
        self.predict_phase = PredictPhase::Idle;

        let prediction = outcome?;
        self.predicted_label = Some(prediction.label);
        debug!(label = prediction.label, score = prediction.score, "prediction");
        Ok(prediction)
    }

    fn run_prediction(
        classifier: &C,
        normalizer: &SurfaceNormalizer,
        surface: &Surface,
        topk: &Topk,
        k: usize,
    ) -> DigitResult<Prediction> {
        let input = normalizer.normalize(surface)?;
        let distribution = classifier.classify(&input)?;
        let label = distribution.argmax();

        let ranking = topk.rank(distribution.scores(), k)?;

        Ok(Prediction {
            label,
            label_name: topk.label_for(label),
            score: distribution.score(label).unwrap_or_default(),
            ranking,
        })
    }

    /// The error reported by `predict` after a failed load.
    ///
    /// A `ModelLoad` failure is reported with its original path, reason and
    /// suggestion; anything else is reported against the configured model path.
    /// The original error stays reachable as the source.
    fn load_failure(&self) -> DigitError {
        let Some(cause) = self.load_error.as_ref() else {
            return DigitError::model_load_error(
                &self.model_path,
                "model failed to load",
                None,
                None::<std::io::Error>,
            );
        };
        match cause.as_ref() {
            DigitError::ModelLoad {
                model_path,
                reason,
                suggestion,
                ..
            } => DigitError::ModelLoad {
                model_path: model_path.clone(),
                reason: reason.clone(),
                suggestion: suggestion.clone(),
                source: Some(Box::new(Arc::clone(cause)) as _),
            },
            other => DigitError::model_load_error(
                &self.model_path,
                other.to_string(),
                None,
                Some(Arc::clone(cause)),
            ),
        }
    }

    /// Resets the surface to the background fill and unsets the label.
    ///
    /// Idempotent; any in-progress stroke is dropped.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.capture.discard();
        self.predicted_label = None;
        self.drawing_state = DrawingState::Empty;
        debug!("surface cleared");
    }

    /// Feeds one input event to the stroke capture.
    ///
    /// Returns whether the surface changed.
    pub fn handle_input(&mut self, event: &InputEvent, rect: &SurfaceRect) -> bool {
        let drew = self.capture.handle(&mut self.surface, event, rect);
        if drew {
            self.drawing_state = DrawingState::HasDrawing;
        }
        drew
    }

    /// The predicted label, or `"N/A"` when there is none.
    pub fn label_text(&self) -> String {
        match self.predicted_label {
            Some(index) => self.topk.label_for(index),
            None => UNSET_LABEL_TEXT.to_string(),
        }
    }

    /// Normalizes the current surface without classifying it.
    pub fn normalized_input(&self) -> DigitResult<NormalizedInput> {
        self.normalizer.normalize(&self.surface)
    }

    pub fn predicted_label(&self) -> Option<usize> {
        self.predicted_label
    }

    pub fn model_state(&self) -> &ModelState {
        &self.model_state
    }

    pub fn is_ready(&self) -> bool {
        self.model_state == ModelState::Ready
    }

    pub fn predict_phase(&self) -> PredictPhase {
        self.predict_phase
    }

    pub fn drawing_state(&self) -> DrawingState {
        self.drawing_state
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn capture(&self) -> &StrokeCapture {
        &self.capture
    }

    pub fn normalizer(&self) -> &SurfaceNormalizer {
        &self.normalizer
    }

    pub fn classifier(&self) -> Option<&C> {
        self.classifier.as_ref()
    }
}
