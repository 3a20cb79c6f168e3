//! One-shot background model loading.

use crate::core::{DigitError, DigitResult};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tracing::{debug, warn};

/// Loads a classifier on a named background thread.
///
/// The load function runs exactly once; its result is delivered exactly once
/// through [`ModelLoader::try_take`] or [`ModelLoader::wait`].
#[derive(Debug)]
pub struct ModelLoader<C> {
    name: String,
    receiver: Option<Receiver<DigitResult<C>>>,
}

impl<C: Send + 'static> ModelLoader<C> {
    /// Starts loading on a new thread called `name`.
    pub fn spawn<F>(name: impl Into<String>, load: F) -> DigitResult<Self>
    where
        F: FnOnce() -> DigitResult<C> + Send + 'static,
    {
        let name = name.into();
        let (sender, receiver) = mpsc::channel();
        let thread_name = name.clone();
        thread::Builder::new()
            .name(format!("load-{}", name))
            .spawn(move || {
                debug!(loader = %thread_name, "model load started");
                if sender.send(load()).is_err() {
                    debug!(loader = %thread_name, "model loader dropped before delivery");
                }
            })?;
        Ok(Self {
            name,
            receiver: Some(receiver),
        })
    }
}

impl<C> ModelLoader<C> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true once the result has been taken.
    pub fn is_finished(&self) -> bool {
        self.receiver.is_none()
    }

    /// Takes the result if the load has completed, without blocking.
    pub fn try_take(&mut self) -> Option<DigitResult<C>> {
        let receiver = self.receiver.as_ref()?;
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(self.vanished()),
        };
        self.receiver = None;
        Some(result)
    }

    /// Blocks until the load completes and takes the result.
    ///
    /// Returns `None` if the result was already taken.
    pub fn wait(&mut self) -> Option<DigitResult<C>> {
        let receiver = self.receiver.take()?;
        Some(receiver.recv().unwrap_or_else(|_| Err(self.vanished())))
    }

    fn vanished(&self) -> DigitError {
        warn!(loader = %self.name, "model loader exited without a result");
        DigitError::model_load_error(
            &self.name,
            "loader thread exited without delivering a model",
            None,
            None::<std::io::Error>,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_wait_delivers_result_once() {
        let mut loader = ModelLoader::spawn("answer", || Ok(42u32)).unwrap();
        assert_eq!(loader.wait().unwrap().unwrap(), 42);
        assert!(loader.is_finished());
        assert!(loader.wait().is_none());
        assert!(loader.try_take().is_none());
    }

    #[test]
    fn test_try_take_is_non_blocking() {
        let (release, gate) = mpsc::channel::<()>();
        let mut loader = ModelLoader::spawn("gated", move || {
            gate.recv().ok();
            Ok("ready")
        })
        .unwrap();
        assert!(loader.try_take().is_none());
        release.send(()).unwrap();

        let mut taken = None;
        for _ in 0..200 {
            if let Some(result) = loader.try_take() {
                taken = Some(result);
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(taken.unwrap().unwrap(), "ready");
    }

    #[test]
    fn test_load_error_is_delivered() {
        let mut loader: ModelLoader<u8> = ModelLoader::spawn("broken", || {
            Err(DigitError::model_load_error(
                "broken.onnx",
                "model file not found",
                None,
                None::<std::io::Error>,
            ))
        })
        .unwrap();
        assert!(matches!(
            loader.wait(),
            Some(Err(DigitError::ModelLoad { .. }))
        ));
    }

    #[test]
    fn test_panicking_loader_reports_model_load() {
        let mut loader: ModelLoader<u8> =
            ModelLoader::spawn("panics", || panic!("loader blew up")).unwrap();
        match loader.wait() {
            Some(Err(DigitError::ModelLoad { reason, .. })) => {
                assert!(reason.contains("without delivering"))
            }
            other => panic!("unexpected loader result: {:?}", other.map(|r| r.is_ok())),
        }
    }
}
