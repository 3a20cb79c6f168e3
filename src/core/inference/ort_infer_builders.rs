use super::*;
use ort::logging::LogLevel;
use std::path::Path;

impl OrtInfer {
    /// Creates a new OrtInfer instance with default ONNX Runtime settings.
    ///
    /// When `input_name` or `output_name` is `None`, the first input or output
    /// declared by the model is used.
    pub fn new(
        model_path: impl AsRef<Path>,
        input_name: Option<&str>,
        output_name: Option<&str>,
    ) -> Result<Self, DigitError> {
        let path = model_path.as_ref();
        if !path.is_file() {
            return Err(DigitError::model_load_error(
                path,
                "model file not found",
                Some("verify the model path or pass --model"),
                None::<std::io::Error>,
            ));
        }

        let session = Session::builder()?
            .with_log_level(LogLevel::Error)?
            .commit_from_file(path)
            .map_err(|e| {
                DigitError::model_load_error(
                    path,
                    "failed to create ONNX session",
                    Some("verify the file is a valid ONNX model"),
                    Some(e),
                )
            })?;

        let input_name = match input_name {
            Some(name) => name.to_string(),
            None => session
                .inputs
                .first()
                .map(|input| input.name.clone())
                .ok_or_else(|| {
                    DigitError::model_load_error(
                        path,
                        "model declares no inputs",
                        None,
                        None::<std::io::Error>,
                    )
                })?,
        };
        let output_name = match output_name {
            Some(name) => name.to_string(),
            None => session
                .outputs
                .first()
                .map(|output| output.name.clone())
                .ok_or_else(|| {
                    DigitError::model_load_error(
                        path,
                        "model declares no outputs",
                        Some("the model may be invalid or corrupted"),
                        None::<std::io::Error>,
                    )
                })?,
        };

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();

        Ok(OrtInfer {
            session: Mutex::new(session),
            input_name,
            output_name,
            model_path: path.to_path_buf(),
            model_name,
        })
    }
}
