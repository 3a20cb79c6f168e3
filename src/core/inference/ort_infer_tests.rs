use super::*;

#[test]
fn test_new_with_missing_model_is_model_load_error() {
    let result = OrtInfer::new("dummy_path.onnx", None, None);
    match result {
        Err(DigitError::ModelLoad { model_path, .. }) => assert_eq!(model_path, "dummy_path.onnx"),
        other => panic!("expected ModelLoad error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_new_with_malformed_model_is_model_load_error() {
    let mut file = tempfile::Builder::new().suffix(".onnx").tempfile().unwrap();
    std::io::Write::write_all(&mut file, b"this is not an onnx graph").unwrap();
    let result = OrtInfer::new(file.path(), Some("x"), None);
    assert!(matches!(result, Err(DigitError::ModelLoad { .. })));
}
