use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LecternError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LecternError::layout("x")
            .to_string()
            .contains("layout error:")
    );
    assert!(LecternError::emit("x").to_string().contains("emit error:"));
    assert!(
        LecternError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LecternError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn user_message_hides_detail() {
    let err = LecternError::validation("slide 3 title is 500 characters long");
    assert_eq!(err.user_message(), "could not generate document");
    assert!(err.is_input_error());
    assert!(!LecternError::emit("zip").is_input_error());
}

#[test]
fn json_errors_map_to_serde() {
    let err: LecternError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, LecternError::Serde(_)));
}
