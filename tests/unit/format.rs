use super::*;

fn fields() -> FormatFields {
    FormatFields {
        file_type: Some("wav".to_string()),
        rate: Some(44100.into()),
        bits: Some(16),
        channels: Some(2),
        encoding: Some(Encoding::SignedInteger),
    }
}

#[test]
fn empty_formats_render_nothing() {
    assert!(InputFormat::default().to_args().unwrap().is_empty());
    assert!(OutputFormat::default().to_args().unwrap().is_empty());
}

#[test]
fn input_fields_render_in_fixed_order() {
    let fmt = InputFormat {
        fields: fields(),
        ignore_length: true,
    };
    assert_eq!(
        fmt.to_args().unwrap(),
        vec![
            "-t",
            "wav",
            "-r",
            "44100",
            "-b",
            "16",
            "-c",
            "2",
            "-e",
            "signed-integer",
            "--ignore-length"
        ]
    );
}

#[test]
fn output_comment_flag_depends_on_append() {
    let mut fmt = OutputFormat {
        comments: Some("mastered".to_string()),
        ..OutputFormat::default()
    };
    assert_eq!(fmt.to_args().unwrap(), vec!["--add-comment", "mastered"]);

    fmt.append_comments = false;
    assert_eq!(fmt.to_args().unwrap(), vec!["--comment", "mastered"]);
}

#[test]
fn float_rate_keeps_decimal_point() {
    let fmt = OutputFormat {
        fields: FormatFields {
            rate: Some(22050.0.into()),
            ..FormatFields::default()
        },
        ..OutputFormat::default()
    };
    assert_eq!(fmt.to_args().unwrap(), vec!["-r", "22050.0"]);
}

#[test]
fn invalid_fields_are_rejected() {
    let bad_type = InputFormat {
        fields: FormatFields {
            file_type: Some("docx".to_string()),
            ..FormatFields::default()
        },
        ..InputFormat::default()
    };
    assert!(bad_type.to_args().unwrap_err().is_validation());

    let bad_rate = InputFormat {
        fields: FormatFields {
            rate: Some((-1).into()),
            ..FormatFields::default()
        },
        ..InputFormat::default()
    };
    assert!(bad_rate.to_args().unwrap_err().to_string().contains("rate"));

    let zero_channels = OutputFormat {
        fields: FormatFields {
            channels: Some(0),
            ..FormatFields::default()
        },
        ..OutputFormat::default()
    };
    assert!(
        zero_channels
            .to_args()
            .unwrap_err()
            .to_string()
            .contains("channels")
    );
}

#[test]
fn encoding_parses_from_identifier() {
    assert_eq!("u-law".parse::<Encoding>().unwrap(), Encoding::ULaw);
    assert!("mp3".parse::<Encoding>().unwrap_err().is_validation());
}

#[test]
fn json_uses_flat_field_names() {
    let fmt: OutputFormat = serde_json::from_str(
        r#"{"file_type": "flac", "bits": 24, "encoding": "signed-integer"}"#,
    )
    .unwrap();
    assert_eq!(fmt.fields.file_type.as_deref(), Some("flac"));
    assert!(fmt.append_comments);
    assert_eq!(
        fmt.to_args().unwrap(),
        vec!["-t", "flac", "-b", "24", "-e", "signed-integer"]
    );

    let bad = serde_json::from_str::<OutputFormat>(r#"{"encoding": "mp3"}"#);
    assert!(bad.is_err());
}
