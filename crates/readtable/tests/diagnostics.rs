use readtable::{Diagnostic, Error, ErrorCode, Options, Tokenizer};

#[test]
fn descriptions_are_stable() {
    let table = [
        (ErrorCode::Ok, "No error"),
        (ErrorCode::EndOfInput, "End of file"),
        (ErrorCode::UnexpectedEndOfLine, "Unexpected end of line"),
        (ErrorCode::MissingValue, "Missing value"),
        (ErrorCode::InvalidFormat, "Invalid value"),
        (ErrorCode::OverflowOrUnderflow, "Overflow or underflow"),
        (ErrorCode::NonFiniteValue, "NaN or infinity read"),
        (ErrorCode::UnsupportedConversion, "Unknown conversion requested"),
        (ErrorCode::InvalidatedInstance, "Invalidated instance"),
        (ErrorCode::FileOpenError, "Error opening file"),
        (ErrorCode::ReadError, "Error reading input"),
    ];
    for (code, text) in table {
        assert_eq!(code.description(), text);
        assert_eq!(code.to_string(), text);
    }
}

#[test]
fn terminal_codes() {
    let terminal: Vec<_> = [
        ErrorCode::Ok,
        ErrorCode::EndOfInput,
        ErrorCode::UnexpectedEndOfLine,
        ErrorCode::MissingValue,
        ErrorCode::InvalidFormat,
        ErrorCode::OverflowOrUnderflow,
        ErrorCode::NonFiniteValue,
        ErrorCode::UnsupportedConversion,
        ErrorCode::InvalidatedInstance,
        ErrorCode::FileOpenError,
        ErrorCode::ReadError,
    ]
    .into_iter()
    .filter(|c| c.is_terminal())
    .collect();
    assert_eq!(
        terminal,
        vec![
            ErrorCode::EndOfInput,
            ErrorCode::InvalidatedInstance,
            ErrorCode::FileOpenError,
            ErrorCode::ReadError,
        ]
    );
    assert!(ErrorCode::default().is_ok());
}

#[test]
fn diagnostic_formats() {
    let mut diag = Diagnostic {
        source: None,
        line: 12,
        position: 7,
        column: 3,
        code: ErrorCode::MissingValue,
    };
    assert_eq!(diag.to_string(), "input, line 12, position 7 / column 3: Missing value");
    diag.source = Some("data/points.tsv".to_string());
    assert_eq!(
        diag.to_string(),
        "file data/points.tsv, line 12, position 7 / column 3: Missing value"
    );
}

#[test]
fn tokenizer_diagnostic_reflects_cursor() {
    let mut tok = Tokenizer::from_line("1\t\t3", Options::tsv());
    let mut v = 0i32;
    tok.read_i32(&mut v).unwrap();
    assert_eq!(tok.read_i32(&mut v), Err(ErrorCode::MissingValue));
    let diag = tok.diagnostic(Some("x"), 9);
    assert_eq!((diag.line, diag.position, diag.column), (9, 2, 1));
    assert_eq!(diag.code, ErrorCode::MissingValue);
}

#[test]
fn error_wraps_diagnostics_and_io() {
    let err = Error::Parse(Diagnostic {
        source: None,
        line: 1,
        position: 0,
        column: 0,
        code: ErrorCode::InvalidFormat,
    });
    assert_eq!(err.to_string(), "input, line 1, position 0 / column 0: Invalid value");
    assert_eq!(err.code(), Some(ErrorCode::InvalidFormat));

    let io: Error = std::io::Error::other("pipe closed").into();
    assert_eq!(io.code(), None);
    assert!(io.to_string().contains("pipe closed"));
}
