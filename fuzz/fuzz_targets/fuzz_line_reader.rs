#![no_main]
use libfuzzer_sys::fuzz_target;
use readtable::{ErrorCode, LineReader, Options};

fuzz_target!(|data: &[u8]| {
    let options = Options::default().with_comment(b'#');
    let mut reader = LineReader::new(data, options);
    let mut last_line = 0;
    loop {
        match reader.next_line() {
            Ok(()) => {
                assert!(reader.line_number() > last_line);
                last_line = reader.line_number();
                assert!(!reader.line().contains(&b'\n'));
                assert!(!reader.at_end_of_line());
                while reader.skip().is_ok() {}
            }
            Err(code) => {
                assert_eq!(code, ErrorCode::EndOfInput);
                break;
            }
        }
    }
    assert_eq!(reader.next_line(), Err(ErrorCode::EndOfInput));
    assert!(last_line as usize <= data.iter().filter(|&&b| b == b'\n').count() + 1);
});
