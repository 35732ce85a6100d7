#![no_main]
use libfuzzer_sys::fuzz_target;
use readtable::{Options, parse_field_specs, parse_record};

fuzz_target!(|input: (String, String, bool)| {
    let (fields, line, csv) = input;
    let Ok(specs) = parse_field_specs(&fields) else {
        return;
    };
    let options = if csv { Options::csv() } else { Options::default() };
    if let Ok(values) = parse_record(&line, &options, &specs) {
        assert_eq!(values.len(), specs.iter().filter(|s| s.yields_value()).count());
    }
});
