#![no_main]
use libfuzzer_sys::{arbitrary, fuzz_target};
use arbitrary::Arbitrary;
use readtable::{ErrorCode, Options, Tokenizer};

#[derive(Arbitrary, Debug)]
enum Op {
    I16(i16, i16),
    U16(u16, u16),
    I32(i32, i32),
    U32(u32, u32),
    I64,
    U64,
    F64,
    F64In(f64, f64),
    Str,
    Skip,
}

#[derive(Arbitrary, Debug)]
struct Input {
    line: Vec<u8>,
    delimiter: Option<u8>,
    comment: Option<u8>,
    base: u8,
    allow_nonfinite: bool,
    ops: Vec<Op>,
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

fuzz_target!(|input: Input| {
    let options = Options {
        delimiter: input.delimiter.filter(|&d| d != b'\n'),
        comment: input.comment,
        base: u32::from(input.base % 40),
        allow_nonfinite: input.allow_nonfinite,
    };
    let mut tok = Tokenizer::from_line(&input.line, options);
    for op in input.ops.iter().take(64) {
        let (pos, col) = (tok.position(), tok.column());
        let result = match *op {
            Op::I16(a, b) => {
                let (min, max) = ordered(a, b);
                let mut v = min;
                let r = tok.read_i16_in(&mut v, min, max);
                assert!(v >= min && v <= max);
                r
            }
            Op::U16(a, b) => {
                let (min, max) = ordered(a, b);
                let mut v = min;
                let r = tok.read_u16_in(&mut v, min, max);
                assert!(v >= min && v <= max);
                r
            }
            Op::I32(a, b) => {
                let (min, max) = ordered(a, b);
                let mut v = min;
                let r = tok.read_i32_in(&mut v, min, max);
                assert!(v >= min && v <= max);
                r
            }
            Op::U32(a, b) => {
                let (min, max) = ordered(a, b);
                let mut v = min;
                let r = tok.read_u32_in(&mut v, min, max);
                assert!(v >= min && v <= max);
                r
            }
            Op::I64 => tok.read_i64(&mut 0),
            Op::U64 => tok.read_u64(&mut 0),
            Op::F64 => {
                let mut v = 0.0;
                let r = tok.read_f64(&mut v);
                if r.is_ok() && !options.allow_nonfinite {
                    assert!(v.is_finite());
                }
                r
            }
            Op::F64In(a, b) => {
                if a.is_nan() || b.is_nan() {
                    continue;
                }
                let (min, max) = ordered(a, b);
                let mut v = min;
                let r = tok.read_f64_in(&mut v, min, max);
                assert!(!v.is_nan());
                r
            }
            Op::Str => tok.read_bytes().map(|_| ()),
            Op::Skip => tok.skip(),
        };
        assert!(tok.position() <= tok.line().len());
        assert_eq!(result.err().unwrap_or(ErrorCode::Ok), tok.last_error());
        match result {
            Ok(()) => assert_eq!(tok.column(), col + 1),
            Err(_) => {
                assert_eq!(tok.column(), col);
                assert!(tok.position() >= pos);
            }
        }
    }
});
