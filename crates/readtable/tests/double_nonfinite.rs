use readtable::{Bounded, ErrorCode, Options, Tokenizer, bounds};

#[test]
fn nonfinite_accepted_by_default() -> Result<(), ErrorCode> {
    let mut tok = Tokenizer::from_line("nan inf -Infinity", Options::default());
    let (mut a, mut b, mut c) = (0.0f64, 0.0f64, 0.0f64);
    tok.read((&mut a, &mut b, &mut c))?;
    assert!(a.is_nan());
    assert_eq!(b, f64::INFINITY);
    assert_eq!(c, f64::NEG_INFINITY);
    Ok(())
}

#[test]
fn nonfinite_rejected_when_disallowed() {
    let opts = Options::default().with_allow_nonfinite(false);
    for text in ["NaN", "inf", "-infinity", "nan(123)"] {
        let mut tok = Tokenizer::from_line(text, opts);
        let mut v = 1.0;
        assert_eq!(tok.read_f64(&mut v), Err(ErrorCode::NonFiniteValue), "{text}");
        assert_eq!(v, 1.0);
        assert_eq!(tok.column(), 0);
    }
}

#[test]
fn nan_with_bounds_is_always_nonfinite() {
    let mut tok = Tokenizer::from_line("nan", Options::default());
    let mut v = 0.0;
    assert_eq!(tok.read_f64_in(&mut v, -1.0, 1.0), Err(ErrorCode::NonFiniteValue));
    let mut tok = Tokenizer::from_line("nan", Options::default());
    assert_eq!(
        tok.read_f64_in(&mut v, f64::NEG_INFINITY, f64::INFINITY),
        Err(ErrorCode::NonFiniteValue)
    );
}

#[test]
fn infinity_with_bounds_follows_policy() {
    let mut tok = Tokenizer::from_line("inf", Options::default());
    let mut v = 0.0;
    assert_eq!(tok.read_f64_in(&mut v, 0.0, 10.0), Err(ErrorCode::OverflowOrUnderflow));
    assert_eq!(v, 10.0);

    let mut tok = Tokenizer::from_line("inf", Options::default());
    assert_eq!(tok.read_f64_in(&mut v, 0.0, f64::INFINITY), Ok(()));
    assert_eq!(v, f64::INFINITY);

    let mut tok = Tokenizer::from_line("inf", Options::default().with_allow_nonfinite(false));
    assert_eq!(tok.read_f64_in(&mut v, 0.0, f64::INFINITY), Err(ErrorCode::NonFiniteValue));
}

#[test]
fn double_bounds_clamp() {
    let mut tok = Tokenizer::from_line("1e-11,123.5", Options::csv());
    let mut v = 0.0;
    assert_eq!(tok.read_f64_in(&mut v, 1e-10, 123.0), Err(ErrorCode::OverflowOrUnderflow));
    assert_eq!(v, 1e-10);
    tok.skip().unwrap();
    assert_eq!(tok.read_f64_in(&mut v, 1e-10, 123.0), Err(ErrorCode::OverflowOrUnderflow));
    assert_eq!(v, 123.0);
}

#[test]
fn out_of_range_literals_are_overflow() {
    for text in ["1e309", "-2e400", "1e-400"] {
        let mut tok = Tokenizer::from_line(text, Options::default());
        let mut v = 3.0;
        assert_eq!(tok.read_f64(&mut v), Err(ErrorCode::OverflowOrUnderflow), "{text}");
        assert_eq!(v, 3.0);
    }
}

#[test]
fn malformed_doubles_are_invalid() {
    for text in ["1.5.2", "abc", ".", "1e5x", "--1", "0x1p3"] {
        let mut tok = Tokenizer::from_line(text, Options::default());
        let mut v = 0.0;
        assert_eq!(tok.read_f64(&mut v), Err(ErrorCode::InvalidFormat), "{text}");
    }
}

#[test]
fn double_forms_accepted() -> Result<(), ErrorCode> {
    let mut tok = Tokenizer::from_line("5. .5 +1e3 -0 2E-2", Options::default());
    let mut v = [0.0f64; 5];
    let [a, b, c, d, e] = &mut v;
    tok.read((a, b, c, d, e))?;
    assert_eq!(v, [5.0, 0.5, 1000.0, -0.0, 0.02]);
    Ok(())
}

#[test]
fn coordinate_pairs() -> Result<(), ErrorCode> {
    let mut tok = Tokenizer::from_line("12.5 47.25 200 10", Options::default());
    let mut pos = (0.0, 0.0);
    tok.read_next(&mut Bounded::coords(&mut pos))?;
    assert_eq!(pos, (12.5, 47.25));
    assert_eq!(tok.column(), 2);

    assert_eq!(
        tok.read_next(&mut Bounded::coords(&mut pos)),
        Err(ErrorCode::OverflowOrUnderflow)
    );
    assert_eq!(pos.0, 180.0);
    assert_eq!(tok.column(), 2);

    let mut tok = Tokenizer::from_line("1 2", Options::default());
    let mut plain = (0.0, 0.0);
    tok.read_next(&mut plain)?;
    assert_eq!(plain, (1.0, 2.0));

    let mut tok = Tokenizer::from_line("1 -95", Options::default());
    let mut lat = (0.0, 0.0);
    assert!(tok.read_next(&mut bounds(&mut lat, (-180.0, -90.0), (180.0, 90.0))).is_err());
    assert_eq!(lat, (0.0, -90.0));
    Ok(())
}

#[test]
fn pair_is_stored_only_when_both_values_read() -> Result<(), ErrorCode> {
    let mut tok = Tokenizer::from_line("5 x", Options::default());
    let mut pos = (-1.0, -2.0);
    assert_eq!(
        tok.read_next(&mut Bounded::coords(&mut pos)),
        Err(ErrorCode::InvalidFormat)
    );
    assert_eq!(pos, (-1.0, -2.0));
    assert_eq!(tok.column(), 1);

    let mut tok = Tokenizer::from_line("5	6", Options::tsv());
    tok.read_next(&mut Bounded::coords(&mut pos))?;
    assert_eq!(pos, (5.0, 6.0));
    Ok(())
}
