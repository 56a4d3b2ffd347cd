// src/tests/bits_tests.rs - Bit sequence interpretation tests

use crate::bits::Bits;
use crate::tests::test_utils::{F, T};
use rand::Rng;

fn twos_complement(value: u64, width: usize) -> i64 {
    if value & (1 << (width - 1)) != 0 {
        value as i64 - (1i64 << width)
    } else {
        value as i64
    }
}

#[test]
fn test_as_u8() {
    let cases: Vec<(Vec<bool>, u8)> = vec![
        (vec![], 0),
        (vec![F, F, F, T], 8),
        (vec![F, F, F, F, F, F, F, F, T], 0),
        (vec![F, F, F, F, F, F, F, T], 128),
        (vec![T, T, T, T, T, T, T, T], 255),
    ];
    for (bits, want) in cases {
        assert_eq!(Bits::from(bits.clone()).as_u8(), want, "bits {:?}", bits);
    }
}

#[test]
fn test_as_unsigned() {
    assert_eq!(Bits::from([F, T]).as_u64(), 2);
    assert_eq!(Bits::from([F, T, T, F, F, F, T]).as_u64(), 70);
    assert_eq!(Bits::from([T, T, F, T, T, T, T]).as_u64(), 123);
    assert_eq!(Bits::from([T, F, F, T, T, F, F, T, T, T, T]).as_u16(), 1945);
    assert_eq!(
        Bits::from([T, F, F, T, T, F, F, T, T, T, T, F, F, F, F, F]).as_u16(),
        1945
    );
    assert_eq!(Bits::from([T, F, T, F, F, T, T, T, T, T, T]).as_u16(), 2021);

    let mut wide = Bits::from([T, F, T, T, T]);
    wide.resize(32, F);
    assert_eq!(wide.as_u32(), 29);

    let bits = Bits::from([
        F, F, T, T, F, F, T, F, F, T, F, F, F, T, F, T, T, T, T, F, T, F, F, F, F, F, F, F, F, F,
        F, F,
    ]);
    assert_eq!(bits.as_u32(), 1548876);
}

#[test]
fn test_unsigned_ignores_bits_past_64() {
    let mut bits = Bits::from_uint(u64::MAX, 64);
    bits.push(T);
    assert_eq!(bits.as_u64(), u64::MAX);
    assert_eq!(bits.len(), 65);
}

#[test]
fn test_as_i8() {
    assert_eq!(Bits::from([F, F, T, F, F, T, T, F]).as_i8(), 100);
    assert_eq!(Bits::from([F, F, T, T, T, F, F, T]).as_i8(), -100);
    assert_eq!(Bits::from([F, F, F, T, F]).as_i8(), 8);
    assert_eq!(Bits::from([F, F, F, T, T]).as_i8(), -8);
    assert_eq!(Bits::from([F, F, F, F, F, F, T, F]).as_i8(), 64);
    assert_eq!(Bits::from([F, F, F, F, F, F, T]).as_i8(), -64);
}

#[test]
fn test_as_i16() {
    assert_eq!(Bits::new().as_i16(), 0);
    assert_eq!(Bits::from([T]).as_i16(), -1);
    assert_eq!(Bits::from([T, T, T]).as_i16(), -1);
    assert_eq!(Bits::from(vec![T; 16]).as_i16(), -1);
    assert_eq!(Bits::from(vec![T; 17]).as_i16(), -1);
    assert_eq!(
        Bits::from([F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, T]).as_i16(),
        0
    );
    assert_eq!(Bits::from([F, T, F]).as_i16(), 2);
}

#[test]
fn test_as_i32() {
    assert_eq!(Bits::new().as_i32(), 0);
    assert_eq!(Bits::from([T, T, T, T]).as_i32(), -1);
    assert_eq!(Bits::from([T, F, F, T, T, T, T, T]).as_i32(), -7);
    assert_eq!(Bits::from([T, T, T, F]).as_i32(), 7);
    assert_eq!(Bits::from([F, T, F, T, F, F, T, T, F, T]).as_i32(), -310);
    assert_eq!(Bits::from([F, F, F, F, F, F, F, F, F, F, T, F]).as_i32(), 1024);
    assert_eq!(Bits::from([F, F, F, F, F, F, F, F, F, F, T, T]).as_i32(), -1024);
}

#[test]
fn test_single_set_bit_is_negative_one() {
    assert_eq!(Bits::from([T]).as_signed(1), -1);
    assert_eq!(Bits::from([F]).as_signed(1), 0);
    assert_eq!(Bits::from([T]).as_i64(), -1);
}

#[test]
fn test_signed_width_zero_is_zero() {
    assert_eq!(Bits::from([T, T, T]).as_signed(0), 0);
    assert_eq!(Bits::new().as_signed(0), 0);
}

#[test]
fn test_signed_width_beyond_sequence() {
    // Missing high bits are zero, so the sign bit is clear.
    assert_eq!(Bits::from([T]).as_signed(16), 1);
    assert_eq!(Bits::from([T, T]).as_signed(2), -1);
}

#[test]
fn test_signed_64_bits() {
    assert_eq!(Bits::from_uint(u64::MAX, 64).as_i64(), -1);
    assert_eq!(Bits::from_uint(1 << 63, 64).as_i64(), i64::MIN);
    assert_eq!(Bits::from_uint(0xFFFF_FFFF, 40).as_i64(), 0xFFFF_FFFF);
    assert_eq!(Bits::from_uint(1 << 39, 40).as_i64(), -(1i64 << 39));
}

#[test]
fn test_signed_matches_twos_complement_exhaustive_small_widths() {
    for width in 1..=12usize {
        for value in 0..(1u64 << width) {
            let bits = Bits::from_uint(value, width);
            assert_eq!(
                bits.as_signed(width),
                twos_complement(value, width),
                "value {} width {}",
                value,
                width
            );
        }
    }
}

#[test]
fn test_signed_matches_twos_complement_random_wide() {
    let mut rng = rand::thread_rng();
    for width in 13..=32usize {
        for _ in 0..500 {
            let value = rng.gen_range(0..(1u64 << width));
            let bits = Bits::from_uint(value, width);
            assert_eq!(bits.as_signed(width), twos_complement(value, width));
            assert_eq!(bits.as_i32() as i64, twos_complement(value, width));
        }
        let top = (1u64 << width) - 1;
        assert_eq!(Bits::from_uint(top, width).as_signed(width), -1);
        assert_eq!(
            Bits::from_uint(1 << (width - 1), width).as_signed(width),
            -(1i64 << (width - 1))
        );
    }
}

#[test]
fn test_as_bool() {
    assert!(!Bits::new().as_bool());
    assert!(!Bits::from([F, F, F]).as_bool());
    assert!(Bits::from([T, F]).as_bool());
    assert!(Bits::from([F, T, F]).as_bool());

    // The top bit is the sign bit.
    assert!(!Bits::from([T]).as_bool());
    assert!(!Bits::from([T, T, T, T]).as_bool());
    assert!(!Bits::from([F, F, T]).as_bool());
}

#[test]
fn test_as_bytes() {
    assert_eq!(Bits::from([F, T]).as_bytes(), vec![2]);
    assert_eq!(Bits::from([F, F, F, F, F, F, F, F, T]).as_bytes(), vec![0, 1]);
    assert_eq!(Bits::new().as_bytes(), Vec::<u8>::new());

    let mut bits = Bits::from_byte(0xAB);
    bits.extend(Bits::from_byte(0xCD));
    bits.extend([T, T, T]);
    assert_eq!(bits.as_bytes(), vec![0xAB, 0xCD, 0b111]);
}

#[test]
fn test_from_uint() {
    assert_eq!(Bits::from_uint(0b1011, 4), Bits::from([T, T, F, T]));
    assert_eq!(Bits::from_uint(0b1011, 2), Bits::from([T, T]));
    assert_eq!(Bits::from_uint(1, 0), Bits::new());
    assert_eq!(Bits::from_byte(3), Bits::from([T, T, F, F, F, F, F, F]));

    let padded = Bits::from_uint(u64::MAX, 70);
    assert_eq!(padded.len(), 70);
    assert!(!padded[69]);
}
