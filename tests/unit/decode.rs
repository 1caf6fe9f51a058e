//! Unit tests for conversion-result decoding

use ads1x15::registers::decode_sample;

/// Build the wire bytes for a 12-bit code, left-justified as the
/// device delivers it (low four bits reserved)
fn wire(code: u16) -> [u8; 2] {
    (code << 4).to_be_bytes()
}

#[test]
fn test_decode_zero() {
    assert_eq!(decode_sample(wire(0x000)), 0);
}

#[test]
fn test_decode_positive_full_scale() {
    assert_eq!(decode_sample(wire(0x7FF)), 2047);
}

#[test]
fn test_decode_negative_full_scale() {
    assert_eq!(decode_sample(wire(0x800)), -2048);
}

#[test]
fn test_decode_minus_one() {
    assert_eq!(decode_sample(wire(0xFFF)), -1);
}

#[test]
fn test_decode_mid_range_values() {
    assert_eq!(decode_sample(wire(0x001)), 1);
    assert_eq!(decode_sample(wire(0x400)), 1024);
    assert_eq!(decode_sample(wire(0xC00)), -1024);
}

#[test]
fn test_decode_ignores_reserved_low_bits() {
    let mut bytes = wire(0x7FF);
    bytes[1] |= 0x0F;
    assert_eq!(decode_sample(bytes), 2047);

    let mut bytes = wire(0x800);
    bytes[1] |= 0x0A;
    assert_eq!(decode_sample(bytes), -2048);
}
