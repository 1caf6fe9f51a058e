//! Register and field definitions for the ADS1x15
//!
//! The device exposes four 16-bit registers, big-endian on the wire.
//! All measurement behaviour lives in the configuration register, which
//! is split into non-overlapping bit-fields:
//!
//! | Field | Bits | Meaning |
//! |---|---|---|
//! | OS | 15 | status / single-shot trigger |
//! | MUX | 14:12 | input multiplexer |
//! | PGA | 11:9 | gain (full-scale range) |
//! | MODE | 8 | continuous vs single-shot |
//! | DATA_RATE | 7:5 | samples per second |
//! | COMP_MODE | 4 | traditional vs window comparator |
//! | COMP_POLARITY | 3 | ALERT/RDY pin polarity |
//! | COMP_LATCH | 2 | latching comparator |
//! | COMP_QUEUE | 1:0 | assert after N conversions, 3 = disabled |
//!
//! Setting enums carry their in-register bit patterns already shifted
//! into place, so a setting is written by masking it into the register
//! without further shifting.

/// Register addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Conversion result (read-only)
    Conversion = 0x00,
    /// Configuration register
    Config = 0x01,
    /// Low comparator threshold
    LoThreshold = 0x02,
    /// High comparator threshold
    HiThreshold = 0x03,
}

impl Register {
    /// All registers are 2 bytes wide
    pub(crate) const SIZE_BITS: u32 = 16;

    /// The register's bus address
    pub const fn address(self) -> u8 {
        self as u8
    }
}

/// One bit-field of a 16-bit register
///
/// A field is a pure descriptor: the register it lives in and the mask
/// covering its bits. Field values are kept in-place (pre-shifted), so
/// extraction and insertion are mask operations only. Fields sharing a
/// register never overlap; bits outside every field are reserved and
/// preserved verbatim across read-modify-write cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    register: Register,
    mask: u16,
}

impl Field {
    /// Operational status: reads 1 when idle, write 1 to start a
    /// single conversion
    pub const OS: Field = Field::config(1 << 15);
    /// Input multiplexer
    pub const MUX: Field = Field::config(0b111 << 12);
    /// Programmable gain amplifier
    pub const PGA: Field = Field::config(0b111 << 9);
    /// Operating mode (continuous / single-shot)
    pub const MODE: Field = Field::config(1 << 8);
    /// Data rate
    pub const DATA_RATE: Field = Field::config(0b111 << 5);
    /// Comparator mode (traditional / window)
    pub const COMP_MODE: Field = Field::config(1 << 4);
    /// Comparator polarity
    pub const COMP_POLARITY: Field = Field::config(1 << 3);
    /// Comparator latch
    pub const COMP_LATCH: Field = Field::config(1 << 2);
    /// Comparator queue
    pub const COMP_QUEUE: Field = Field::config(0b11);

    const fn config(mask: u16) -> Self {
        Self {
            register: Register::Config,
            mask,
        }
    }

    /// The register this field belongs to
    pub const fn register(self) -> Register {
        self.register
    }

    /// The field's bit mask within its register
    pub const fn mask(self) -> u16 {
        self.mask
    }

    /// A one-bit field has exactly two valid states
    pub const fn is_binary(self) -> bool {
        self.mask.count_ones() == 1
    }

    /// Extract this field's bits from a register value, in place
    pub(crate) const fn extract(self, word: u16) -> u16 {
        word & self.mask
    }

    /// Replace this field's bits in a register value, leaving all other
    /// bits untouched
    pub(crate) const fn insert(self, word: u16, value: u16) -> u16 {
        (word & !self.mask) | (value & self.mask)
    }
}

/// Input multiplexer settings (config register bits 14:12)
///
/// Four differential pairs and four single-ended inputs measured
/// against GND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum MuxSetting {
    /// AIN0 (positive) vs AIN1 (negative) - power-on default
    Ain0Ain1 = 0b000 << 12,
    /// AIN0 vs AIN3
    Ain0Ain3 = 0b001 << 12,
    /// AIN1 vs AIN3
    Ain1Ain3 = 0b010 << 12,
    /// AIN2 vs AIN3
    Ain2Ain3 = 0b011 << 12,
    /// AIN0 vs GND (single-ended channel 0)
    Ain0Gnd = 0b100 << 12,
    /// AIN1 vs GND (single-ended channel 1)
    Ain1Gnd = 0b101 << 12,
    /// AIN2 vs GND (single-ended channel 2)
    Ain2Gnd = 0b110 << 12,
    /// AIN3 vs GND (single-ended channel 3)
    Ain3Gnd = 0b111 << 12,
}

impl MuxSetting {
    /// The setting's in-register bit pattern
    pub const fn bits(self) -> u16 {
        self as u16
    }

    /// Map a single-ended channel index (0..=3) to its mux setting
    pub const fn single_ended(channel: u8) -> Option<MuxSetting> {
        match channel {
            0 => Some(MuxSetting::Ain0Gnd),
            1 => Some(MuxSetting::Ain1Gnd),
            2 => Some(MuxSetting::Ain2Gnd),
            3 => Some(MuxSetting::Ain3Gnd),
            _ => None,
        }
    }
}

/// Programmable gain amplifier settings (config register bits 11:9)
///
/// The gain sets the full-scale input range, coarsest first. Inputs
/// beyond the selected range saturate the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Gain {
    /// +/-6.144 V full-scale
    Fs6_144 = 0b000 << 9,
    /// +/-4.096 V full-scale
    Fs4_096 = 0b001 << 9,
    /// +/-2.048 V full-scale - power-on default
    Fs2_048 = 0b010 << 9,
    /// +/-1.024 V full-scale
    Fs1_024 = 0b011 << 9,
    /// +/-0.512 V full-scale
    Fs0_512 = 0b100 << 9,
    /// +/-0.256 V full-scale
    Fs0_256 = 0b101 << 9,
}

impl Gain {
    /// The setting's in-register bit pattern
    pub const fn bits(self) -> u16 {
        self as u16
    }
}

/// Operating mode (config register bit 8)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum OperatingMode {
    /// Free-running conversions
    Continuous = 0 << 8,
    /// One conversion per trigger, then idle - power-on default
    SingleShot = 1 << 8,
}

impl OperatingMode {
    /// The setting's in-register bit pattern
    pub const fn bits(self) -> u16 {
        self as u16
    }
}

/// Data rate settings (config register bits 7:5), slowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum DataRate {
    /// 128 samples per second
    Sps128 = 0b000 << 5,
    /// 250 samples per second
    Sps250 = 0b001 << 5,
    /// 490 samples per second
    Sps490 = 0b010 << 5,
    /// 920 samples per second
    Sps920 = 0b011 << 5,
    /// 1600 samples per second - power-on default
    Sps1600 = 0b100 << 5,
    /// 2400 samples per second
    Sps2400 = 0b101 << 5,
    /// 3300 samples per second
    Sps3300 = 0b110 << 5,
}

impl DataRate {
    /// The setting's in-register bit pattern
    pub const fn bits(self) -> u16 {
        self as u16
    }
}

/// Comparator mode (config register bit 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ComparatorMode {
    /// Assert when the result crosses the high threshold
    Traditional = 0 << 4,
    /// Assert when the result leaves the threshold window
    Window = 1 << 4,
}

impl ComparatorMode {
    /// The setting's in-register bit pattern
    pub const fn bits(self) -> u16 {
        self as u16
    }
}

/// Comparator polarity (config register bit 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ComparatorPolarity {
    /// ALERT/RDY pin is active low - power-on default
    ActiveLow = 0 << 3,
    /// ALERT/RDY pin is active high
    ActiveHigh = 1 << 3,
}

impl ComparatorPolarity {
    /// The setting's in-register bit pattern
    pub const fn bits(self) -> u16 {
        self as u16
    }
}

/// Comparator latch (config register bit 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ComparatorLatch {
    /// ALERT/RDY deasserts when the result leaves the asserting range
    NonLatching = 0 << 2,
    /// ALERT/RDY stays asserted until the conversion register is read
    Latching = 1 << 2,
}

impl ComparatorLatch {
    /// The setting's in-register bit pattern
    pub const fn bits(self) -> u16 {
        self as u16
    }
}

/// Comparator queue (config register bits 1:0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ComparatorQueue {
    /// Assert after one conversion beyond threshold
    AssertAfterOne = 0b00,
    /// Assert after two consecutive conversions beyond threshold
    AssertAfterTwo = 0b01,
    /// Assert after four consecutive conversions beyond threshold
    AssertAfterFour = 0b10,
    /// Comparator disabled, ALERT/RDY held high-impedance
    Disabled = 0b11,
}

impl ComparatorQueue {
    /// The setting's in-register bit pattern
    pub const fn bits(self) -> u16 {
        self as u16
    }
}

/// Decode a raw conversion-register read into a signed sample
///
/// The 12-bit two's-complement result arrives right-justified in the
/// 16-bit word: the low four bits are reserved and discarded, then the
/// sign bit (bit 11) is extended upward. The decoded range is
/// -2048..=2047.
pub const fn decode_sample(bytes: [u8; 2]) -> i16 {
    let mut value = u16::from_be_bytes(bytes) >> 4;
    if value > 0x07FF {
        value |= 0xF000;
    }
    value as i16
}
