#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod channel;
pub mod config;
pub mod device;
pub mod interface;
pub mod registers;

// Re-export main types
pub use channel::Channel;
pub use config::{ConfigOption, CorruptedField};
pub use device::{Ads1x15, DEFAULT_CONFIG, DEFAULT_POLL_LIMIT};
pub use interface::I2cInterface;
pub use registers::{
    ComparatorLatch, ComparatorMode, ComparatorPolarity, ComparatorQueue, DataRate, Field, Gain,
    MuxSetting, OperatingMode, Register,
};

/// ADS1x15 I2C address when the ADDR pin is tied to GND (default: 0x48)
///
/// This is the most common configuration. Use [`I2cInterface::default()`]
/// for this address.
pub const I2C_ADDRESS_GND: u8 = 0x48;

/// ADS1x15 I2C address when the ADDR pin is tied to VDD (0x49)
pub const I2C_ADDRESS_VDD: u8 = 0x49;

/// ADS1x15 I2C address when the ADDR pin is tied to SDA (0x4A)
pub const I2C_ADDRESS_SDA: u8 = 0x4A;

/// ADS1x15 I2C address when the ADDR pin is tied to SCL (0x4B)
pub const I2C_ADDRESS_SCL: u8 = 0x4B;

/// Driver errors
///
/// Every error carries enough context (register, field mask, channel) to
/// diagnose the failure at the call site. The driver never retries or
/// recovers internally; the caller decides whether to retry, abort, or
/// degrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus failed a read or write of the given register
    Transport {
        /// Register being accessed when the bus failed
        register: Register,
        /// Underlying bus error
        cause: E,
    },
    /// Requested single-ended channel index is outside 0..=3
    ///
    /// Detected before any bus I/O is attempted.
    InvalidChannel(u8),
    /// A binary field read back a value outside its two known states
    ///
    /// The device or bus returned data inconsistent with the register
    /// model. The value is never silently coerced.
    CorruptedField {
        /// Register holding the field
        register: Register,
        /// Mask of the corrupted field
        mask: u16,
        /// The unrecognized masked value that was read back
        value: u16,
    },
    /// The conversion-ready poll expired before the device reported idle
    ConversionTimeout {
        /// Number of status reads performed before giving up
        polls: u32,
    },
    /// Restoring the multiplexer after a channel-bound read failed
    ///
    /// The sample itself may have been decoded successfully, but it is
    /// withheld: the device was left in an unexpected configuration.
    Restore {
        /// Register being accessed when the restore write failed
        register: Register,
        /// Underlying bus error
        cause: E,
    },
}

impl<E> From<CorruptedField> for Error<E> {
    fn from(err: CorruptedField) -> Self {
        Self::CorruptedField {
            register: err.register,
            mask: err.mask,
            value: err.value,
        }
    }
}
