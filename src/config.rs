//! Reversible configuration options
//!
//! Every configuration change to the device is expressed as a
//! [`ConfigOption`]: the target field plus the value to write into it.
//! Applying an option through [`Ads1x15::apply`](crate::Ads1x15::apply)
//! performs one read-modify-write on the configuration register and
//! returns the option that restores the field to its previous value.
//! That inverse is what channel-bound reads use to put the multiplexer
//! back after a conversion.
//!
//! Applying a sequence with
//! [`Ads1x15::apply_all`](crate::Ads1x15::apply_all) returns the
//! inverse of the *last* option only; see its documentation for the
//! partial-application contract.

use crate::registers::{
    ComparatorLatch, ComparatorMode, ComparatorPolarity, ComparatorQueue, DataRate, Field, Gain,
    MuxSetting, OperatingMode, Register,
};

/// A deferred write to one field of the configuration register
///
/// Options are plain values: constructing one performs no bus I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigOption {
    field: Field,
    value: u16,
}

/// A binary field read back a value outside its two known states
///
/// Produced by [`ConfigOption::inverse_of`] when the prior value of a
/// one-bit field is neither zero nor the field's mask. Converted into
/// [`Error::CorruptedField`](crate::Error::CorruptedField) when it
/// surfaces from a driver operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CorruptedField {
    /// Register holding the field
    pub register: Register,
    /// Mask of the corrupted field
    pub mask: u16,
    /// The unrecognized masked value
    pub value: u16,
}

impl ConfigOption {
    /// Select the input multiplexer
    pub const fn mux(setting: MuxSetting) -> Self {
        Self {
            field: Field::MUX,
            value: setting.bits(),
        }
    }

    /// Select the programmable gain amplifier range
    pub const fn gain(gain: Gain) -> Self {
        Self {
            field: Field::PGA,
            value: gain.bits(),
        }
    }

    /// Select the data rate
    pub const fn data_rate(rate: DataRate) -> Self {
        Self {
            field: Field::DATA_RATE,
            value: rate.bits(),
        }
    }

    /// Configure the comparator queue
    pub const fn comparator_queue(queue: ComparatorQueue) -> Self {
        Self {
            field: Field::COMP_QUEUE,
            value: queue.bits(),
        }
    }

    /// Disable the comparator (queue set to its disabled sentinel)
    pub const fn disable_comparator() -> Self {
        Self::comparator_queue(ComparatorQueue::Disabled)
    }

    /// Set the measurement mode to single-shot
    pub const fn single_shot() -> Self {
        Self {
            field: Field::MODE,
            value: OperatingMode::SingleShot.bits(),
        }
    }

    /// Set the measurement mode to continuous
    pub const fn continuous() -> Self {
        Self {
            field: Field::MODE,
            value: OperatingMode::Continuous.bits(),
        }
    }

    /// Set the comparator to traditional (threshold) mode
    pub const fn traditional_comparator() -> Self {
        Self {
            field: Field::COMP_MODE,
            value: ComparatorMode::Traditional.bits(),
        }
    }

    /// Set the comparator to window mode
    pub const fn window_comparator() -> Self {
        Self {
            field: Field::COMP_MODE,
            value: ComparatorMode::Window.bits(),
        }
    }

    /// Set the comparator polarity to active-low
    pub const fn active_low() -> Self {
        Self {
            field: Field::COMP_POLARITY,
            value: ComparatorPolarity::ActiveLow.bits(),
        }
    }

    /// Set the comparator polarity to active-high
    pub const fn active_high() -> Self {
        Self {
            field: Field::COMP_POLARITY,
            value: ComparatorPolarity::ActiveHigh.bits(),
        }
    }

    /// Set the comparator to non-latching
    pub const fn non_latching() -> Self {
        Self {
            field: Field::COMP_LATCH,
            value: ComparatorLatch::NonLatching.bits(),
        }
    }

    /// Set the comparator to latching
    pub const fn latching() -> Self {
        Self {
            field: Field::COMP_LATCH,
            value: ComparatorLatch::Latching.bits(),
        }
    }

    /// The field this option writes
    pub const fn field(self) -> Field {
        self.field
    }

    /// The in-register value this option writes (masked on apply)
    pub const fn value(self) -> u16 {
        self.value
    }

    /// Compute the option that restores `field` to `prior`
    ///
    /// `prior` is the field's masked, in-place value as read back by the
    /// configuration engine. A binary field must hold one of its two
    /// known states; anything else is reported as [`CorruptedField`]
    /// rather than coerced. Multi-valued fields (multiplexer, gain, data
    /// rate, comparator queue) re-apply the raw prior value without
    /// validation.
    pub fn inverse_of(field: Field, prior: u16) -> Result<Self, CorruptedField> {
        if field.is_binary() && prior != 0 && prior != field.mask() {
            return Err(CorruptedField {
                register: field.register(),
                mask: field.mask(),
                value: prior,
            });
        }

        Ok(Self {
            field,
            value: prior,
        })
    }
}
