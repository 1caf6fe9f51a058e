//! Channel handles bound to one multiplexer input
//!
//! A [`Channel`] ties a driver session to a fixed multiplexer setting
//! so that repeated reads of the same input need not re-specify it.
//! The handle borrows the session mutably, so the borrow checker
//! guarantees it cannot outlive the session and that no other access
//! interleaves with its reads.

use crate::config::ConfigOption;
use crate::registers::MuxSetting;
use crate::{Ads1x15, Error};

#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

#[cfg(feature = "async")]
use device_driver::AsyncRegisterInterface;

/// A driver session bound to one multiplexer setting
///
/// Created via [`Ads1x15::channel`]. Handles are lightweight and carry
/// no device state; dropping one needs no cleanup.
pub struct Channel<'a, I> {
    driver: &'a mut Ads1x15<I>,
    mux: MuxSetting,
}

impl<'a, I> Channel<'a, I> {
    pub(crate) fn new(driver: &'a mut Ads1x15<I>, mux: MuxSetting) -> Self {
        Self { driver, mux }
    }

    /// The multiplexer setting this channel is bound to
    pub fn mux(&self) -> MuxSetting {
        self.mux
    }
}

#[cfg(not(feature = "async"))]
impl<I> Channel<'_, I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Perform one conversion on this channel's input
    ///
    /// Selects the bound multiplexer setting, runs a single conversion,
    /// then restores the multiplexer to whatever it was before the
    /// call. If the restore write fails the sample is withheld and the
    /// failure is reported as [`Error::Restore`]: the device is no
    /// longer in the configuration the caller expects.
    pub fn read<D>(&mut self, delay: &mut D) -> Result<i16, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let restore = self.driver.apply(ConfigOption::mux(self.mux))?;
        let sample = self.driver.convert(delay)?;

        self.driver.apply(restore).map_err(|err| match err {
            Error::Transport { register, cause } => Error::Restore { register, cause },
            other => other,
        })?;

        Ok(sample)
    }
}

#[cfg(feature = "async")]
impl<I> Channel<'_, I>
where
    I: AsyncRegisterInterface<AddressType = u8>,
{
    /// Perform one conversion on this channel's input
    ///
    /// Selects the bound multiplexer setting, runs a single conversion,
    /// then restores the multiplexer to whatever it was before the
    /// call. If the restore write fails the sample is withheld and the
    /// failure is reported as [`Error::Restore`]: the device is no
    /// longer in the configuration the caller expects.
    pub async fn read<D>(&mut self, delay: &mut D) -> Result<i16, Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let restore = self.driver.apply(ConfigOption::mux(self.mux)).await?;
        let sample = self.driver.convert(delay).await?;

        self.driver.apply(restore).await.map_err(|err| match err {
            Error::Transport { register, cause } => Error::Restore { register, cause },
            other => other,
        })?;

        Ok(sample)
    }
}
