//! Device session and single-conversion protocol
//!
//! [`Ads1x15`] owns the bus interface and is the only path through
//! which the configuration register is written. Construction applies a
//! default configuration (comparator disabled and in its safe state,
//! single-shot mode, 1600 SPS, widest gain range); afterwards the
//! session offers single-ended channel reads, reversible configuration
//! through [`ConfigOption`]s, and [`Channel`] handles bound to one
//! multiplexer setting.
//!
//! Every operation is a synchronous sequence of bus round trips on the
//! caller's thread; the only blocking point is the conversion-ready
//! poll, which is bounded by [`set_poll_limit`](Ads1x15::set_poll_limit).

use crate::channel::Channel;
use crate::config::ConfigOption;
use crate::registers::{decode_sample, DataRate, Field, Gain, MuxSetting, Register};
use crate::Error;

#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

#[cfg(feature = "async")]
use device_driver::AsyncRegisterInterface;

/// Default bound on conversion-ready status reads
///
/// At the slowest data rate (128 SPS) a conversion takes about 8 ms;
/// with the 100 us inter-poll delay the default bound leaves two orders
/// of magnitude of headroom before a stuck device is reported as
/// [`Error::ConversionTimeout`].
pub const DEFAULT_POLL_LIMIT: u32 = 10_000;

/// Delay between conversion-ready status reads
const POLL_INTERVAL_US: u32 = 100;

/// Default configuration applied by [`Ads1x15::new`], in order
///
/// Comparator disabled, non-latching, active-low, traditional mode;
/// single-shot measurements at 1600 SPS with the widest (+/-6.144 V)
/// input range.
pub const DEFAULT_CONFIG: [ConfigOption; 7] = [
    ConfigOption::disable_comparator(),
    ConfigOption::non_latching(),
    ConfigOption::active_low(),
    ConfigOption::traditional_comparator(),
    ConfigOption::single_shot(),
    ConfigOption::data_rate(DataRate::Sps1600),
    ConfigOption::gain(Gain::Fs6_144),
];

/// Driver session for one ADS1x15 device
///
/// Owns the bus interface exclusively. The driver assumes nothing else
/// mutates the device's registers out-of-band, and it is not internally
/// synchronized: concurrent use from multiple threads requires external
/// serialization.
pub struct Ads1x15<I> {
    interface: I,
    poll_limit: u32,
}

impl<I> Ads1x15<I> {
    /// Bound the conversion-ready poll to `attempts` status reads
    ///
    /// An expired poll fails with [`Error::ConversionTimeout`]. A bound
    /// of zero would never observe the status bit, so it is clamped
    /// to one.
    pub fn set_poll_limit(&mut self, attempts: u32) {
        self.poll_limit = attempts.max(1);
    }

    /// The current conversion-ready poll bound
    pub fn poll_limit(&self) -> u32 {
        self.poll_limit
    }

    /// Bind a [`Channel`] handle to one multiplexer setting
    ///
    /// The handle borrows the session; each of its reads selects the
    /// channel's input and restores the previous selection afterwards.
    pub fn channel(&mut self, mux: MuxSetting) -> Channel<'_, I> {
        Channel::new(self, mux)
    }

    /// Consume the session and return the bus interface
    pub fn release(self) -> I {
        self.interface
    }
}

#[cfg(not(feature = "async"))]
impl<I> Ads1x15<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new driver session and apply [`DEFAULT_CONFIG`]
    ///
    /// The seven default options are applied in their documented order,
    /// each as a separate read-modify-write. A failure aborts
    /// construction; options applied before the failure remain written
    /// to the device.
    pub fn new(interface: I) -> Result<Self, Error<I::Error>> {
        let mut driver = Self {
            interface,
            poll_limit: DEFAULT_POLL_LIMIT,
        };
        driver.apply_all(&DEFAULT_CONFIG)?;
        Ok(driver)
    }

    /// Read a 16-bit register
    pub fn read_register(&mut self, register: Register) -> Result<u16, Error<I::Error>> {
        let mut buf = [0u8; 2];
        self.interface
            .read_register(register.address(), Register::SIZE_BITS, &mut buf)
            .map_err(|cause| Error::Transport { register, cause })?;
        Ok(u16::from_be_bytes(buf))
    }

    fn write_raw(&mut self, register: Register, word: u16) -> Result<(), Error<I::Error>> {
        self.interface
            .write_register(register.address(), Register::SIZE_BITS, &word.to_be_bytes())
            .map_err(|cause| Error::Transport { register, cause })
    }

    /// Read-modify-write one field and return its prior masked value
    ///
    /// Sole path that writes the configuration register. Bits outside
    /// the field are written back exactly as read; a failed read skips
    /// the write.
    fn write_field(&mut self, field: Field, value: u16) -> Result<u16, Error<I::Error>> {
        let current = self.read_register(field.register())?;
        let prior = field.extract(current);
        self.write_raw(field.register(), field.insert(current, value))?;
        Ok(prior)
    }

    /// Apply one configuration option and return its inverse
    ///
    /// The returned option restores the field to the value it held
    /// before this call.
    pub fn apply(&mut self, option: ConfigOption) -> Result<ConfigOption, Error<I::Error>> {
        let prior = self.write_field(option.field(), option.value())?;
        Ok(ConfigOption::inverse_of(option.field(), prior)?)
    }

    /// Apply a sequence of options and return the inverse of the last
    ///
    /// Options are applied in order and the sequence aborts on the
    /// first failure: options already applied stay applied (there is no
    /// rollback), and the failing option's error is returned. Only the
    /// inverse of the last applied option is returned; callers needing
    /// full rollback must collect the inverse of each [`apply`] call
    /// and re-apply them in reverse order themselves.
    ///
    /// [`apply`]: Self::apply
    pub fn apply_all(
        &mut self,
        options: &[ConfigOption],
    ) -> Result<Option<ConfigOption>, Error<I::Error>> {
        let mut last = None;
        for &option in options {
            last = Some(self.apply(option)?);
        }
        Ok(last)
    }

    /// Single-ended read of channel 0..=3 against GND
    ///
    /// Selects the channel's multiplexer input (the selection stays in
    /// effect afterwards), triggers one conversion, polls to completion
    /// and returns the decoded sample in -2048..=2047. An index outside
    /// 0..=3 fails with [`Error::InvalidChannel`] before any bus I/O.
    pub fn read_single<D>(&mut self, channel: u8, delay: &mut D) -> Result<i16, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let Some(mux) = MuxSetting::single_ended(channel) else {
            return Err(Error::InvalidChannel(channel));
        };

        self.apply(ConfigOption::mux(mux))?;
        self.convert(delay)
    }

    /// Trigger a single conversion, poll to completion, decode
    pub(crate) fn convert<D>(&mut self, delay: &mut D) -> Result<i16, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        // Writing 1 to OS starts a conversion; reading it back reports
        // busy/idle, not the written value.
        self.write_field(Field::OS, Field::OS.mask())?;
        self.wait_ready(delay)?;

        let raw = self.read_register(Register::Conversion)?;
        Ok(decode_sample(raw.to_be_bytes()))
    }

    fn wait_ready<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        for _ in 0..self.poll_limit {
            let config = self.read_register(Register::Config)?;
            if Field::OS.extract(config) != 0 {
                return Ok(());
            }
            delay.delay_us(POLL_INTERVAL_US);
        }

        Err(Error::ConversionTimeout {
            polls: self.poll_limit,
        })
    }
}

#[cfg(feature = "async")]
impl<I> Ads1x15<I>
where
    I: AsyncRegisterInterface<AddressType = u8>,
{
    /// Create a new driver session and apply [`DEFAULT_CONFIG`]
    ///
    /// The seven default options are applied in their documented order,
    /// each as a separate read-modify-write. A failure aborts
    /// construction; options applied before the failure remain written
    /// to the device.
    pub async fn new(interface: I) -> Result<Self, Error<I::Error>> {
        let mut driver = Self {
            interface,
            poll_limit: DEFAULT_POLL_LIMIT,
        };
        driver.apply_all(&DEFAULT_CONFIG).await?;
        Ok(driver)
    }

    /// Read a 16-bit register
    pub async fn read_register(&mut self, register: Register) -> Result<u16, Error<I::Error>> {
        let mut buf = [0u8; 2];
        self.interface
            .read_register(register.address(), Register::SIZE_BITS, &mut buf)
            .await
            .map_err(|cause| Error::Transport { register, cause })?;
        Ok(u16::from_be_bytes(buf))
    }

    async fn write_raw(&mut self, register: Register, word: u16) -> Result<(), Error<I::Error>> {
        self.interface
            .write_register(register.address(), Register::SIZE_BITS, &word.to_be_bytes())
            .await
            .map_err(|cause| Error::Transport { register, cause })
    }

    /// Read-modify-write one field and return its prior masked value
    ///
    /// Sole path that writes the configuration register. Bits outside
    /// the field are written back exactly as read; a failed read skips
    /// the write.
    async fn write_field(&mut self, field: Field, value: u16) -> Result<u16, Error<I::Error>> {
        let current = self.read_register(field.register()).await?;
        let prior = field.extract(current);
        self.write_raw(field.register(), field.insert(current, value))
            .await?;
        Ok(prior)
    }

    /// Apply one configuration option and return its inverse
    ///
    /// The returned option restores the field to the value it held
    /// before this call.
    pub async fn apply(&mut self, option: ConfigOption) -> Result<ConfigOption, Error<I::Error>> {
        let prior = self.write_field(option.field(), option.value()).await?;
        Ok(ConfigOption::inverse_of(option.field(), prior)?)
    }

    /// Apply a sequence of options and return the inverse of the last
    ///
    /// Options are applied in order and the sequence aborts on the
    /// first failure: options already applied stay applied (there is no
    /// rollback), and the failing option's error is returned. Only the
    /// inverse of the last applied option is returned; callers needing
    /// full rollback must collect the inverse of each [`apply`] call
    /// and re-apply them in reverse order themselves.
    ///
    /// [`apply`]: Self::apply
    pub async fn apply_all(
        &mut self,
        options: &[ConfigOption],
    ) -> Result<Option<ConfigOption>, Error<I::Error>> {
        let mut last = None;
        for &option in options {
            last = Some(self.apply(option).await?);
        }
        Ok(last)
    }

    /// Single-ended read of channel 0..=3 against GND
    ///
    /// Selects the channel's multiplexer input (the selection stays in
    /// effect afterwards), triggers one conversion, polls to completion
    /// and returns the decoded sample in -2048..=2047. An index outside
    /// 0..=3 fails with [`Error::InvalidChannel`] before any bus I/O.
    pub async fn read_single<D>(
        &mut self,
        channel: u8,
        delay: &mut D,
    ) -> Result<i16, Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let Some(mux) = MuxSetting::single_ended(channel) else {
            return Err(Error::InvalidChannel(channel));
        };

        self.apply(ConfigOption::mux(mux)).await?;
        self.convert(delay).await
    }

    /// Trigger a single conversion, poll to completion, decode
    pub(crate) async fn convert<D>(&mut self, delay: &mut D) -> Result<i16, Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        // Writing 1 to OS starts a conversion; reading it back reports
        // busy/idle, not the written value.
        self.write_field(Field::OS, Field::OS.mask()).await?;
        self.wait_ready(delay).await?;

        let raw = self.read_register(Register::Conversion).await?;
        Ok(decode_sample(raw.to_be_bytes()))
    }

    async fn wait_ready<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        for _ in 0..self.poll_limit {
            let config = self.read_register(Register::Config).await?;
            if Field::OS.extract(config) != 0 {
                return Ok(());
            }
            delay.delay_us(POLL_INTERVAL_US).await;
        }

        Err(Error::ConversionTimeout {
            polls: self.poll_limit,
        })
    }
}
