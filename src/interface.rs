//! Bus interface implementation for the ADS1x15
//!
//! This module provides an implementation of the `device-driver`
//! register interface traits for I2C communication with the ADS1x15.
//! The driver itself only depends on the traits, so tests (or other
//! transports) can substitute their own implementation.

use crate::I2C_ADDRESS_GND;

use device_driver::RegisterInterface;

/// I2C interface for the ADS1x15
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x48, ADDR pin to GND)
    ///
    /// This is the most common configuration; the ADDR pin is tied to
    /// ground or left on a board-level pull-down.
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_GND,
        }
    }

    /// Create a new I2C interface with an explicit device address
    ///
    /// The ADS1x15 responds on one of four addresses selected by the
    /// ADDR pin strapping: [`I2C_ADDRESS_GND`](crate::I2C_ADDRESS_GND),
    /// [`I2C_ADDRESS_VDD`](crate::I2C_ADDRESS_VDD),
    /// [`I2C_ADDRESS_SDA`](crate::I2C_ADDRESS_SDA) or
    /// [`I2C_ADDRESS_SCL`](crate::I2C_ADDRESS_SCL).
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        // Register pointer followed by the register bytes (at most 2)
        let mut buffer = [0u8; 3];
        buffer[0] = address;
        let len = write_data.len().min(2);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}

#[cfg(feature = "async")]
impl<I2C, E> device_driver::AsyncRegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits;
        self.i2c
            .write_read(self.address, &[address], read_data)
            .await
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits;
        let mut buffer = [0u8; 3];
        buffer[0] = address;
        let len = write_data.len().min(2);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len]).await
    }
}
