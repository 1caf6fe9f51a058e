//! Mock register interface for testing the ADS1x15 driver

use device_driver::RegisterInterface;
use std::cell::RefCell;
use std::rc::Rc;

const CONFIG_ADDR: u8 = 0x01;
const OS_MASK: u16 = 1 << 15;

/// Records operations performed on the mock interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Read register operation
    ReadRegister {
        /// Register address
        address: u8,
        /// Value that was returned
        value: u16,
    },
    /// Write register operation
    WriteRegister {
        /// Register address
        address: u8,
        /// Value that was written
        value: u16,
    },
}

/// Shared state for the mock interface (uses interior mutability)
#[derive(Debug)]
struct MockState {
    /// Simulated register values; the config register is stored without
    /// its OS bit, which is synthesized on read from the busy state
    registers: [u16; 4],

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection
    fail_next_read: bool,
    fail_next_write: bool,
    /// Countdown to a failing read (1 = the very next read fails)
    fail_read_countdown: Option<u32>,
    /// Countdown to a failing write (1 = the very next write fails)
    fail_write_countdown: Option<u32>,

    /// Number of config reads that report busy after each trigger
    busy_reads: u32,
    pending_busy: u32,
    /// Conversion never completes
    stuck: bool,
}

impl MockState {
    fn new() -> Self {
        Self {
            // Power-on defaults: config 0x8583, thresholds 0x8000/0x7FFF
            registers: [0x0000, 0x0583, 0x8000, 0x7FFF],
            operations: Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
            fail_read_countdown: None,
            fail_write_countdown: None,
            busy_reads: 0,
            pending_busy: 0,
            stuck: false,
        }
    }

    /// The config register as the device would return it right now
    fn config_view(&self) -> u16 {
        let os = if self.stuck || self.pending_busy > 0 {
            0
        } else {
            OS_MASK
        };
        self.registers[CONFIG_ADDR as usize] | os
    }
}

/// Mock interface simulating the four 16-bit device registers
///
/// Writing the config register with the OS bit set starts a simulated
/// conversion: the next `busy_reads` reads of the config register
/// report busy (OS = 0) before the device goes idle again.
#[derive(Clone)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

impl MockInterface {
    /// Create a new mock interface with power-on register values
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    /// Stored value of a register (config is stored without its OS bit)
    pub fn register(&self, address: u8) -> u16 {
        self.state.borrow().registers[(address & 0x03) as usize]
    }

    /// The config register as a read would currently return it
    pub fn config(&self) -> u16 {
        self.state.borrow().config_view()
    }

    /// Set the raw conversion-result register
    pub fn set_conversion_result(&self, raw: u16) {
        self.state.borrow_mut().registers[0] = raw;
    }

    /// Report busy for `n` config reads after each conversion trigger
    pub fn set_conversion_busy_reads(&self, n: u32) {
        self.state.borrow_mut().busy_reads = n;
    }

    /// Simulate a device that never finishes a conversion
    pub fn set_conversion_stuck(&self, stuck: bool) {
        self.state.borrow_mut().stuck = stuck;
    }

    /// Inject a read failure on the next read operation
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Inject a failure on the nth upcoming read (1 = the next read)
    pub fn fail_nth_read(&self, n: u32) {
        self.state.borrow_mut().fail_read_countdown = Some(n);
    }

    /// Inject a failure on the nth upcoming write (1 = the next write)
    pub fn fail_nth_write(&self, n: u32) {
        self.state.borrow_mut().fail_write_countdown = Some(n);
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Count config-register status reads after the last config write
    pub fn status_reads_after_trigger(&self) -> usize {
        let ops = self.operations();
        let trigger = ops
            .iter()
            .rposition(|op| matches!(op, Operation::WriteRegister { address, .. } if *address == CONFIG_ADDR));
        match trigger {
            Some(idx) => ops[idx + 1..]
                .iter()
                .filter(|op| {
                    matches!(op, Operation::ReadRegister { address, .. } if *address == CONFIG_ADDR)
                })
                .count(),
            None => 0,
        }
    }
}

/// Mock error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
}

impl RegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Communication);
        }
        if let Some(countdown) = state.fail_read_countdown {
            if countdown <= 1 {
                state.fail_read_countdown = None;
                return Err(MockError::Communication);
            }
            state.fail_read_countdown = Some(countdown - 1);
        }

        let value = if address == CONFIG_ADDR {
            let value = state.config_view();
            if state.pending_busy > 0 {
                state.pending_busy -= 1;
            }
            value
        } else {
            state.registers[(address & 0x03) as usize]
        };

        read_data.copy_from_slice(&value.to_be_bytes());
        state.operations.push(Operation::ReadRegister { address, value });

        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }
        if let Some(countdown) = state.fail_write_countdown {
            if countdown <= 1 {
                state.fail_write_countdown = None;
                return Err(MockError::Communication);
            }
            state.fail_write_countdown = Some(countdown - 1);
        }

        let value = u16::from_be_bytes([write_data[0], write_data[1]]);
        state
            .operations
            .push(Operation::WriteRegister { address, value });

        if address == CONFIG_ADDR {
            state.registers[CONFIG_ADDR as usize] = value & !OS_MASK;
            // Writing 1 to OS starts a conversion
            if value & OS_MASK != 0 {
                state.pending_busy = state.busy_reads;
            }
        } else {
            state.registers[(address & 0x03) as usize] = value;
        }

        Ok(())
    }
}

impl Default for MockInterface {
    fn default() -> Self {
        Self::new()
    }
}
