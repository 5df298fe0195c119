use crate::registers::{FrameRate, PowerMode, Register, ResetKind};
use crate::temp::Decoding;

/// Device settings applied by [`Amg88xx::init`](crate::Amg88xx::init).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub power: PowerMode,
    pub reset: ResetKind,
    pub frame_rate: FrameRate,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            power: PowerMode::Normal,
            reset: ResetKind::InitialReset,
            frame_rate: FrameRate::Fps10,
        }
    }
}

/// What a setter writes to its register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteMode {
    /// Write the new value as-is.
    Overwrite,
    /** Write the new value OR'd with the previously cached one. The cache still receives the
    new value alone, so clearing bits takes two writes. */
    Accumulate,
}

/// What [`Amg88xx::read_frame`](crate::Amg88xx::read_frame) does when a pixel read fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelErrorPolicy {
    /// Stop and return the read error.
    Abort,
    /// Leave the pixel at its previous value and carry on with the next one.
    KeepPrevious,
}

/// Driver behavior, chosen at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Policy {
    pub decoding: Decoding,
    pub writes: WriteMode,
    pub pixel_errors: PixelErrorPolicy,
}

impl Policy {
    /** Register traffic and decoding bit-for-bit identical to the established driver
    behavior: single-byte pixel reads, a sign test that never fires, OR-accumulating setters and
    ignored pixel read errors. */
    pub fn faithful() -> Self {
        Policy {
            decoding: Decoding::faithful(),
            writes: WriteMode::Accumulate,
            pixel_errors: PixelErrorPolicy::KeepPrevious,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            decoding: Decoding::default(),
            writes: WriteMode::Overwrite,
            pixel_errors: PixelErrorPolicy::Abort,
        }
    }
}

/// Last value requested through each setter. Everything starts at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorState {
    pub power_mode: u8,
    pub reset: u8,
    pub interrupt_control: u8,
    pub frame_rate: u8,
}

impl SensorState {
    pub(crate) fn slot(&mut self, reg: Register) -> &mut u8 {
        match reg {
            Register::PowerControl => &mut self.power_mode,
            Register::Reset => &mut self.reset,
            Register::InterruptControl => &mut self.interrupt_control,
            Register::FrameRate => &mut self.frame_rate,
            _ => unreachable!("register {:?} is not cached", reg),
        }
    }
}
