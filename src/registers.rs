use core::convert::TryFrom;

use modular_bitfield::prelude::*;

/// I2C address with the AD_SELECT pin pulled high (the breakout board default).
pub const DEFAULT_ADDRESS: u8 = 0x69;
/// I2C address with the AD_SELECT pin tied to ground.
pub const ALTERNATE_ADDRESS: u8 = 0x68;

/// Number of pixels in one frame (8 rows of 8 columns).
pub const PIXEL_COUNT: usize = 64;
/// Pixels per row.
pub const ROW_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Register {
    PowerControl = 0x00,
    Reset = 0x01,
    FrameRate = 0x02,
    InterruptControl = 0x03,
    Status = 0x04,
    StatusClear = 0x05,
    Thermistor = 0x0E,
    Pixels = 0x80,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg as u8
    }
}

/// Register holding the low byte of pixel `index`. Each pixel occupies two registers.
pub(crate) fn pixel_register(index: usize) -> u8 {
    if index >= PIXEL_COUNT {
        panic!("Pixel index must be between 0 and 63 (inclusive).");
    }

    u8::from(Register::Pixels) + ((index as u8) << 1)
}

macro_rules! impl_setting {
    ( $(#[$meta:meta])* $type:ident { $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)? } ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[repr(u8)]
        pub enum $type {
            $(
                $(#[$vmeta])*
                $variant = $val
            ),+
        }

        impl From<$type> for u8 {
            fn from(setting: $type) -> u8 {
                setting as u8
            }
        }

        /// Unknown bytes are handed back as the error.
        impl TryFrom<u8> for $type {
            type Error = u8;

            fn try_from(val: u8) -> Result<Self, Self::Error> {
                match val {
                    $( v if v == $val => Ok($type::$variant), )+
                    _ => Err(val),
                }
            }
        }
    }
}

impl_setting!(
    /// Operating mode, written to the power control register (0x00).
    PowerMode {
        Normal = 0x00,
        Sleep = 0x01,
        /// Stand-by, one frame every 60 seconds.
        StandBy60 = 0x20,
        /// Stand-by, one frame every 10 seconds.
        StandBy10 = 0x21,
    }
);

impl_setting!(
    /// Software reset kinds, written to the reset register (0x01).
    ResetKind {
        /// Clears the status register, interrupt flag and interrupt table.
        FlagReset = 0x30,
        /// Flag reset, then return every register to its initial setting.
        InitialReset = 0x3F,
    }
);

impl_setting!(
    /// Frame rate selector, written to register 0x02.
    FrameRate {
        Fps10 = 0x00,
        Fps1 = 0x01,
    }
);

impl FrameRate {
    /// Time between two frames, in milliseconds.
    pub fn period_ms(self) -> u32 {
        match self {
            FrameRate::Fps10 => 100,
            FrameRate::Fps1 => 1000,
        }
    }
}

/// How the interrupt threshold is compared against pixel values.
#[derive(BitfieldSpecifier, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptMode {
    Difference = 0,
    Absolute = 1,
}

/** Interrupt control register (0x03).

`InterruptControl::new()` is all zeroes, which disables the interrupt output. */
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptControl {
    pub enabled: bool,
    pub mode: InterruptMode,
    #[skip]
    __: B6,
}

impl From<InterruptControl> for u8 {
    fn from(ctrl: InterruptControl) -> u8 {
        ctrl.into_bytes()[0]
    }
}

impl From<u8> for InterruptControl {
    fn from(val: u8) -> Self {
        InterruptControl::from_bytes([val])
    }
}

/** Status register (0x04). The status clear register (0x05) uses the same layout: write a
set flag to clear it. */
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    #[skip]
    __: B1,
    pub interrupt: bool,
    pub pixel_overflow: bool,
    pub thermistor_overflow: bool,
    #[skip]
    __: B4,
}

impl From<Status> for u8 {
    fn from(status: Status) -> u8 {
        status.into_bytes()[0]
    }
}

impl From<u8> for Status {
    fn from(val: u8) -> Self {
        Status::from_bytes([val])
    }
}
