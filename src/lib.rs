/*! `amg88xx` is an [`embedded_hal`](https://github.com/rust-embedded/embedded-hal) crate for
accessing Panasonic AMG88xx ("Grid-EYE") 8x8 infrared array sensors over an I2C bus.

The sensor reports 64 pixel temperatures, one per two-byte register starting at 0x80. Each
pixel is a signed-magnitude value in units of 0.25 C. Four single-byte registers control the
device:

* Power Control Register ([`PowerMode`])
* Reset Register ([`ResetKind`])
* Frame Rate Register ([`FrameRate`])
* Interrupt Control Register ([`InterruptControl`])

[`Amg88xx::init`] probes the sensor, writes those four registers in that order and then waits
100 ms for the first frame to settle. After that, [`Amg88xx::read_frame`] returns a [`Frame`]
of [`Temperature`]s.

How pixels are fetched and decoded, how setters write their registers and what happens when a
pixel read fails are all chosen up front through a [`Policy`]. [`Policy::default`] is the
behavior described by the datasheet; [`Policy::faithful`] reproduces the register traffic of
earlier drivers for this part exactly, quirks included.

The driver caches the last value requested through each setter. At present, the `amg88xx`
crate therefore _only works on I2C buses with a single controller._

```ignore
let mut amg = Amg88xx::new(i2c, DEFAULT_ADDRESS);
amg.init(&mut delay, &Config::default())?;
let frame = amg.read_frame()?;
```

With the `linux` feature, [`linux::open`] opens a `/dev/i2c-*` node and initializes the sensor
in one step. The `defmt` feature adds `defmt::Format` implementations and debug logging. */
#![no_std]
#![doc(html_root_url = "https://docs.rs/amg88xx/0.1.0")]

use core::fmt;
use core::result::Result;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

#[macro_use]
mod logging;

mod config;
mod frame;
mod registers;
mod temp;

#[cfg(all(feature = "linux", any(target_os = "linux", target_os = "android")))]
pub mod linux;

pub use config::*;
pub use frame::Frame;
pub use registers::{
    FrameRate, InterruptControl, InterruptMode, PowerMode, ResetKind, Status, ALTERNATE_ADDRESS,
    DEFAULT_ADDRESS, PIXEL_COUNT, ROW_LEN,
};
pub use temp::{
    thermistor, Decoding, PixelWord, SignTest, Temperature, PIXEL_RESOLUTION,
    THERMISTOR_RESOLUTION,
};

use registers::{pixel_register, Register};

/// Time the sensor needs after setup before pixel registers hold valid data.
pub const WARMUP_MS: u32 = 100;

/** A struct for describing how to read and write an AMG88xx sensor's registers via an
[`embedded_hal`] implementation (for a single-controller I2C bus).

The struct owns the bus. Use [`Amg88xx::free`] to get it back; dropping the struct drops the
bus along with it. */
pub struct Amg88xx<I2C> {
    i2c: I2C,
    address: u8,
    policy: Policy,
    state: SensorState,
}

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Enum for describing possible error conditions when reading/writing an AMG88xx sensor.
pub enum Error<E> {
    /** The sensor did not answer the probe in [`Amg88xx::init`]. No register was written.
    Contains the bus error. */
    ConnectionError(E),
    /// Reading a register failed. Contains the bus error.
    ReadError(E),
    /// Writing a register failed. Contains the bus error.
    WriteError(E),
}

impl<E> fmt::Display for Error<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ConnectionError(e) => write!(f, "sensor did not respond: {:?}", e),
            Error::ReadError(e) => write!(f, "register read failed: {:?}", e),
            Error::WriteError(e) => write!(f, "register write failed: {:?}", e),
        }
    }
}

impl<I2C, E> Amg88xx<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self::with_policy(i2c, address, Policy::default())
    }

    pub fn with_policy(i2c: I2C, address: u8, policy: Policy) -> Self {
        Amg88xx {
            i2c,
            address,
            policy,
            state: SensorState::default(),
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn state(&self) -> &SensorState {
        &self.state
    }

    /** Bring the sensor into a readable state.

    The sensor is probed first; if it does not acknowledge, [`Error::ConnectionError`] is
    returned and nothing is written. Otherwise the power mode, reset, interrupt control
    (disabled) and frame rate registers are written in that order, followed by a blocking
    [`WARMUP_MS`] delay. */
    pub fn init<D>(&mut self, delay: &mut D, config: &Config) -> Result<(), Error<E>>
    where
        D: DelayNs,
    {
        self.probe()?;
        debug!("amg88xx: found sensor at {=u8:#x}", self.address);

        self.set_mode(config.power)?;
        self.reset(config.reset)?;
        self.set_interrupt_control(InterruptControl::new())?;
        self.set_frame_rate(config.frame_rate)?;

        delay.delay_ms(WARMUP_MS);
        Ok(())
    }

    fn probe(&mut self) -> Result<(), Error<E>> {
        let mut buf = [0u8; 1];

        self.i2c
            .write_read(self.address, &[Register::PowerControl.into()], &mut buf)
            .map_err(Error::ConnectionError)
    }

    pub fn set_mode(&mut self, mode: PowerMode) -> Result<(), Error<E>> {
        self.write_setting(Register::PowerControl, mode.into())
    }

    pub fn reset(&mut self, kind: ResetKind) -> Result<(), Error<E>> {
        self.write_setting(Register::Reset, kind.into())
    }

    pub fn set_interrupt_control(&mut self, ctrl: InterruptControl) -> Result<(), Error<E>> {
        self.write_setting(Register::InterruptControl, ctrl.into())
    }

    pub fn set_frame_rate(&mut self, rate: FrameRate) -> Result<(), Error<E>> {
        self.write_setting(Register::FrameRate, rate.into())
    }

    // The cache only changes once the write went through.
    fn write_setting(&mut self, reg: Register, val: u8) -> Result<(), Error<E>> {
        let out = match self.policy.writes {
            WriteMode::Overwrite => val,
            WriteMode::Accumulate => val | *self.state.slot(reg),
        };

        self.write_reg(reg, out)?;
        *self.state.slot(reg) = val;
        Ok(())
    }

    fn write_reg(&mut self, reg: Register, val: u8) -> Result<(), Error<E>> {
        trace!("amg88xx: write {=u8:#x} <- {=u8:#x}", u8::from(reg), val);

        self.i2c
            .write(self.address, &[reg.into(), val])
            .map_err(Error::WriteError)
    }

    fn read_regs(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Error<E>> {
        self.i2c
            .write_read(self.address, &[reg], buf)
            .map_err(Error::ReadError)
    }

    /// Read and decode a single pixel. Panics if `index` is not below [`PIXEL_COUNT`].
    pub fn read_pixel(&mut self, index: usize) -> Result<Temperature, Error<E>> {
        let reg = pixel_register(index);
        let decoding = self.policy.decoding;
        let mut buf = [0u8; 2];
        let raw = &mut buf[..decoding.word.width()];

        self.read_regs(reg, raw)?;
        Ok(decoding.pixel(decoding.word.assemble(raw)))
    }

    /// Read all 64 pixels into a new [`Frame`]. Pixels skipped under
    /// [`PixelErrorPolicy::KeepPrevious`] read as 0 C.
    pub fn read_frame(&mut self) -> Result<Frame, Error<E>> {
        let mut frame = Frame::default();

        self.read_frame_into(&mut frame)?;
        Ok(frame)
    }

    /// Read all 64 pixels into an existing [`Frame`]. Pixels skipped under
    /// [`PixelErrorPolicy::KeepPrevious`] keep whatever `frame` held before.
    pub fn read_frame_into(&mut self, frame: &mut Frame) -> Result<(), Error<E>> {
        for (index, pixel) in frame.iter_mut().enumerate() {
            match self.read_pixel(index) {
                Ok(temp) => *pixel = temp,
                Err(e) => match self.policy.pixel_errors {
                    PixelErrorPolicy::Abort => return Err(e),
                    PixelErrorPolicy::KeepPrevious => {
                        warn!("amg88xx: pixel {=usize} unreadable, keeping last value", index);
                    }
                },
            }
        }

        Ok(())
    }

    /// Ambient temperature from the on-chip thermistor, in steps of 0.0625 C.
    pub fn thermistor(&mut self) -> Result<Temperature, Error<E>> {
        let mut buf = [0u8; 2];

        self.read_regs(Register::Thermistor.into(), &mut buf)?;
        Ok(thermistor(u16::from_le_bytes(buf)))
    }

    pub fn status(&mut self) -> Result<Status, Error<E>> {
        let mut buf = [0u8; 1];

        self.read_regs(Register::Status.into(), &mut buf)?;
        Ok(Status::from(buf[0]))
    }

    /// Clear every flag set in `flags`.
    pub fn clear_status(&mut self, flags: Status) -> Result<(), Error<E>> {
        self.write_reg(Register::StatusClear, flags.into())
    }

    pub fn free(self) -> I2C {
        self.i2c
    }
}
