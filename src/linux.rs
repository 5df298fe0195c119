//! Opening a sensor on a Linux `/dev/i2c-*` node.

extern crate std;

use core::fmt;
use std::path::Path;

use linux_embedded_hal::i2cdev::linux::LinuxI2CError;
use linux_embedded_hal::{Delay, I2CError, I2cdev};

use crate::{Amg88xx, Config, Error, Policy};

pub type LinuxAmg88xx = Amg88xx<I2cdev>;

#[derive(Debug)]
pub enum OpenError {
    /// The bus device node could not be opened.
    Bus(LinuxI2CError),
    /// The sensor did not respond, or a setup write failed.
    Device(Error<I2CError>),
}

impl OpenError {
    /// Whether the sensor could not be reached at all (as opposed to failing mid-setup).
    pub fn is_connection(&self) -> bool {
        matches!(self, OpenError::Bus(_) | OpenError::Device(Error::ConnectionError(_)))
    }
}

impl fmt::Display for OpenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OpenError::Bus(e) => write!(f, "unable to open i2c bus: {}", e),
            OpenError::Device(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for OpenError {}

impl From<LinuxI2CError> for OpenError {
    fn from(err: LinuxI2CError) -> OpenError {
        OpenError::Bus(err)
    }
}

impl From<Error<I2CError>> for OpenError {
    fn from(err: Error<I2CError>) -> OpenError {
        OpenError::Device(err)
    }
}

/** Open the bus at `path`, then probe and initialize the sensor at `address`.

If initialization fails the half-configured driver is dropped, which closes the device node,
before the error is returned. */
pub fn open<P>(path: P, address: u8, config: &Config, policy: Policy) -> Result<LinuxAmg88xx, OpenError>
where
    P: AsRef<Path>,
{
    let i2c = I2cdev::new(path)?;
    let mut amg = Amg88xx::with_policy(i2c, address, policy);

    amg.init(&mut Delay, config)?;
    Ok(amg)
}
