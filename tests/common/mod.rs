use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

pub struct UnimplementedHal;

impl ErrorType for UnimplementedHal {
    type Error = ErrorKind;
}

impl I2c for UnimplementedHal {
    fn transaction(&mut self, _address: u8, _operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

cfg_if::cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        use linux_embedded_hal::{Delay, I2cdev};
        pub type HalImpl = I2cdev;
        pub type DelayImpl = Delay;
    } else {
        pub type HalImpl = UnimplementedHal;
        pub type DelayImpl = NoDelay;
    }
}

pub fn setup() -> (HalImpl, DelayImpl) {
    cfg_if::cfg_if! {
        if #[cfg(any(target_os = "linux", target_os = "android"))] {
            // FIXME: Should integration tests panic?
            (I2cdev::new("/dev/i2c-1").unwrap(), Delay)
        } else {
            (UnimplementedHal {}, NoDelay)
        }
    }
}
