use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use amg88xx::*;

mod common;

#[test]
#[ignore = "needs an AMG88xx on /dev/i2c-1"]
fn test_sample() {
    let (hal, delay) = common::setup();
    #[allow(unused_mut)]
    let mut amg = Amg88xx::new(hal, DEFAULT_ADDRESS);

    #[cfg(any(target_os = "linux", target_os = "android"))]
    sample(amg, delay);
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    unimplemented(amg, delay);
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn sample<T, D>(mut amg: Amg88xx<T>, mut delay: D) where T: I2c, D: DelayNs {
    amg.init(&mut delay, &Config::default()).unwrap();

    // This test only works if nothing in view is below freezing or above boiling!
    let frame = amg.read_frame().unwrap();
    assert!(frame.iter().all(|t| t.celsius() > 0.0 && t.celsius() < 100.0));

    let ambient = amg.thermistor().unwrap();
    assert!(ambient.celsius() > 0.0);
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn unimplemented<T, D>(mut amg: Amg88xx<T>, mut delay: D) where T: I2c, D: DelayNs {
    assert!(amg.init(&mut delay, &Config::default()).is_err());
}
