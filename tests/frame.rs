use amg88xx::*;
use embedded_hal::delay::DelayNs;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn init_transactions(addr: u8) -> Vec<I2cTransaction> {
    vec![
        I2cTransaction::write_read(addr, vec![0x00], vec![0x00]),
        I2cTransaction::write(addr, vec![0x00, 0x00]),
        I2cTransaction::write(addr, vec![0x01, 0x3F]),
        I2cTransaction::write(addr, vec![0x03, 0x00]),
        I2cTransaction::write(addr, vec![0x02, 0x00]),
    ]
}

#[test]
fn faithful_frame_every_byte_0x10() {
    let mut expectations = init_transactions(DEFAULT_ADDRESS);
    expectations.extend((0..PIXEL_COUNT).map(|i| {
        I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0x80 + (i as u8) * 2], vec![0x10])
    }));

    let mut amg = Amg88xx::with_policy(I2cMock::new(&expectations), DEFAULT_ADDRESS, Policy::faithful());
    amg.init(&mut NoDelay, &Config::default()).unwrap();

    let frame = amg.read_frame().unwrap();
    assert_eq!(frame.celsius(), [4.0; PIXEL_COUNT]);

    amg.free().done();
}

#[test]
fn frame_keeps_pixel_order() {
    // Pixel i reads as i + 1 quarter degrees, with odd pixels below zero.
    let expectations: Vec<_> = (0..PIXEL_COUNT)
        .map(|i| {
            let raw = (i as u16 + 1) | if i % 2 == 1 { 0x8000 } else { 0 };
            I2cTransaction::write_read(ALTERNATE_ADDRESS, vec![0x80 + (i as u8) * 2], raw.to_le_bytes().to_vec())
        })
        .collect();

    let mut amg = Amg88xx::new(I2cMock::new(&expectations), ALTERNATE_ADDRESS);
    let frame = amg.read_frame().unwrap();

    assert_eq!(frame.iter().count(), PIXEL_COUNT);
    for (i, t) in frame.iter().enumerate() {
        let expected = 0.25 * (i + 1) as f64;
        if i % 2 == 1 {
            assert_eq!(t.celsius(), -expected);
        } else {
            assert_eq!(t.celsius(), expected);
        }
    }

    let first_row: Vec<f64> = frame.rows().next().unwrap().iter().map(|t| t.celsius()).collect();
    assert_eq!(first_row, vec![0.25, -0.5, 0.75, -1.0, 1.25, -1.5, 1.75, -2.0]);

    amg.free().done();
}

#[test]
fn repeated_reads_are_independent() {
    let mut expectations = Vec::new();
    for byte in [0x28u8, 0x2C].iter() {
        expectations.extend((0..PIXEL_COUNT).map(|i| {
            I2cTransaction::write_read(DEFAULT_ADDRESS, vec![0x80 + (i as u8) * 2], vec![*byte, 0x00])
        }));
    }

    let mut amg = Amg88xx::new(I2cMock::new(&expectations), DEFAULT_ADDRESS);

    assert_eq!(amg.read_frame().unwrap().celsius(), [10.0; PIXEL_COUNT]);
    assert_eq!(amg.read_frame().unwrap().celsius(), [11.0; PIXEL_COUNT]);

    amg.free().done();
}
