use core::fmt;
use core::ops::Neg;

use fixed::types::I12F4;
use fixed_macro::fixed;

/// Degrees Celsius per least significant bit of a pixel register.
pub const PIXEL_RESOLUTION: I12F4 = fixed!(0.25: I12F4);
/// Degrees Celsius per least significant bit of the thermistor register.
pub const THERMISTOR_RESOLUTION: I12F4 = fixed!(0.0625: I12F4);

const MAGNITUDE_MASK: u16 = 0x07FF;
const PIXEL_SIGN: u16 = 0x8000;
const THERMISTOR_SIGN: u16 = 0x0800;

/* Invariant: both resolutions are exact in I12F4, and the largest magnitude
(2047) fits before scaling. */

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Default, Clone, Copy)]
pub struct Temperature(pub(crate) I12F4);

impl Temperature {
    fn from_magnitude(magnitude: u16, resolution: I12F4) -> Self {
        Temperature(I12F4::from_num(magnitude & MAGNITUDE_MASK) * resolution)
    }

    pub fn celsius(self) -> f64 {
        self.0.to_num()
    }
}

impl Neg for Temperature {
    type Output = Temperature;

    fn neg(self) -> Self::Output {
        Temperature(-self.0)
    }
}

impl From<Temperature> for I12F4 {
    fn from(temp: Temperature) -> Self {
        temp.0
    }
}

impl From<Temperature> for f32 {
    fn from(temp: Temperature) -> Self {
        temp.0.to_num()
    }
}

impl From<Temperature> for f64 {
    fn from(temp: Temperature) -> Self {
        temp.0.to_num()
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Temperature {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=f32}", f32::from(*self))
    }
}

/// How bit 15 of a pixel sample is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignTest {
    /** Tests `raw & 0x8000 == 1`, which never holds, so every pixel decodes as positive.
    Kept for parity with existing deployments that rely on it. */
    Faithful,
    /// Bit 15 set means negative.
    Corrected,
}

impl SignTest {
    #[allow(clippy::bad_bit_mask)]
    fn is_negative(self, raw: u16) -> bool {
        match self {
            SignTest::Faithful => raw & PIXEL_SIGN == 1,
            SignTest::Corrected => raw & PIXEL_SIGN != 0,
        }
    }
}

/// How the 16-bit sample for a pixel is fetched from its two registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelWord {
    /// Read only the low register and repeat it as the high byte.
    SingleByteDuplicated,
    /// Read both registers, low byte first.
    LittleEndian,
}

impl PixelWord {
    /// Number of bytes fetched per pixel.
    pub fn width(self) -> usize {
        match self {
            PixelWord::SingleByteDuplicated => 1,
            PixelWord::LittleEndian => 2,
        }
    }

    /// Builds the raw sample from the `width()` bytes read off the bus.
    pub fn assemble(self, bytes: &[u8]) -> u16 {
        match self {
            PixelWord::SingleByteDuplicated => u16::from_be_bytes([bytes[0], bytes[0]]),
            PixelWord::LittleEndian => u16::from_le_bytes([bytes[0], bytes[1]]),
        }
    }
}

/// Pixel decode strategy, fixed when the driver is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decoding {
    pub sign: SignTest,
    pub word: PixelWord,
}

impl Decoding {
    pub fn faithful() -> Self {
        Decoding {
            sign: SignTest::Faithful,
            word: PixelWord::SingleByteDuplicated,
        }
    }

    /// Converts a signed-magnitude pixel sample (bit 15 sign, bits 0-10 magnitude).
    pub fn pixel(&self, raw: u16) -> Temperature {
        let temp = Temperature::from_magnitude(raw, PIXEL_RESOLUTION);

        if self.sign.is_negative(raw) {
            -temp
        } else {
            temp
        }
    }
}

impl Default for Decoding {
    fn default() -> Self {
        Decoding {
            sign: SignTest::Corrected,
            word: PixelWord::LittleEndian,
        }
    }
}

/// Converts the thermistor register pair (bit 11 sign, bits 0-10 magnitude).
pub fn thermistor(raw: u16) -> Temperature {
    let temp = Temperature::from_magnitude(raw, THERMISTOR_RESOLUTION);

    if raw & THERMISTOR_SIGN != 0 {
        -temp
    } else {
        temp
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;

    use super::*;

    const CORRECTED: Decoding = Decoding {
        sign: SignTest::Corrected,
        word: PixelWord::LittleEndian,
    };

    #[test]
    fn magnitudes_scale_by_quarter_degree() {
        let faithful = Decoding::faithful();

        for m in 0..=2047u16 {
            assert_eq!(faithful.pixel(m).celsius(), 0.25 * f64::from(m));
            assert_eq!(CORRECTED.pixel(m).celsius(), 0.25 * f64::from(m));
        }
    }

    #[test]
    fn faithful_ignores_sign_bit() {
        let faithful = Decoding::faithful();

        for m in 0..=2047u16 {
            assert_eq!(faithful.pixel(m | 0x8000), faithful.pixel(m));
        }
    }

    #[test]
    fn corrected_negates() {
        for m in 0..=2047u16 {
            assert_eq!(CORRECTED.pixel(m | 0x8000).celsius(), -0.25 * f64::from(m));
        }
    }

    #[test]
    fn reserved_bits_ignored() {
        assert_eq!(CORRECTED.pixel(0x7810), CORRECTED.pixel(0x0010));
    }

    #[test]
    fn assemble_words() {
        assert_eq!(PixelWord::SingleByteDuplicated.assemble(&[0x10]), 0x1010);
        assert_eq!(PixelWord::LittleEndian.assemble(&[0x34, 0x12]), 0x1234);
        assert_eq!(PixelWord::SingleByteDuplicated.width(), 1);
        assert_eq!(PixelWord::LittleEndian.width(), 2);
    }

    #[test]
    fn thermistor_sixteenth_degree() {
        assert_eq!(thermistor(0x0190).celsius(), 25.0);
        assert_eq!(thermistor(0x0801).celsius(), -0.0625);
        assert_eq!(thermistor(0x07FF).celsius(), 127.9375);
    }

    #[test]
    fn display() {
        assert_eq!((-Temperature(fixed!(1.25: I12F4))).to_string(), "-1.25");
    }
}
