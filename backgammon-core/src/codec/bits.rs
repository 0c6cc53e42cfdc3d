//! Least-significant-bit-first bit packing over fixed byte buffers

/// Appends bits into a fixed-size buffer, low bit of each byte first
pub(crate) struct BitWriter<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> BitWriter<N> {
    pub fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    /// Append one bit; returns false once the buffer is full
    pub fn push_bit(&mut self, bit: bool) -> bool {
        let Some(byte) = self.bytes.get_mut(self.len / 8) else {
            return false;
        };
        if bit {
            *byte |= 1 << (self.len % 8);
        }
        self.len += 1;
        true
    }

    /// Append the low `width` bits of `value`, least significant first
    pub fn push_bits(&mut self, value: u32, width: u32) -> bool {
        (0..width).all(|i| self.push_bit((value >> i) & 1 == 1))
    }

    pub fn into_bytes(self) -> [u8; N] {
        self.bytes
    }
}

/// Reads bits back in the order [`BitWriter`] wrote them
pub(crate) struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = self.bytes.get(self.pos / 8)?;
        let bit = (byte >> (self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    pub fn read_bits(&mut self, width: u32) -> Option<u32> {
        let mut value = 0;
        for i in 0..width {
            if self.read_bit()? {
                value |= 1 << i;
            }
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_bit_first() {
        let mut writer = BitWriter::<2>::new();
        writer.push_bit(true);
        writer.push_bit(false);
        writer.push_bit(true);
        assert_eq!(writer.into_bytes(), [0b101, 0]);
    }

    #[test]
    fn test_fields_span_bytes() {
        let mut writer = BitWriter::<2>::new();
        assert!(writer.push_bits(0b11, 4));
        assert!(writer.push_bits(0x1ff, 9));
        let bytes = writer.into_bytes();
        assert_eq!(bytes, [0xf3, 0x1f]);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(4), Some(0b11));
        assert_eq!(reader.read_bits(9), Some(0x1ff));
        assert_eq!(reader.read_bits(3), Some(0));
        assert_eq!(reader.read_bit(), None);
    }

    #[test]
    fn test_writer_stops_when_full() {
        let mut writer = BitWriter::<1>::new();
        assert!(writer.push_bits(0xff, 8));
        assert!(!writer.push_bit(true));
    }
}
