const CRC_TABLE: [u32; 256] = {
    let mut table = [0; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut i = 0;
        while i < 8 {
            if c & 1 != 0 {
                c = 0xedb88320 ^ (c >> 1);
            } else {
                c >>= 1;
            }
            i += 1;
        }
        table[n as usize] = c;
        n += 1;
    }
    table
};

/// Running CRC-32 as used by PNG chunks. A chunk's CRC covers its type and
/// data, so callers usually feed two slices.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Crc(u32);

impl Crc {
    pub(crate) const fn new() -> Self {
        Self(0xffffffff)
    }

    pub(crate) fn update(&mut self, data: &[u8]) -> &mut Self {
        for &b in data {
            let index = (self.0 ^ b as u32) & 0xff;
            self.0 = CRC_TABLE[index as usize] ^ (self.0 >> 8);
        }
        self
    }

    pub(crate) const fn finish(&self) -> u32 {
        self.0 ^ 0xffffffff
    }
}

impl Default for Crc {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn calculate_crc(data: &[u8]) -> u32 {
    Crc::new().update(data).finish()
}

#[cfg(test)]
mod tests {
    use super::{calculate_crc, Crc};

    #[test]
    fn matches_known_check_values() {
        assert_eq!(calculate_crc(b"123456789"), 0xcbf43926);
        assert_eq!(calculate_crc(b"IEND"), 0xae426082);
        assert_eq!(calculate_crc(&[]), 0);
    }

    #[test]
    fn incremental_updates_match_one_shot() {
        let mut crc = Crc::new();
        crc.update(b"IHDR").update(&[0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0]);
        let mut joined = b"IHDR".to_vec();
        joined.extend([0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0]);
        assert_eq!(crc.finish(), calculate_crc(&joined));
    }
}
