//! Memory-mapped device capabilities.
//!
//! A device is a capability, not a concrete type: the minimum is byte reads
//! by device-local offset; writable devices additionally accept byte writes.
//! The bus translates absolute addresses to offsets before calling in.

use crate::BusError;

/// Size of the full 16-bit address space.
pub(crate) const ADDRESS_SPACE: u32 = 0x1_0000;

/// A byte-addressable device that can be mapped onto the bus.
///
/// Reading is the minimum capability. Devices that accept writes override
/// [`Device::write`]; the default rejects the access, which is all a
/// read-only device needs to do.
pub trait Device {
    /// Read one byte at a device-local offset.
    fn read(&mut self, offset: u16) -> Result<u8, BusError>;

    /// Write one byte at a device-local offset.
    fn write(&mut self, offset: u16, value: u8) -> Result<(), BusError> {
        let _ = value;
        Err(BusError::NotWritable(offset))
    }
}

/// Zero-initialized random-access memory.
pub struct Ram {
    bytes: Vec<u8>,
}

impl Ram {
    /// Allocate `size` bytes of zeroed RAM.
    ///
    /// `size` must be nonzero and no larger than the 64K address space.
    pub fn new(size: u32) -> Result<Self, BusError> {
        if size == 0 || size > ADDRESS_SPACE {
            return Err(BusError::InvalidSize(size));
        }
        Ok(Self {
            bytes: vec![0; size as usize],
        })
    }

    /// Copy `bytes` into RAM starting at `offset`.
    ///
    /// Setup convenience for loading programs before the device is mapped.
    pub fn load(&mut self, offset: u16, bytes: &[u8]) -> Result<(), BusError> {
        let start = offset as usize;
        let end = start + bytes.len();
        if end > self.bytes.len() {
            return Err(BusError::OutOfRange(offset));
        }
        self.bytes[start..end].copy_from_slice(bytes);
        Ok(())
    }
}

impl Device for Ram {
    fn read(&mut self, offset: u16) -> Result<u8, BusError> {
        self.bytes
            .get(offset as usize)
            .copied()
            .ok_or(BusError::OutOfRange(offset))
    }

    fn write(&mut self, offset: u16, value: u8) -> Result<(), BusError> {
        match self.bytes.get_mut(offset as usize) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(BusError::OutOfRange(offset)),
        }
    }
}

/// Read-only memory backed by an image supplied at construction.
pub struct Rom {
    bytes: Vec<u8>,
}

impl Rom {
    /// Wrap an image as ROM. Same size limits as [`Ram::new`].
    pub fn new(bytes: Vec<u8>) -> Result<Self, BusError> {
        let size = bytes.len() as u32;
        if bytes.is_empty() || size > ADDRESS_SPACE {
            return Err(BusError::InvalidSize(size));
        }
        Ok(Self { bytes })
    }
}

impl Device for Rom {
    fn read(&mut self, offset: u16) -> Result<u8, BusError> {
        self.bytes
            .get(offset as usize)
            .copied()
            .ok_or(BusError::OutOfRange(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ram_rejects_zero_and_oversized_allocations() {
        assert_eq!(Ram::new(0).err(), Some(BusError::InvalidSize(0)));
        assert_eq!(
            Ram::new(ADDRESS_SPACE + 1).err(),
            Some(BusError::InvalidSize(ADDRESS_SPACE + 1))
        );
        assert!(Ram::new(ADDRESS_SPACE).is_ok());
    }

    #[test]
    fn ram_reads_back_writes() {
        let mut ram = Ram::new(0x100).unwrap();
        ram.write(0x42, 0xA5).unwrap();
        assert_eq!(ram.read(0x42), Ok(0xA5));
        assert_eq!(ram.read(0x43), Ok(0));
    }

    #[test]
    fn ram_rejects_out_of_range_offsets() {
        let mut ram = Ram::new(0x100).unwrap();
        assert_eq!(ram.read(0x100), Err(BusError::OutOfRange(0x100)));
        assert_eq!(ram.write(0x100, 0), Err(BusError::OutOfRange(0x100)));
    }

    #[test]
    fn ram_load_checks_bounds() {
        let mut ram = Ram::new(4).unwrap();
        ram.load(1, &[1, 2, 3]).unwrap();
        assert_eq!(ram.read(3), Ok(3));
        assert_eq!(ram.load(2, &[0; 3]), Err(BusError::OutOfRange(2)));
    }

    #[test]
    fn rom_rejects_writes() {
        let mut rom = Rom::new(vec![0xEA; 16]).unwrap();
        assert_eq!(rom.read(0), Ok(0xEA));
        assert_eq!(rom.write(0, 1), Err(BusError::NotWritable(0)));
    }

    #[test]
    fn rom_rejects_empty_image() {
        assert_eq!(Rom::new(Vec::new()).err(), Some(BusError::InvalidSize(0)));
    }
}
