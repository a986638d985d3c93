bitflags::bitflags! {
    /// Page protection requested by `mmap` (`PROT_*`).
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Prot: u32 {
        /// `PROT_READ`
        const READ = 0x1;
        /// `PROT_WRITE`
        const WRITE = 0x2;
        /// `PROT_EXEC`
        const EXEC = 0x4;
    }
}

bitflags::bitflags! {
    /// `mmap` flags (`MAP_*`). Bits other than these are ignored.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MapFlags: u32 {
        /// `MAP_SHARED`: stores reach the file on unmap.
        const SHARED = 0x01;
        /// `MAP_PRIVATE`: stores stay in this process.
        const PRIVATE = 0x02;
    }
}

/// Whether changes to a mapping propagate to its file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sharing {
    Shared,
    Private,
}

impl Sharing {
    /// Exactly one of `SHARED` and `PRIVATE` must be set.
    #[must_use]
    pub const fn from_flags(flags: MapFlags) -> Option<Self> {
        match (
            flags.contains(MapFlags::SHARED),
            flags.contains(MapFlags::PRIVATE),
        ) {
            (true, false) => Some(Self::Shared),
            (false, true) => Some(Self::Private),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharing_requires_exactly_one_mode() {
        assert_eq!(Sharing::from_flags(MapFlags::SHARED), Some(Sharing::Shared));
        assert_eq!(Sharing::from_flags(MapFlags::PRIVATE), Some(Sharing::Private));
        assert_eq!(Sharing::from_flags(MapFlags::empty()), None);
        assert_eq!(Sharing::from_flags(MapFlags::all()), None);
    }

    #[test]
    fn unknown_flag_bits_are_dropped() {
        let flags = MapFlags::from_bits_truncate(0x01 | 0x20 | 0x100);
        assert_eq!(flags, MapFlags::SHARED);
        assert_eq!(Sharing::from_flags(flags), Some(Sharing::Shared));
        assert_eq!(Prot::from_bits_truncate(0xff), Prot::all());
    }
}
