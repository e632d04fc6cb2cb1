use bitflags::bitflags;

bitflags! {
    /// Categories of difference between an index entry and a fresh stat snapshot
    ///
    /// An empty set means no observable change. `DATA` only tracks the size, so
    /// an edit that keeps the length goes unnoticed unless a timestamp moved.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChangeFlags: u32 {
        const MTIME = 0x0001;
        const CTIME = 0x0002;
        const OWNER = 0x0004;
        const MODE = 0x0008;
        const INODE = 0x0010;
        const DATA = 0x0020;
    }
}
