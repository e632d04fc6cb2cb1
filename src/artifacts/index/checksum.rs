use crate::artifacts::index::CHECKSUM_SIZE;
use sha1::{Digest, Sha1};

/// Running SHA-1 over the checksummed parts of the index file
///
/// The stored checksum sits between the header and the entries, so it covers
/// the 12 header bytes followed by every entry record.
#[derive(Debug, Clone, Default)]
pub struct Checksum {
    digest: Sha1,
}

impl Checksum {
    pub(crate) fn new() -> Self {
        Checksum {
            digest: Sha1::new(),
        }
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    pub(crate) fn finish(self) -> [u8; CHECKSUM_SIZE] {
        self.digest.finalize().into()
    }

    pub(crate) fn verify(self, expected: &[u8]) -> bool {
        self.finish()[..] == *expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_updates_match_one_shot_digest() {
        let mut split = Checksum::new();
        split.update(b"DIRC");
        split.update(b"entries");

        let mut whole = Checksum::new();
        whole.update(b"DIRCentries");

        pretty_assertions::assert_eq!(split.finish(), whole.finish());
    }

    #[test]
    fn verify_detects_a_flipped_bit() {
        let mut checksum = Checksum::new();
        checksum.update(b"payload");
        let mut stored = checksum.clone().finish();
        stored[5] ^= 0x01;

        assert!(!checksum.verify(&stored));
    }
}
