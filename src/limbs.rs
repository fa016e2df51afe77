use std::ops::{Deref, DerefMut};

/// One fixed-width unit of storage
pub type Limb = u32;

/// Number of bits in a [`Limb`]
pub const LIMB_BITS: u32 = Limb::BITS;

/// Owned, growable limb storage. Limbs are kept most-significant first, so `data[0]` is
/// the high limb and the low-order end is `data[size - 1]`.
///
/// A size of 0 holds no storage at all and is read as the value 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Limbs {
    data: Vec<Limb>,
}

impl Limbs {
    /// Size 0, no allocation
    pub const fn zero() -> Self {
        Self { data: Vec::new() }
    }

    /// Minimal representation of a single word
    pub fn from_word(w: Limb) -> Self {
        Self { data: vec![w] }
    }

    /// `size` zero limbs
    pub fn with_size(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[Limb] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Limb] {
        &mut self.data
    }

    pub fn set_word(&mut self, w: Limb) {
        self.data.clear();
        self.data.push(w);
    }

    /// Changes the width while keeping the low-order limbs. Growing zero-extends at the
    /// high end, shrinking drops high limbs. Callers must make sure a shrink only drops
    /// limbs that are not significant
    pub fn resize(&mut self, new_size: usize) {
        let size = self.size();

        if new_size > size {
            let mut data = vec![0; new_size - size];
            data.extend_from_slice(&self.data);
            self.data = data;
        } else {
            self.data.drain(..size - new_size);
        }
    }

    /// Width-preserving copy of `src`; any storage held before is released
    pub fn copy_from(&mut self, src: &[Limb]) {
        self.data.clear();
        self.data.extend_from_slice(src);
    }

    /// Installs `data` as the new storage, releasing the old
    pub fn replace(&mut self, data: Vec<Limb>) {
        self.data = data;
    }

    /// Releases the storage, leaving a size-0 buffer
    pub fn free(&mut self) {
        self.data = Vec::new();
    }

    pub fn into_vec(self) -> Vec<Limb> {
        self.data
    }
}

impl Deref for Limbs {
    type Target = [Limb];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl DerefMut for Limbs {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl From<Vec<Limb>> for Limbs {
    fn from(data: Vec<Limb>) -> Self {
        Self { data }
    }
}

impl From<&[Limb]> for Limbs {
    fn from(data: &[Limb]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_word() {
        let z = Limbs::zero();
        assert_eq!(z.size(), 0);
        assert!(z.as_slice().is_empty());

        let w = Limbs::from_word(0xdead_beef);
        assert_eq!(w.as_slice(), &[0xdead_beef]);
    }

    #[test]
    fn resize_keeps_low_limbs() {
        let mut l = Limbs::from(vec![1, 2, 3]);

        l.resize(5);
        assert_eq!(l.as_slice(), &[0, 0, 1, 2, 3]);

        l.resize(2);
        assert_eq!(l.as_slice(), &[2, 3]);

        l.resize(2);
        assert_eq!(l.as_slice(), &[2, 3]);

        l.resize(0);
        assert_eq!(l.size(), 0);
    }

    #[test]
    fn copy_replace_free() {
        let mut l = Limbs::from_word(7);

        l.copy_from(&[9, 8, 7]);
        assert_eq!(l.as_slice(), &[9, 8, 7]);

        l.replace(vec![4]);
        assert_eq!(l.as_slice(), &[4]);

        l.set_word(5);
        assert_eq!(l.as_slice(), &[5]);

        l.free();
        assert_eq!(l, Limbs::zero());
    }
}
