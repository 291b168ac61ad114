use num_traits::{One, PrimInt, Zero};

/// Trait implemented by small category enums that are stored as bit sets
/// (plane orientation categories, editable transform kinds).
///
/// The enum's discriminant (via `#[repr(u8)]`) determines the bit index.
pub trait FlagBitmask: Copy {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A set of flags of one enum type `F`, stored as a primitive bitmask.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlagSet<F: FlagBitmask> {
    bits: F::Storage,
}

impl<F: FlagBitmask> Default for FlagSet<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: FlagBitmask> FlagSet<F> {
    pub fn empty() -> Self {
        Self {
            bits: F::Storage::zero(),
        }
    }

    pub fn from_flags(flags: &[F]) -> Self {
        let mut set = Self::empty();
        set.insert_many(flags);
        set
    }

    pub fn bits(&self) -> F::Storage {
        self.bits
    }

    pub fn insert(&mut self, flag: F) {
        self.bits = self.bits | flag.mask();
    }

    pub fn remove(&mut self, flag: F) {
        self.bits = self.bits & !flag.mask();
    }

    /// Insert or remove `flag` depending on `enabled`.
    pub fn set(&mut self, flag: F, enabled: bool) {
        if enabled {
            self.insert(flag);
        } else {
            self.remove(flag);
        }
    }

    pub fn contains(&self, flag: F) -> bool {
        (self.bits & flag.mask()) != F::Storage::zero()
    }

    pub fn insert_many(&mut self, flags: &[F]) {
        for &flag in flags {
            self.insert(flag);
        }
    }

    pub fn contains_all(&self, flags: &[F]) -> bool {
        let combined = flags
            .iter()
            .fold(F::Storage::zero(), |acc, f| acc | f.mask());
        (self.bits & combined) == combined
    }

    pub fn contains_any(&self, flags: &[F]) -> bool {
        let combined = flags
            .iter()
            .fold(F::Storage::zero(), |acc, f| acc | f.mask());
        (self.bits & combined) != F::Storage::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == F::Storage::zero()
    }

    pub fn clear(&mut self) {
        self.bits = F::Storage::zero();
    }
}

/// Declare a flag enum, implement `FlagBitmask` for it and expose `ALL`.
///
/// Example:
/// ```rust
/// placement::define_flags!(Permission, u8, {
///     Read,
///     Write,
/// });
/// assert_eq!(Permission::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! define_flags {
    ($name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::flags::FlagBitmask for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    define_flags!(Sample, u8, { A, B, C });

    #[test]
    fn insert_remove_and_contains() {
        let mut set = FlagSet::<Sample>::empty();
        assert!(set.is_empty());

        set.insert(Sample::B);
        assert!(set.contains(Sample::B));
        assert!(!set.contains(Sample::A));
        assert_eq!(set.bits(), 0b010);

        set.remove(Sample::B);
        assert!(set.is_empty());
    }

    #[test]
    fn set_toggles_membership() {
        let mut set = FlagSet::from_flags(Sample::ALL);
        set.set(Sample::C, false);
        assert!(!set.contains(Sample::C));
        set.set(Sample::C, true);
        assert!(set.contains_all(Sample::ALL));
    }

    #[test]
    fn empty_queries_follow_set_logic() {
        let set = FlagSet::from_flags(&[Sample::A]);
        // Every set contains the empty set; no set intersects it.
        assert!(set.contains_all(&[]));
        assert!(!set.contains_any(&[]));
        assert!(set.contains_any(&[Sample::A, Sample::C]));
        assert!(!set.contains_all(&[Sample::A, Sample::C]));
    }
}
