//! Values that differ per pointer width.

use crate::config::Target;

/// One value per supported target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TargetSpecific<T> {
    pub pointer_width_64: T,
    pub pointer_width_32: T,
}

impl<T> TargetSpecific<T> {
    pub const fn new(pointer_width_64: T, pointer_width_32: T) -> Self {
        Self {
            pointer_width_64,
            pointer_width_32,
        }
    }

    pub fn for_all_targets(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    pub fn from_fn(mut f: impl FnMut(Target) -> T) -> Self {
        Self::new(f(Target::PointerWidth64), f(Target::PointerWidth32))
    }

    pub fn get(&self, target: Target) -> &T {
        match target {
            Target::PointerWidth64 => &self.pointer_width_64,
            Target::PointerWidth32 => &self.pointer_width_32,
        }
    }

    pub fn get_mut(&mut self, target: Target) -> &mut T {
        match target {
            Target::PointerWidth64 => &mut self.pointer_width_64,
            Target::PointerWidth32 => &mut self.pointer_width_32,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> TargetSpecific<U> {
        TargetSpecific::new(f(self.pointer_width_64), f(self.pointer_width_32))
    }

    pub fn try_map<U, E>(
        self,
        mut f: impl FnMut(T) -> Result<U, E>,
    ) -> Result<TargetSpecific<U>, E> {
        Ok(TargetSpecific::new(
            f(self.pointer_width_64)?,
            f(self.pointer_width_32)?,
        ))
    }

    pub fn as_ref(&self) -> TargetSpecific<&T> {
        TargetSpecific::new(&self.pointer_width_64, &self.pointer_width_32)
    }

    pub fn zip<U>(self, other: TargetSpecific<U>) -> TargetSpecific<(T, U)> {
        TargetSpecific::new(
            (self.pointer_width_64, other.pointer_width_64),
            (self.pointer_width_32, other.pointer_width_32),
        )
    }

    /// Values paired with their target, 64-bit first.
    pub fn iter(&self) -> impl Iterator<Item = (Target, &T)> {
        Target::ALL.into_iter().map(move |target| (target, self.get(target)))
    }
}

impl<T: PartialEq> TargetSpecific<T> {
    /// The shared value when every target agrees.
    pub fn value_if_all_equal(&self) -> Option<&T> {
        (self.pointer_width_64 == self.pointer_width_32).then_some(&self.pointer_width_64)
    }
}

impl TargetSpecific<u32> {
    pub fn add(&mut self, sizes: TargetSpecific<u32>) {
        self.pointer_width_64 += sizes.pointer_width_64;
        self.pointer_width_32 += sizes.pointer_width_32;
    }

    /// Round each cursor up to a multiple of its target's stride.
    pub fn align_to_stride(&mut self, strides: TargetSpecific<u32>) {
        for target in Target::ALL {
            let stride = *strides.get(target);
            let cursor = self.get_mut(target);
            let misalignment = *cursor % stride;
            if misalignment != 0 {
                *cursor += stride - misalignment;
            }
        }
    }
}
