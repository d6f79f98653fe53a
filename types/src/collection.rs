//! Index-safe accessors for vectors and slices.

pub trait VecExt<T: PartialEq> {
    /// Remove the first element equal to `item`, returning the index it had.
    fn remove_item(&mut self, item: &T) -> Option<usize>;

    fn position_of(&self, item: &T) -> Option<usize>;

    fn pop_front_safe(&mut self) -> Option<T>;

    fn pop_back_safe(&mut self) -> Option<T>;
}

impl<T: PartialEq> VecExt<T> for Vec<T> {
    fn remove_item(&mut self, item: &T) -> Option<usize> {
        let index = self.position_of(item)?;
        self.remove(index);
        Some(index)
    }

    fn position_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|candidate| candidate == item)
    }

    fn pop_front_safe(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        Some(self.remove(0))
    }

    fn pop_back_safe(&mut self) -> Option<T> {
        self.pop()
    }
}

/// Signed indexing that never panics.
pub trait SafeIndex<T> {
    /// The element at `index`, or `None` when negative or out of range.
    fn at(&self, index: isize) -> Option<&T>;
}

impl<T> SafeIndex<T> for [T] {
    fn at(&self, index: isize) -> Option<&T> {
        usize::try_from(index).ok().and_then(|index| self.get(index))
    }
}
