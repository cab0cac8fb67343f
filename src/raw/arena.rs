use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes.
///
/// A freed slot goes onto a free list and its handle is handed out again by
/// the next `alloc`, so handles stay small and the backing `Vec` only grows
/// to the peak number of live nodes.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Borrows two distinct slots mutably at once.
    pub(crate) fn get_pair_mut(&mut self, a: Handle, b: Handle) -> (&mut T, &mut T) {
        let (ia, ib) = (a.to_index(), b.to_index());
        assert_ne!(ia, ib, "`Arena::get_pair_mut()` - handles must be distinct!");

        let (lo, hi) = if ia < ib { (ia, ib) } else { (ib, ia) };
        let (head, tail) = self.slots.split_at_mut(hi);
        let first = head[lo].as_mut().expect("`Arena::get_pair_mut()` - `handle` is invalid!");
        let second = tail[0].as_mut().expect("`Arena::get_pair_mut()` - `handle` is invalid!");

        if ia < ib { (first, second) } else { (second, first) }
    }

    /// Every slot in index order, vacant ones as `None`.
    pub(crate) fn slots_mut(&mut self) -> impl Iterator<Item = Option<&mut T>> {
        self.slots.iter_mut().map(Option::as_mut)
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Drops trailing vacant slots and releases unused capacity.
    pub(crate) fn shrink_to_fit(&mut self) {
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
        let live = self.slots.len();
        self.free.retain(|h| h.to_index() < live);
        self.slots.shrink_to_fit();
        self.free.shrink_to_fit();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn with_capacity_preallocates() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert!(arena.is_empty());
    }

    #[test]
    fn freed_handle_is_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        let _b = arena.alloc(2);
        assert_eq!(arena.take(a), 1);
        let c = arena.alloc(3);
        assert_eq!(a, c);
        assert_eq!(*arena.get(c), 3);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn pair_borrow_respects_argument_order() {
        let mut arena = Arena::new();
        let a = arena.alloc(10);
        let b = arena.alloc(20);

        let (x, y) = arena.get_pair_mut(b, a);
        assert_eq!((*x, *y), (20, 10));
        core::mem::swap(x, y);

        assert_eq!(*arena.get(a), 20);
        assert_eq!(*arena.get(b), 10);
    }

    #[test]
    #[should_panic(expected = "`Arena::get_pair_mut()` - handles must be distinct!")]
    fn pair_borrow_of_same_slot_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        let _ = arena.get_pair_mut(a, a);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn get_after_take_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        arena.take(a);
        let _ = arena.get(a);
    }

    #[test]
    fn shrink_drops_trailing_vacancies() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        let c = arena.alloc(3);
        arena.take(c);
        arena.take(b);
        arena.shrink_to_fit();

        assert_eq!(arena.len(), 1);
        assert_eq!(*arena.get(a), 1);
        // The next slot is fresh, not one of the dropped ones from the free list.
        let d = arena.alloc(4);
        assert_eq!(d.to_index(), 1);
        assert_eq!(arena.len(), 2);
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        model.push((handle, value));
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].1 = value;
                    }
                    Operation::SwapPair(a, b) => {
                        if model.len() < 2 {
                            continue;
                        }

                        let (ia, ib) = (a % model.len(), b % model.len());
                        if ia == ib {
                            continue;
                        }
                        let (x, y) = arena.get_pair_mut(model[ia].0, model[ib].0);
                        core::mem::swap(x, y);
                        let (va, vb) = (model[ia].1, model[ib].1);
                        model[ia].1 = vb;
                        model[ib].1 = va;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let value = arena.take(model[index].0);
                        let (_, expected) = model.swap_remove(index);
                        prop_assert_eq!(value, expected);
                    }
                    Operation::Shrink => arena.shrink_to_fit(),
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                prop_assert_eq!(arena.is_empty(), model.is_empty());

                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        GetMut(usize, u32),
        SwapPair(usize, usize),
        Take(usize),
        Shrink,
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            5 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Operation::SwapPair(a, b)),
            8 => any::<usize>().prop_map(Operation::Take),
            2 => Just(Operation::Shrink),
            1 => Just(Operation::Clear),
        ]
    }
}
