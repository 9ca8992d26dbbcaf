use alloc::vec::Vec;

use super::handle::Handle;
use crate::error::Error;

/// Slot storage for tree nodes.
///
/// The arena is the sole owner of every node. Links between nodes are plain
/// [`Handle`]s, so dropping the arena tears the whole tree down without
/// following any parent/child cycle.
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

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `element` in a free slot, growing the arena if needed.
    ///
    /// On error nothing has been stored and `element` is dropped; the arena is
    /// left exactly as it was.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, Error> {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            return Ok(h);
        }

        if self.slots.len() >= Handle::MAX {
            return Err(Error::CapacityOverflow { max: Handle::MAX });
        }
        self.slots.try_reserve(1)?;
        // A later `take()` pushes onto `free`; reserve now so that push cannot fail midway.
        self.free.try_reserve(self.slots.len() + 1 - self.free.len())?;
        self.slots.push(Some(element));
        Ok(Handle::from_index(self.slots.len() - 1))
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns a mutable reference to an element by handle from a raw pointer.
    ///
    /// Only the one slot is borrowed, never the slot buffer as a whole, so
    /// references previously returned for other handles stay valid.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `Arena<T>`.
    /// - No other reference to the element at `handle` may be live for `'a`.
    #[inline]
    pub(crate) unsafe fn get_mut_ptr<'a>(ptr: *mut Self, handle: Handle) -> &'a mut T {
        let index = handle.to_index();
        // SAFETY: Caller guarantees ptr is valid and that the slot is not aliased. `as_mut_ptr`
        // does not materialize a reference to the buffer, and `index` is bounds checked.
        unsafe {
            let slots = core::ptr::addr_of_mut!((*ptr).slots);
            assert!(index < (*slots).len(), "`Arena::get_mut_ptr()` - `handle` is out of bounds!");
            (*(*slots).as_mut_ptr().add(index))
                .as_mut()
                .expect("`Arena::get_mut_ptr()` - `handle` is invalid!")
        }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn freed_slots_are_recycled() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.try_alloc(1).unwrap();
        let b = arena.try_alloc(2).unwrap();
        arena.free(a);
        assert_eq!(arena.len(), 1);

        let c = arena.try_alloc(3).unwrap();
        assert_eq!(c, a);
        assert_eq!(*arena.get(b), 2);
        assert_eq!(*arena.get(c), 3);
    }

    #[test]
    fn alloc_fails_at_capacity() {
        let mut arena: Arena<()> = Arena::with_capacity(Handle::MAX);
        for _ in 0..Handle::MAX {
            arena.try_alloc(()).unwrap();
        }
        assert_eq!(arena.try_alloc(()), Err(Error::CapacityOverflow { max: Handle::MAX }));
        assert_eq!(arena.len(), Handle::MAX);
    }

    #[test]
    fn pointer_borrows_are_disjoint() {
        let mut arena: Arena<u64> = Arena::new();
        let handles: Vec<Handle> = (0..8).map(|v| arena.try_alloc(v).unwrap()).collect();

        let ptr: *mut Arena<u64> = &raw mut arena;
        // SAFETY: Every handle is distinct and `arena` is not otherwise used meanwhile.
        let held: Vec<&mut u64> = handles.iter().map(|&h| unsafe { Arena::get_mut_ptr(ptr, h) }).collect();
        for slot in held {
            *slot += 100;
        }

        for (v, &h) in (100..).zip(&handles) {
            assert_eq!(*arena.get(h), v);
        }
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn stale_handle_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let h = arena.try_alloc(7).unwrap();
        arena.free(h);
        let _ = arena.get(h);
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.try_alloc(value).unwrap();
                        model.push((handle, value));
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        *arena.get_mut(handle) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        let value1 = arena.take(handle);
                        let (_, value2) = model.swap_remove(index);
                        prop_assert_eq!(value1, value2);
                    }
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
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            5 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
