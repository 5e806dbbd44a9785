//! Chunked slab that stores treap nodes and hands out integer handles to them.

use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to a slot of an `Arena<T>`.
///
/// Handles are plain indices tagged with the generation of the slot they were issued for: they
/// never keep the slot alive, and once the slot is released the handle stops resolving even if the
/// slot is reused. They are only meaningful for the arena that produced them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk: u32,
    slot: u32,
    generation: u32,
}

struct Slot<T> {
    generation: u32,
    entry: Entry<T>,
}

enum Entry<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A slab allocator for a single type of object.
///
/// Storage grows one chunk at a time, so slots never move once allocated. Released slots are
/// threaded onto a free list and reused by later allocations; every release bumps the slot's
/// generation.
///
/// # Examples
///
/// ```
/// use treap_forest::arena::Arena;
///
/// let mut arena = Arena::new(16);
/// let handle = arena.allocate(1);
/// arena[handle] += 1;
/// assert_eq!(arena[handle], 2);
/// assert_eq!(arena.release(handle), 2);
/// assert!(arena.is_empty());
///
/// let reused = arena.allocate(3);
/// assert_eq!(arena.get(handle), None);
/// assert_eq!(arena[reused], 3);
/// ```
pub struct Arena<T> {
    free_head: Option<Handle>,
    chunks: Vec<Vec<Slot<T>>>,
    chunk_size: usize,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>` that grows by `chunk_size` slots at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: arena chunk size must be positive.");
        Arena {
            free_head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
        }
    }

    fn slot(&self, handle: Handle) -> Option<&Slot<T>> {
        self.chunks
            .get(handle.chunk as usize)
            .and_then(|chunk| chunk.get(handle.slot as usize))
    }

    fn slot_mut(&mut self, handle: Handle) -> Option<&mut Slot<T>> {
        self.chunks
            .get_mut(handle.chunk as usize)
            .and_then(|chunk| chunk.get_mut(handle.slot as usize))
    }

    /// Stores `value` and returns the handle of its slot.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;

        if let Some(handle) = self.free_head.take() {
            let slot = &mut self.chunks[handle.chunk as usize][handle.slot as usize];
            match mem::replace(&mut slot.entry, Entry::Occupied(value)) {
                Entry::Vacant(next) => self.free_head = next,
                Entry::Occupied(_) => panic!("Error: free list points at an occupied slot."),
            }
            return Handle {
                generation: slot.generation,
                ..handle
            };
        }

        let needs_chunk = self
            .chunks
            .last()
            .map_or(true, |chunk| chunk.len() == self.chunk_size);
        if needs_chunk {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
        }
        let chunk_index = self.chunks.len() - 1;
        let chunk = &mut self.chunks[chunk_index];
        chunk.push(Slot {
            generation: 0,
            entry: Entry::Occupied(value),
        });
        Handle {
            chunk: chunk_index as u32,
            slot: (chunk.len() - 1) as u32,
            generation: 0,
        }
    }

    /// Releases the slot referenced by `handle` and returns the value stored there.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not reference an occupied slot of its generation.
    pub fn release(&mut self, handle: Handle) -> T {
        match self.slot(handle) {
            Some(Slot {
                generation,
                entry: Entry::Occupied(_),
            }) if *generation == handle.generation => {},
            Some(_) => panic!("Error: attempting to release a vacant slot."),
            None => panic!("Error: attempting to release an invalid slot."),
        }
        let free_head = self.free_head.take();
        let slot = &mut self.chunks[handle.chunk as usize][handle.slot as usize];
        slot.generation = slot.generation.wrapping_add(1);
        let previous = mem::replace(&mut slot.entry, Entry::Vacant(free_head));
        self.len -= 1;
        self.free_head = Some(handle);
        match previous {
            Entry::Occupied(value) => value,
            Entry::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to the value behind `handle`, or `None` if the slot is
    /// invalid, vacant, or was released since `handle` was issued.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slot(handle) {
            Some(Slot {
                generation,
                entry: Entry::Occupied(value),
            }) if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value behind `handle`, or `None` if the slot is invalid,
    /// vacant, or was released since `handle` was issued.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slot_mut(handle) {
            Some(Slot {
                generation,
                entry: Entry::Occupied(value),
            }) if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if `handle` references an occupied slot.
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots allocated per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle does not reference a live slot.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle does not reference a live slot.")
    }
}
