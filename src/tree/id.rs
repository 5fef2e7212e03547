use derive_more::{Display, From};

/// Opaque, stable identifier of a committed node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("node-{_0}")]
pub struct NodeId(u64);

/// Mints identifiers for newly created nodes.
///
/// An allocator must never hand out the same identifier twice over its
/// lifetime, otherwise selection state could jump between unrelated nodes.
pub trait IdAllocator {
    fn next_id(&mut self) -> NodeId;
}

/// Hands out increasing identifiers starting from a seed.
#[derive(Debug, Clone, Default)]
pub struct SequentialIdAllocator {
    next: u64,
}

impl SequentialIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl IdAllocator for SequentialIdAllocator {
    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

impl<A: IdAllocator + ?Sized> IdAllocator for &mut A {
    fn next_id(&mut self) -> NodeId {
        (**self).next_id()
    }
}

impl<A: IdAllocator + ?Sized> IdAllocator for Box<A> {
    fn next_id(&mut self) -> NodeId {
        (**self).next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_allocator_never_repeats() {
        let mut ids = SequentialIdAllocator::new();
        let first = ids.next_id();
        let second = ids.next_id();
        assert_ne!(first, second);
        assert_eq!(first.to_string(), "node-0");
        assert_eq!(second.to_string(), "node-1");
    }

    #[test]
    fn allocator_can_resume_from_seed() {
        let mut ids = SequentialIdAllocator::starting_at(41);
        assert_eq!(ids.next_id(), NodeId::from(41));
    }
}
