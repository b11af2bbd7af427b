//! Intrusive doubly linked lists whose links live inside arena entries.
//!
//! A list is described by its [`LinkedEnds`] and the `prev`/`next` fields of
//! the nodes, so every structural edit is a constant number of handle writes.

use std::{marker::PhantomData, ops::IndexMut};

use cranelift_entity::{
    packed_option::{PackedOption, ReservedValue},
    EntityRef,
};

#[macro_export]
macro_rules! impl_linked_node {
    ($entity:ty, $target:ty) => {
        impl $crate::linked::LinkedNode<$entity> for $target {
            fn prev(&self) -> Option<$entity> {
                self.prev.expand()
            }

            fn next(&self) -> Option<$entity> {
                self.next.expand()
            }
        }
    };

    (mut $entity:ty, $target:ty) => {
        impl $crate::linked::MutLinkNode<$entity> for $target {
            fn set_prev(&mut self, prev: Option<$entity>) {
                self.prev = prev.into();
            }

            fn set_next(&mut self, next: Option<$entity>) {
                self.next = next.into();
            }
        }
    };

    (inout $entity:ty, $target:ty) => {
        $crate::impl_linked_node!($entity, $target);
        $crate::impl_linked_node!(mut $entity, $target);
    };
}

pub trait LinkedNode<E: EntityRef>: 'static {
    fn prev(&self) -> Option<E>;
    fn next(&self) -> Option<E>;
}

pub trait MutLinkNode<E: EntityRef>: LinkedNode<E> {
    fn set_prev(&mut self, prev: Option<E>);
    fn set_next(&mut self, next: Option<E>);
}

/// First and last node of one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedEnds<E: ReservedValue> {
    pub first: PackedOption<E>,
    pub last: PackedOption<E>,
}

impl<E: ReservedValue> LinkedEnds<E> {
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

impl<E: ReservedValue> Default for LinkedEnds<E> {
    fn default() -> Self {
        Self {
            first: PackedOption::default(),
            last: PackedOption::default(),
        }
    }
}

pub trait LinkedList<E: EntityRef + ReservedValue, N: LinkedNode<E>>:
    Sized + IndexMut<E, Output = N>
{
    fn linked_iter(&self, root: Option<E>) -> LinkedIter<Self, E, N> {
        LinkedIter {
            storage: self,
            current: root,
            _ph: PhantomData,
        }
    }

    fn rev_linked_iter(&self, root: Option<E>) -> RevLinkedIter<Self, E, N> {
        RevLinkedIter {
            storage: self,
            current: root,
            _ph: PhantomData,
        }
    }

    /// Links detached `node` right after `after`, or at the front when
    /// `after` is `None`.
    fn link_after(&mut self, ends: &mut LinkedEnds<E>, after: Option<E>, node: E)
    where
        N: MutLinkNode<E>,
    {
        let next = match after {
            Some(after) => self[after].next(),
            None => ends.first.expand(),
        };

        self[node].set_prev(after);
        self[node].set_next(next);

        match after {
            Some(after) => self[after].set_next(Some(node)),
            None => ends.first = node.into(),
        }
        match next {
            Some(next) => self[next].set_prev(Some(node)),
            None => ends.last = node.into(),
        }
    }

    /// Links detached `node` right before `before`, or at the back when
    /// `before` is `None`.
    fn link_before(&mut self, ends: &mut LinkedEnds<E>, before: Option<E>, node: E)
    where
        N: MutLinkNode<E>,
    {
        let prev = match before {
            Some(before) => self[before].prev(),
            None => ends.last.expand(),
        };
        self.link_after(ends, prev, node);
    }

    fn unlink(&mut self, ends: &mut LinkedEnds<E>, node: E)
    where
        N: MutLinkNode<E>,
    {
        let (prev, next) = (self[node].prev(), self[node].next());

        match prev {
            Some(prev) => self[prev].set_next(next),
            None => ends.first = next.into(),
        }
        match next {
            Some(next) => self[next].set_prev(prev),
            None => ends.last = prev.into(),
        }

        self[node].set_prev(None);
        self[node].set_next(None);
    }

    /// Cuts the list before `at` and returns the ends of the cut off tail.
    /// `None` cuts off nothing.
    fn split_off(&mut self, ends: &mut LinkedEnds<E>, at: Option<E>) -> LinkedEnds<E>
    where
        N: MutLinkNode<E>,
    {
        let at = match at {
            Some(at) => at,
            None => return LinkedEnds::default(),
        };

        let tail = LinkedEnds {
            first: at.into(),
            last: ends.last,
        };

        match self[at].prev() {
            Some(prev) => {
                self[prev].set_next(None);
                ends.last = prev.into();
            }
            None => *ends = LinkedEnds::default(),
        }
        self[at].set_prev(None);

        tail
    }

    /// Moves every node of `other` to the back of `ends`, leaving `other` empty.
    fn append(&mut self, ends: &mut LinkedEnds<E>, other: &mut LinkedEnds<E>)
    where
        N: MutLinkNode<E>,
    {
        let first = match other.first.expand() {
            Some(first) => first,
            None => return,
        };

        match ends.last.expand() {
            Some(last) => {
                self[last].set_next(Some(first));
                self[first].set_prev(Some(last));
            }
            None => ends.first = first.into(),
        }
        ends.last = other.last;

        *other = LinkedEnds::default();
    }
}

macro_rules! gen_iter {
    ($name:ident, $step:ident) => {
        pub struct $name<'a, S, E, N> {
            storage: &'a S,
            current: Option<E>,
            _ph: PhantomData<N>,
        }

        impl<'a, S: LinkedList<E, N>, E: EntityRef + ReservedValue, N: LinkedNode<E>> Iterator
            for $name<'a, S, E, N>
        {
            type Item = (E, &'a N);

            fn next(&mut self) -> Option<Self::Item> {
                let storage = self.storage;
                self.current.map(|current_ent| {
                    let current = &storage[current_ent];
                    self.current = current.$step();
                    (current_ent, current)
                })
            }
        }
    };
}

gen_iter!(LinkedIter, next);
gen_iter!(RevLinkedIter, prev);
