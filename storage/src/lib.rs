pub mod ansi_consts;
pub mod assert;
pub mod linked;
pub mod pool_map;

pub use ansi_consts::{END, INFO};
pub use bitflags::bitflags;
pub use cranelift_entity::{
    packed_option::{PackedOption, ReservedValue},
    EntityList, EntityRef, ListPool, PrimaryMap,
};
pub use linked::{LinkedEnds, LinkedIter, LinkedList, LinkedNode, MutLinkNode, RevLinkedIter};
pub use pool_map::PoolMap;

pub extern crate cranelift_entity;

#[macro_export]
macro_rules! gen_entity {
    ($($name:ident)*) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(pub u32);

            $crate::cranelift_entity::entity_impl!($name);

            impl Default for $name {
                fn default() -> Self {
                    $crate::cranelift_entity::packed_option::ReservedValue::reserved_value()
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                    let prefix = stringify!($name).chars().next().unwrap_or('e');
                    write!(f, "{}{}", prefix.to_ascii_lowercase(), self.0)
                }
            }
        )*
    };
}
