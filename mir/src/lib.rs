//! Control flow graph core of the mid-level IR.
//!
//! Blocks own an ordered instruction sequence closed by one terminator and a
//! list of parameters. Terminators own successor edges, and every edge is
//! threaded into the predecessor chain of the block it targets, so both
//! directions of the graph are walkable without a separate edge set.
//!
//! All entities of a module live in one [`Module`] and are addressed by
//! `u32` handles. Operations that carry graph invariants are methods on the
//! module, and contract violations panic at the violation site.

pub mod block;
pub mod display;
pub mod func;
pub mod inst;
pub mod layout;
pub mod module;
pub mod params;
pub mod succ;
pub mod value;

pub use block::{Block, BlockEnt};
pub use display::{BlockDisplay, DisplayFlags, FuncDisplay};
pub use func::{Func, FuncEnt};
pub use inst::{Inst, InstEnt, InstKind};
pub use module::Module;
pub use succ::{Succ, SuccEnt, SuccList};
pub use value::{Decl, Ownership, ParamKind, Ty, Value, ValueDef, ValueEnt, ValueList};

#[cfg(test)]
pub(crate) mod testing {
    use storage::EntityRef;

    use crate::*;

    pub fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    pub fn int() -> Ty {
        Ty::new(0)
    }

    pub fn bool() -> Ty {
        Ty::new(1)
    }

    /// Module with one function holding `count` empty blocks.
    pub fn with_blocks(count: usize) -> (Module, Func, Vec<Block>) {
        init_logger();
        let mut module = Module::new();
        let func = module.create_function("test");
        let blocks = (0..count)
            .map(|_| {
                let block = module.create_block();
                module.append_block(func, block);
                block
            })
            .collect();
        (module, func, blocks)
    }
}
