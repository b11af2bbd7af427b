//! Block ordering of functions.
//!
//! Only as much of the function container as blocks need: a named owner and
//! the layout order of its blocks.

use storage::*;

use crate::*;

gen_entity!(Func);

#[derive(Debug, Clone)]
pub struct FuncEnt {
    pub name: String,
    pub(crate) layout: LinkedEnds<Block>,
}

impl Module {
    pub fn create_function(&mut self, name: impl Into<String>) -> Func {
        self.funcs.push(FuncEnt {
            name: name.into(),
            layout: LinkedEnds::default(),
        })
    }

    pub fn func_name(&self, func: Func) -> &str {
        &self.funcs[func].name
    }

    pub fn functions(&self) -> impl Iterator<Item = Func> + '_ {
        self.funcs.keys()
    }

    /// Inserts detached `block` as the last block of `func`.
    pub fn append_block(&mut self, func: Func, block: Block) {
        self.assert_detached(block);
        self.blocks.link_before(&mut self.funcs[func].layout, None, block);
        self.blocks[block].parent = func.into();
    }

    /// Inserts detached `block` right after `after`, in `after`'s function.
    pub fn insert_block_after(&mut self, block: Block, after: Block) {
        self.assert_detached(block);
        let func = self.attached_parent(after);
        self.blocks
            .link_after(&mut self.funcs[func].layout, Some(after), block);
        self.blocks[block].parent = func.into();
    }

    /// Unlinks `block` from its function. The block stays alive, detached,
    /// with its instructions, parameters and edges intact.
    pub fn remove_block(&mut self, block: Block) {
        let func = self.attached_parent(block);
        self.blocks.unlink(&mut self.funcs[func].layout, block);
        self.blocks[block].parent = None.into();
    }

    pub fn blocks(&self, func: Func) -> impl Iterator<Item = Block> + '_ {
        self.blocks
            .linked_iter(self.funcs[func].layout.first.expand())
            .map(|(block, _)| block)
    }

    pub fn entry_block(&self, func: Func) -> Option<Block> {
        self.funcs[func].layout.first.expand()
    }

    pub fn last_block(&self, func: Func) -> Option<Block> {
        self.funcs[func].layout.last.expand()
    }

    pub(crate) fn attached_parent(&self, block: Block) -> Func {
        match self.blocks[block].parent.expand() {
            Some(func) => func,
            None => panic!("{block} is not inserted into a function"),
        }
    }

    fn assert_detached(&self, block: Block) {
        if let Some(func) = self.blocks[block].parent.expand() {
            panic!("{block} is already inserted into {func}");
        }
    }
}
