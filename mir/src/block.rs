//! Basic blocks and their structural edits.
//!
//! A block goes from detached (no parent) to live (in a function's block
//! order) and leaves only through [`Module::erase_from_parent`], which
//! requires that no edge from another block still targets it.

use storage::*;

use crate::*;

gen_entity!(Block);

#[derive(Debug, Default, Clone)]
pub struct BlockEnt {
    pub(crate) prev: PackedOption<Block>,
    pub(crate) next: PackedOption<Block>,
    pub(crate) parent: PackedOption<Func>,
    pub(crate) insts: LinkedEnds<Inst>,
    pub(crate) params: ValueList,
    pub(crate) preds: PackedOption<Succ>,
}

impl_linked_node!(inout Block, BlockEnt);

impl Module {
    pub fn parent(&self, block: Block) -> Option<Func> {
        self.blocks[block].parent.expand()
    }

    pub fn is_entry(&self, block: Block) -> bool {
        self.parent(block)
            .map_or(false, |func| self.entry_block(func) == Some(block))
    }

    /// Position of `block` in its function, `None` when detached.
    ///
    /// Walks the function's block order on every call, keep it to
    /// diagnostics.
    pub fn debug_id(&self, block: Block) -> Option<usize> {
        let func = self.parent(block)?;
        self.blocks(func).position(|b| b == block)
    }

    /// Splits `block` before `at`. Instructions from `at` to the end move,
    /// in order, into a new block placed right after `block`; `None` moves
    /// nothing. `block` is left without a terminator and the new block gets
    /// no parameters, so the caller has to close `block` again.
    pub fn split(&mut self, block: Block, at: Option<Inst>) -> Block {
        assert!(self.parent(block).is_some(), "cannot split detached {block}");
        if let Some(at) = at {
            assert_eq!(
                self.inst_block(at),
                Some(block),
                "split point {at} is not in {block}"
            );
        }

        let new = self.create_block();
        self.insert_block_after(new, block);

        let tail = self.insts.split_off(&mut self.blocks[block].insts, at);
        self.adopt_insts(new, tail.first.expand());
        self.blocks[new].insts = tail;

        log::trace!("split {block} at {at:?} into {new}");
        sassert!(self.insts(block).all(|inst| self.inst_block(inst) == Some(block)));
        sassert!(self.insts(new).all(|inst| self.inst_block(inst) == Some(new)));

        new
    }

    /// Moves `block` right after `after` in the block order. Both blocks must
    /// live in the same function. Edges are not touched.
    pub fn move_after(&mut self, block: Block, after: Block) {
        assert_ne!(block, after, "cannot move {block} after itself");
        let func = self.attached_parent(block);
        assert_eq!(
            self.parent(after),
            Some(func),
            "cannot move {block} after {after} from another function"
        );

        let layout = &mut self.funcs[func].layout;
        self.blocks.unlink(layout, block);
        self.blocks.link_after(layout, Some(after), block);

        log::trace!("move {block} after {after}");
    }

    /// Destroys `block` with its instructions and parameters, unlinking it
    /// from its function first.
    ///
    /// Outgoing edges are detached before the predecessor check, so a self
    /// loop does not keep the block alive. Any other incoming edge does, and
    /// erasing then panics before anything is changed.
    pub fn erase_from_parent(&mut self, block: Block) {
        if let Some(succ) = self
            .predecessors(block)
            .find(|&succ| self.succ_block(succ) != Some(block))
        {
            panic!(
                "cannot erase {block}, {} of {} still targets it",
                succ,
                self.succ_inst(succ)
            );
        }

        let insts = self.insts(block).collect::<Vec<_>>();
        for &inst in &insts {
            self.drop_inst_references(inst);
        }
        for &inst in &insts {
            self.detach_successors(inst);
        }
        assert!(
            !self.has_predecessors(block),
            "{block} is still targeted after detaching its own edges"
        );

        if self.parent(block).is_some() {
            self.remove_block(block);
        }
        self.drop_all_params(block);
        for inst in insts {
            self.insts[inst].block = None.into();
            self.destroy_inst(inst);
        }
        self.blocks.remove(block);

        log::trace!("erase {block}");
    }

    /// Drops parameters and instruction operands without removing the
    /// instructions or touching edges.
    pub fn drop_all_references(&mut self, block: Block) {
        self.drop_all_params(block);
        let mut current = self.first_inst(block);
        while let Some(inst) = current {
            self.drop_inst_references(inst);
            current = self.next_inst(inst);
        }
    }
}
