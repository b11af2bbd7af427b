//! Successor edges and the predecessor chains threaded through them.
//!
//! An edge is owned by the terminator that declares it and records the block
//! it targets. Each block keeps only the head of a doubly linked chain of the
//! edges currently targeting it. [`Module::set_successor`] is the only place
//! that changes a target, and it moves the edge between chains in O(1).

use storage::*;

use crate::*;

gen_entity!(Succ);

pub type SuccList = EntityList<Succ>;

#[derive(Debug, Clone, Default)]
pub struct SuccEnt {
    pub(crate) inst: PackedOption<Inst>,
    pub(crate) target: PackedOption<Block>,
    pub(crate) prev: PackedOption<Succ>,
    pub(crate) next: PackedOption<Succ>,
    pub(crate) args: ValueList,
}

impl_linked_node!(inout Succ, SuccEnt);

impl Module {
    /// Creates an unbound edge owned by `inst`.
    pub(crate) fn create_succ(&mut self, inst: Inst, args: &[Value]) -> Succ {
        let args = ValueList::from_slice(args, &mut self.value_lists);
        self.succs.push(SuccEnt {
            inst: inst.into(),
            args,
            ..Default::default()
        })
    }

    /// Points `succ` at `target`, moving it out of the predecessor chain of
    /// the old target and into the chain of the new one.
    pub fn set_successor(&mut self, succ: Succ, target: Option<Block>) {
        let old = self.succs[succ].target.expand();
        if old == target {
            return;
        }

        if let Some(old) = old {
            self.unlink_pred(old, succ);
        }
        self.succs[succ].target = target.into();
        if let Some(target) = target {
            self.link_pred(target, succ);
        }

        log::trace!("retarget {succ} of {}: {old:?} -> {target:?}", self.succ_inst(succ));
        sassert!(old.map_or(true, |old| self.predecessors(old).all(|s| s != succ)));
        sassert!(target.map_or(true, |target| self.predecessors(target).any(|s| s == succ)));
    }

    fn link_pred(&mut self, block: Block, succ: Succ) {
        let head = self.blocks[block].preds.expand();
        self.succs[succ].prev = None.into();
        self.succs[succ].next = head.into();
        if let Some(head) = head {
            self.succs[head].prev = succ.into();
        }
        self.blocks[block].preds = succ.into();
    }

    fn unlink_pred(&mut self, block: Block, succ: Succ) {
        let (prev, next) = (self.succs[succ].prev, self.succs[succ].next);
        match prev.expand() {
            Some(prev) => self.succs[prev].next = next,
            None => {
                debug_assert_eq!(self.blocks[block].preds.expand(), Some(succ));
                self.blocks[block].preds = next;
            }
        }
        if let Some(next) = next.expand() {
            self.succs[next].prev = prev;
        }
        self.succs[succ].prev = None.into();
        self.succs[succ].next = None.into();
    }

    pub fn succ_target(&self, succ: Succ) -> Option<Block> {
        self.succs[succ].target.expand()
    }

    /// Terminator owning `succ`.
    pub fn succ_inst(&self, succ: Succ) -> Inst {
        match self.succs[succ].inst.expand() {
            Some(inst) => inst,
            None => panic!("{succ} has no owning terminator"),
        }
    }

    /// Block the edge leaves from, `None` while its terminator is not placed.
    pub fn succ_block(&self, succ: Succ) -> Option<Block> {
        self.inst_block(self.succ_inst(succ))
    }

    /// Argument bundle passed to the join parameters of the target.
    pub fn succ_args(&self, succ: Succ) -> &[Value] {
        self.succs[succ].args.as_slice(&self.value_lists)
    }

    pub fn set_succ_args(&mut self, succ: Succ, args: &[Value]) {
        let list = &mut self.succs[succ].args;
        list.clear(&mut self.value_lists);
        list.extend(args.iter().copied(), &mut self.value_lists);
    }

    /// Edges currently targeting `block`, in no particular order.
    pub fn predecessors(&self, block: Block) -> impl Iterator<Item = Succ> + '_ {
        self.succs
            .linked_iter(self.blocks[block].preds.expand())
            .map(|(succ, _)| succ)
    }

    pub fn has_predecessors(&self, block: Block) -> bool {
        self.blocks[block].preds.is_some()
    }

    /// Source block of every incoming edge. A block branching here twice is
    /// listed twice.
    pub fn predecessor_blocks(&self, block: Block) -> impl Iterator<Item = Block> + '_ {
        self.predecessors(block)
            .filter_map(move |succ| self.succ_block(succ))
    }

    /// The source block of the only incoming edge, if there is exactly one.
    pub fn single_predecessor(&self, block: Block) -> Option<Block> {
        let mut preds = self.predecessors(block);
        match (preds.next(), preds.next()) {
            (Some(succ), None) => self.succ_block(succ),
            _ => None,
        }
    }

    pub fn is_predecessor_block(&self, block: Block, other: Block) -> bool {
        self.predecessor_blocks(block).any(|pred| pred == other)
    }

    /// Outgoing edges of `block`, read off its terminator.
    pub fn successors(&self, block: Block) -> &[Succ] {
        self.inst_successors(self.terminator(block))
    }

    pub fn has_successors(&self, block: Block) -> bool {
        !self.successors(block).is_empty()
    }

    pub fn successor_blocks(&self, block: Block) -> impl Iterator<Item = Block> + '_ {
        self.successors(block)
            .iter()
            .filter_map(move |&succ| self.succ_target(succ))
    }

    /// The target of the only outgoing edge, if there is exactly one.
    pub fn single_successor(&self, block: Block) -> Option<Block> {
        match self.successors(block) {
            &[succ] => self.succ_target(succ),
            _ => None,
        }
    }

    pub fn is_successor_block(&self, block: Block, other: Block) -> bool {
        self.successor_blocks(block).any(|succ| succ == other)
    }
}
