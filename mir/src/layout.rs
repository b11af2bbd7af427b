//! The ordered instruction sequence of a block.
//!
//! Instructions are linked through their own `prev`/`next` fields, so
//! insertion, removal and splicing never shift anything. An instruction
//! handle doubles as a position: `Some(inst)` is "before `inst`", `None` is
//! the end of the block. A position stays valid until that instruction is
//! removed.

use storage::*;

use crate::*;

impl Module {
    /// Inserts detached `inst` before `at`, or at the end when `at` is `None`.
    pub fn insert(&mut self, block: Block, at: Option<Inst>, inst: Inst) {
        if let Some(placed) = self.inst_block(inst) {
            panic!("{inst} is already placed in {placed}");
        }
        if let Some(at) = at {
            assert_eq!(
                self.inst_block(at),
                Some(block),
                "insertion point {at} is not in {block}"
            );
        }

        let last = self.blocks[block].insts.last.expand();
        if let Some(last) = last {
            assert!(
                at.is_some() || !self.is_terminator(last),
                "cannot place {inst} after terminator {last} of {block}"
            );
        }
        if self.is_terminator(inst) {
            assert!(
                at.is_none(),
                "terminator {inst} must be the last instruction of {block}"
            );
        }

        self.insts
            .link_before(&mut self.blocks[block].insts, at, inst);
        self.insts[inst].block = block.into();
    }

    pub fn insert_before(&mut self, at: Inst, inst: Inst) {
        let block = self.placed_block(at);
        self.insert(block, Some(at), inst);
    }

    pub fn insert_after(&mut self, at: Inst, inst: Inst) {
        let block = self.placed_block(at);
        let next = self.next_inst(at);
        self.insert(block, next, inst);
    }

    pub fn push_back(&mut self, block: Block, inst: Inst) {
        self.insert(block, None, inst);
    }

    pub fn push_front(&mut self, block: Block, inst: Inst) {
        let first = self.first_inst(block);
        self.insert(block, first, inst);
    }

    /// Unlinks `inst` from its block without destroying it.
    pub fn remove_inst(&mut self, inst: Inst) {
        let block = self.placed_block(inst);
        self.insts.unlink(&mut self.blocks[block].insts, inst);
        self.insts[inst].block = None.into();
    }

    /// Unlinks and destroys `inst`, together with its edges and result.
    pub fn erase_inst(&mut self, inst: Inst) {
        if self.insts[inst].block.is_some() {
            self.remove_inst(inst);
        }
        self.drop_inst_references(inst);
        self.destroy_inst(inst);
    }

    /// Moves all instructions of `other` to the end of `block`, leaving
    /// `other` empty.
    pub fn splice_at_end(&mut self, block: Block, other: Block) {
        assert_ne!(block, other, "cannot splice {block} into itself");
        let first = self.first_inst(other);
        if let (Some(_), Some(last)) = (first, self.last_inst(block)) {
            assert!(
                !self.is_terminator(last),
                "cannot splice {other} after terminator {last} of {block}"
            );
        }

        self.adopt_insts(block, first);
        let mut moved = std::mem::take(&mut self.blocks[other].insts);
        self.insts
            .append(&mut self.blocks[block].insts, &mut moved);

        log::trace!("splice {other} at the end of {block}");
        sassert!(self.insts(other).next().is_none());
        sassert!(self.insts(block).all(|inst| self.inst_block(inst) == Some(block)));
    }

    /// Points the containing block of `from` and everything after it at `block`.
    pub(crate) fn adopt_insts(&mut self, block: Block, from: Option<Inst>) {
        let mut current = from;
        while let Some(inst) = current {
            self.insts[inst].block = block.into();
            current = self.insts[inst].next.expand();
        }
    }

    pub fn first_inst(&self, block: Block) -> Option<Inst> {
        self.blocks[block].insts.first.expand()
    }

    pub fn last_inst(&self, block: Block) -> Option<Inst> {
        self.blocks[block].insts.last.expand()
    }

    pub fn front(&self, block: Block) -> Inst {
        match self.first_inst(block) {
            Some(inst) => inst,
            None => panic!("{block} has no instructions"),
        }
    }

    pub fn back(&self, block: Block) -> Inst {
        match self.last_inst(block) {
            Some(inst) => inst,
            None => panic!("{block} has no instructions"),
        }
    }

    pub fn is_empty(&self, block: Block) -> bool {
        self.blocks[block].insts.is_empty()
    }

    /// Walks the whole block.
    pub fn inst_count(&self, block: Block) -> usize {
        self.insts(block).count()
    }

    pub fn next_inst(&self, inst: Inst) -> Option<Inst> {
        self.insts[inst].next.expand()
    }

    pub fn prev_inst(&self, inst: Inst) -> Option<Inst> {
        self.insts[inst].prev.expand()
    }

    pub fn insts(&self, block: Block) -> impl Iterator<Item = Inst> + '_ {
        self.insts
            .linked_iter(self.first_inst(block))
            .map(|(inst, _)| inst)
    }

    pub fn insts_rev(&self, block: Block) -> impl Iterator<Item = Inst> + '_ {
        self.insts
            .rev_linked_iter(self.last_inst(block))
            .map(|(inst, _)| inst)
    }

    /// The control transfer closing `block`.
    pub fn terminator(&self, block: Block) -> Inst {
        let last = match self.last_inst(block) {
            Some(last) => last,
            None => panic!("can't get terminator of malformed block {block}: it has no instructions"),
        };
        assert!(
            self.is_terminator(last),
            "can't get terminator of malformed block {block}: {last} is a {}",
            self.inst_kind(last).name()
        );
        last
    }

    fn placed_block(&self, inst: Inst) -> Block {
        match self.inst_block(inst) {
            Some(block) => block,
            None => panic!("{inst} is not placed in a block"),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::testing::*;
    use crate::*;

    fn lit(module: &mut Module, value: i64) -> Inst {
        module.make_inst(InstKind::IntLit(value), &[], Some(int()))
    }

    #[test]
    fn test_positions() {
        let (mut module, _, blocks) = with_blocks(1);
        let block = blocks[0];
        let [a, b, c, d] = [0, 1, 2, 3].map(|i| lit(&mut module, i));

        module.push_back(block, b);
        module.push_front(block, a);
        module.push_back(block, d);
        module.insert_before(d, c);
        assert_eq!(module.insts(block).collect::<Vec<_>>(), [a, b, c, d]);
        assert_eq!(module.insts_rev(block).collect::<Vec<_>>(), [d, c, b, a]);
        assert_eq!((module.front(block), module.back(block)), (a, d));
        assert_eq!(module.inst_count(block), 4);

        // `c` stays a valid position while its neighbours change.
        module.remove_inst(b);
        module.remove_inst(d);
        assert_eq!(module.prev_inst(c), Some(a));
        assert_eq!(module.next_inst(c), None);
        module.insert_after(c, d);
        module.insert(block, Some(c), b);
        assert_eq!(module.insts(block).collect::<Vec<_>>(), [a, b, c, d]);
        assert_eq!(module.inst_block(b), Some(block));
    }

    #[test]
    fn test_remove_keeps_and_erase_destroys() {
        let (mut module, _, blocks) = with_blocks(1);
        let a = lit(&mut module, 0);
        let b = lit(&mut module, 1);
        module.push_back(blocks[0], a);
        module.push_back(blocks[0], b);
        let result = module.inst_result(b).unwrap();

        module.remove_inst(a);
        assert!(module.is_inst_alive(a));
        assert_eq!(module.inst_block(a), None);

        module.erase_inst(b);
        assert!(!module.is_inst_alive(b));
        assert!(!module.is_value_alive(result));
        assert!(module.is_empty(blocks[0]));
        assert_eq!(module.first_inst(blocks[0]), None);
    }

    #[test]
    fn test_erase_terminator_unlinks_edges() {
        let (mut module, _, blocks) = with_blocks(2);
        let br = module.make_br(blocks[1], &[]);
        module.push_back(blocks[0], br);
        assert!(module.has_predecessors(blocks[1]));

        module.erase_inst(br);
        assert!(!module.has_predecessors(blocks[1]));
    }

    #[test]
    fn test_splice_at_end() {
        let (mut module, _, blocks) = with_blocks(2);
        let a = lit(&mut module, 0);
        let b = lit(&mut module, 1);
        let br = module.make_br(blocks[0], &[]);
        module.push_back(blocks[0], a);
        module.push_back(blocks[1], b);
        module.push_back(blocks[1], br);

        module.splice_at_end(blocks[0], blocks[1]);
        assert!(module.is_empty(blocks[1]));
        assert_eq!(module.insts(blocks[0]).collect::<Vec<_>>(), [a, b, br]);
        assert_eq!(module.inst_block(br), Some(blocks[0]));
        assert_eq!(module.single_predecessor(blocks[0]), Some(blocks[0]));

        // Splicing an empty block is a no-op, even onto a terminated one.
        module.splice_at_end(blocks[0], blocks[1]);
        assert_eq!(module.inst_count(blocks[0]), 3);
    }

    #[test]
    fn test_terminator_query() {
        let (mut module, _, blocks) = with_blocks(1);
        let a = lit(&mut module, 0);
        let ret = module.make_return(module.inst_result(a));
        module.push_back(blocks[0], a);
        module.push_back(blocks[0], ret);
        assert_eq!(module.terminator(blocks[0]), ret);
        assert_eq!(module.inst_args(ret), [module.inst_result(a).unwrap()]);
    }

    #[test]
    #[should_panic(expected = "after terminator")]
    fn test_append_after_terminator_panics() {
        let (mut module, _, blocks) = with_blocks(1);
        let ret = module.make_return(None);
        module.push_back(blocks[0], ret);
        let a = lit(&mut module, 0);
        module.push_back(blocks[0], a);
    }

    #[test]
    #[should_panic(expected = "must be the last instruction")]
    fn test_terminator_in_the_middle_panics() {
        let (mut module, _, blocks) = with_blocks(1);
        let a = lit(&mut module, 0);
        module.push_back(blocks[0], a);
        let ret = module.make_return(None);
        module.push_front(blocks[0], ret);
    }

    #[test]
    #[should_panic(expected = "no instructions")]
    fn test_back_of_empty_block_panics() {
        let (module, _, blocks) = with_blocks(1);
        module.back(blocks[0]);
    }

    #[test]
    #[should_panic(expected = "is a int")]
    fn test_terminator_of_unterminated_block_panics() {
        let (mut module, _, blocks) = with_blocks(1);
        let a = lit(&mut module, 0);
        module.push_back(blocks[0], a);
        module.terminator(blocks[0]);
    }
}
