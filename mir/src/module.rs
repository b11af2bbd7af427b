use storage::*;

use crate::*;

/// Owner of every entity of one compilation module.
///
/// Graph carrying fields are private to the crate so that links, targets and
/// parents only change through the operations that keep them consistent.
pub struct Module {
    pub(crate) funcs: PrimaryMap<Func, FuncEnt>,
    pub(crate) blocks: PoolMap<Block, BlockEnt>,
    pub(crate) insts: PoolMap<Inst, InstEnt>,
    pub(crate) succs: PoolMap<Succ, SuccEnt>,
    pub(crate) values: PoolMap<Value, ValueEnt>,
    pub(crate) value_lists: ListPool<Value>,
    pub(crate) succ_lists: ListPool<Succ>,
}

impl Module {
    pub fn new() -> Self {
        Self {
            funcs: PrimaryMap::new(),
            blocks: PoolMap::new(),
            insts: PoolMap::new(),
            succs: PoolMap::new(),
            values: PoolMap::new(),
            value_lists: ListPool::new(),
            succ_lists: ListPool::new(),
        }
    }

    /// Creates a detached block with no instructions and no parameters.
    pub fn create_block(&mut self) -> Block {
        self.blocks.push(BlockEnt::default())
    }

    pub fn block(&self, block: Block) -> &BlockEnt {
        &self.blocks[block]
    }

    pub fn inst(&self, inst: Inst) -> &InstEnt {
        &self.insts[inst]
    }

    pub fn succ(&self, succ: Succ) -> &SuccEnt {
        &self.succs[succ]
    }

    pub fn value(&self, value: Value) -> &ValueEnt {
        &self.values[value]
    }

    pub fn is_block_alive(&self, block: Block) -> bool {
        self.blocks.contains(block)
    }

    pub fn is_inst_alive(&self, inst: Inst) -> bool {
        self.insts.contains(inst)
    }

    pub fn is_value_alive(&self, value: Value) -> bool {
        self.values.contains(value)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

impl Default for Module {
    fn default() -> Self {
        Self::new()
    }
}
