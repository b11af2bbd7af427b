use storage::*;

use crate::*;

gen_entity!(Inst);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstKind {
    IntLit(i64),
    BoolLit(bool),
    Load,
    Store,
    Add,
    Sub,
    Call(Func),
    Br,
    CondBr,
    Switch,
    Return,
    Unreachable,
}

impl Default for InstKind {
    fn default() -> Self {
        InstKind::Unreachable
    }
}

impl InstKind {
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Self::Br | Self::CondBr | Self::Switch | Self::Return | Self::Unreachable
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::IntLit(..) => "int",
            Self::BoolLit(..) => "bool",
            Self::Load => "load",
            Self::Store => "store",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Call(..) => "call",
            Self::Br => "br",
            Self::CondBr => "cond_br",
            Self::Switch => "switch",
            Self::Return => "return",
            Self::Unreachable => "unreachable",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InstEnt {
    pub(crate) prev: PackedOption<Inst>,
    pub(crate) next: PackedOption<Inst>,
    pub(crate) block: PackedOption<Block>,
    pub kind: InstKind,
    pub(crate) args: ValueList,
    pub(crate) succs: SuccList,
    pub(crate) result: PackedOption<Value>,
}

impl_linked_node!(inout Inst, InstEnt);

impl Module {
    /// Creates a detached non-terminator.
    pub fn make_inst(&mut self, kind: InstKind, args: &[Value], result: Option<Ty>) -> Inst {
        assert!(
            !kind.is_terminator(),
            "{} needs its successors, use the terminator constructors",
            kind.name()
        );
        let inst = self.push_inst(kind, args);
        if let Some(ty) = result {
            let value = self.values.push(ValueEnt::result(inst, ty));
            self.insts[inst].result = value.into();
        }
        inst
    }

    pub fn make_br(&mut self, dest: Block, args: &[Value]) -> Inst {
        self.make_terminator(InstKind::Br, &[], &[(dest, args)])
    }

    pub fn make_cond_br(
        &mut self,
        cond: Value,
        then_dest: Block,
        then_args: &[Value],
        else_dest: Block,
        else_args: &[Value],
    ) -> Inst {
        self.make_terminator(
            InstKind::CondBr,
            &[cond],
            &[(then_dest, then_args), (else_dest, else_args)],
        )
    }

    /// Branches to `dests[n]` for selector value `n`. The edge count is fixed
    /// by `dests`.
    pub fn make_switch(&mut self, selector: Value, dests: &[Block]) -> Inst {
        let dests = dests
            .iter()
            .map(|&dest| (dest, &[] as &[Value]))
            .collect::<Vec<_>>();
        self.make_terminator(InstKind::Switch, &[selector], &dests)
    }

    pub fn make_return(&mut self, value: Option<Value>) -> Inst {
        match value {
            Some(value) => self.make_terminator(InstKind::Return, &[value], &[]),
            None => self.make_terminator(InstKind::Return, &[], &[]),
        }
    }

    pub fn make_unreachable(&mut self) -> Inst {
        self.make_terminator(InstKind::Unreachable, &[], &[])
    }

    fn make_terminator(
        &mut self,
        kind: InstKind,
        args: &[Value],
        dests: &[(Block, &[Value])],
    ) -> Inst {
        debug_assert!(kind.is_terminator());
        let inst = self.push_inst(kind, args);
        for &(dest, dest_args) in dests {
            let succ = self.create_succ(inst, dest_args);
            self.insts[inst].succs.push(succ, &mut self.succ_lists);
            self.set_successor(succ, Some(dest));
        }
        inst
    }

    fn push_inst(&mut self, kind: InstKind, args: &[Value]) -> Inst {
        let args = ValueList::from_slice(args, &mut self.value_lists);
        self.insts.push(InstEnt {
            kind,
            args,
            ..Default::default()
        })
    }

    pub fn inst_kind(&self, inst: Inst) -> InstKind {
        self.insts[inst].kind
    }

    /// Block containing `inst`, `None` while it is not placed.
    pub fn inst_block(&self, inst: Inst) -> Option<Block> {
        self.insts[inst].block.expand()
    }

    pub fn inst_args(&self, inst: Inst) -> &[Value] {
        self.insts[inst].args.as_slice(&self.value_lists)
    }

    pub fn inst_result(&self, inst: Inst) -> Option<Value> {
        self.insts[inst].result.expand()
    }

    pub fn is_terminator(&self, inst: Inst) -> bool {
        self.insts[inst].kind.is_terminator()
    }

    /// Fixed-shape edge list of a terminator, empty for other instructions.
    pub fn inst_successors(&self, inst: Inst) -> &[Succ] {
        self.insts[inst].succs.as_slice(&self.succ_lists)
    }

    /// Clears the operands of `inst` and the argument bundles of its edges.
    /// Edge targets stay untouched.
    pub fn drop_inst_references(&mut self, inst: Inst) {
        self.insts[inst].args.clear(&mut self.value_lists);
        for i in 0..self.insts[inst].succs.len(&self.succ_lists) {
            let succ = self.insts[inst].succs.as_slice(&self.succ_lists)[i];
            self.succs[succ].args.clear(&mut self.value_lists);
        }
    }

    /// Unlinks the edges of `inst` from their targets and frees them.
    pub(crate) fn detach_successors(&mut self, inst: Inst) {
        let mut succs = std::mem::take(&mut self.insts[inst].succs);
        for succ in succs.as_slice(&self.succ_lists).to_vec() {
            self.set_successor(succ, None);
            let mut ent = self.succs.remove(succ);
            ent.args.clear(&mut self.value_lists);
        }
        succs.clear(&mut self.succ_lists);
    }

    /// Frees an instruction that is no longer linked into any block.
    pub(crate) fn destroy_inst(&mut self, inst: Inst) {
        debug_assert!(self.insts[inst].block.is_none());
        self.detach_successors(inst);
        let mut ent = self.insts.remove(inst);
        ent.args.clear(&mut self.value_lists);
        if let Some(result) = ent.result.expand() {
            self.values.remove(result);
        }
    }
}
