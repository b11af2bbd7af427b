use storage::*;

use crate::{Block, Inst};

gen_entity!(Value Ty Decl);

pub type ValueList = EntityList<Value>;

/// How a block parameter gets its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Bound once from the invocation of the function, entry block only.
    Entry,
    /// Bound by the argument bundle of every incoming edge.
    Join,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    Trivial,
    Unowned,
    Owned,
    Guaranteed,
    #[default]
    Any,
}

#[derive(Debug, Clone, Copy)]
pub enum ValueDef {
    Param {
        block: Block,
        kind: ParamKind,
        ownership: Ownership,
        decl: PackedOption<Decl>,
    },
    Result(Inst),
}

#[derive(Debug, Clone, Copy)]
pub struct ValueEnt {
    pub ty: Ty,
    pub def: ValueDef,
}

impl ValueEnt {
    pub fn param(block: Block, ty: Ty, kind: ParamKind, ownership: Ownership, decl: Option<Decl>) -> Self {
        Self {
            ty,
            def: ValueDef::Param {
                block,
                kind,
                ownership,
                decl: decl.into(),
            },
        }
    }

    pub fn result(inst: Inst, ty: Ty) -> Self {
        Self {
            ty,
            def: ValueDef::Result(inst),
        }
    }

    pub fn param_kind(&self) -> Option<ParamKind> {
        match self.def {
            ValueDef::Param { kind, .. } => Some(kind),
            ValueDef::Result(..) => None,
        }
    }
}
