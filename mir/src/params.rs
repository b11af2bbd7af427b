//! Block parameters.
//!
//! Parameters are values owned by the block, kept in positional order.
//! Position `i` of every incoming edge's argument bundle binds parameter `i`.
//! Inserting or erasing shifts later positions; held indices are not
//! adjusted, and bundles are left for the caller to update.

use crate::*;

impl Module {
    pub fn params(&self, block: Block) -> &[Value] {
        self.blocks[block].params.as_slice(&self.value_lists)
    }

    pub fn param(&self, block: Block, index: usize) -> Value {
        let params = self.params(block);
        assert!(
            index < params.len(),
            "parameter index {index} out of range for {block} with {} parameters",
            params.len()
        );
        params[index]
    }

    pub fn param_count(&self, block: Block) -> usize {
        self.blocks[block].params.len(&self.value_lists)
    }

    pub fn function_params(&self, block: Block) -> impl Iterator<Item = Value> + '_ {
        self.params_of_kind(block, ParamKind::Entry)
    }

    pub fn join_params(&self, block: Block) -> impl Iterator<Item = Value> + '_ {
        self.params_of_kind(block, ParamKind::Join)
    }

    fn params_of_kind(&self, block: Block, kind: ParamKind) -> impl Iterator<Item = Value> + '_ {
        self.params(block)
            .iter()
            .copied()
            .filter(move |&param| self.values[param].param_kind() == Some(kind))
    }

    pub fn param_kind(&self, param: Value) -> ParamKind {
        match self.values[param].def {
            ValueDef::Param { kind, .. } => kind,
            ValueDef::Result(inst) => panic!("{param} is a result of {inst}, not a parameter"),
        }
    }

    pub fn param_ownership(&self, param: Value) -> Ownership {
        match self.values[param].def {
            ValueDef::Param { ownership, .. } => ownership,
            ValueDef::Result(inst) => panic!("{param} is a result of {inst}, not a parameter"),
        }
    }

    pub fn param_decl(&self, param: Value) -> Option<Decl> {
        match self.values[param].def {
            ValueDef::Param { decl, .. } => decl.expand(),
            ValueDef::Result(inst) => panic!("{param} is a result of {inst}, not a parameter"),
        }
    }

    /// Appends an entry parameter. Only meaningful on the entry block, which
    /// is left to the caller.
    pub fn create_function_param(&mut self, block: Block, ty: Ty, decl: Option<Decl>) -> Value {
        let index = self.param_count(block);
        self.insert_function_param(block, index, ty, Ownership::Any, decl)
    }

    pub fn insert_function_param(
        &mut self,
        block: Block,
        index: usize,
        ty: Ty,
        ownership: Ownership,
        decl: Option<Decl>,
    ) -> Value {
        self.insert_param(block, index, ValueEnt::param(block, ty, ParamKind::Entry, ownership, decl))
    }

    pub fn create_join_param(
        &mut self,
        block: Block,
        ty: Ty,
        ownership: Ownership,
        decl: Option<Decl>,
    ) -> Value {
        let index = self.param_count(block);
        self.insert_join_param(block, index, ty, ownership, decl)
    }

    pub fn insert_join_param(
        &mut self,
        block: Block,
        index: usize,
        ty: Ty,
        ownership: Ownership,
        decl: Option<Decl>,
    ) -> Value {
        self.insert_param(block, index, ValueEnt::param(block, ty, ParamKind::Join, ownership, decl))
    }

    /// Swaps the parameter at `index` for a fresh join parameter. Other
    /// positions are untouched, the old value is destroyed.
    pub fn replace_join_param(
        &mut self,
        block: Block,
        index: usize,
        ty: Ty,
        ownership: Ownership,
        decl: Option<Decl>,
    ) -> Value {
        let old = self.param(block, index);
        let param = self
            .values
            .push(ValueEnt::param(block, ty, ParamKind::Join, ownership, decl));
        self.blocks[block].params.as_mut_slice(&mut self.value_lists)[index] = param;
        self.values.remove(old);
        param
    }

    /// Removes and destroys the parameter at `index`, later ones move down by one.
    pub fn erase_param(&mut self, block: Block, index: usize) {
        let param = self.param(block, index);
        self.blocks[block]
            .params
            .remove(index, &mut self.value_lists);
        self.values.remove(param);
    }

    pub fn drop_all_params(&mut self, block: Block) {
        let mut params = std::mem::take(&mut self.blocks[block].params);
        for &param in params.as_slice(&self.value_lists) {
            self.values.remove(param);
        }
        params.clear(&mut self.value_lists);
    }

    /// Gives `block` a copy of every parameter of `other`, keeping kind, type,
    /// ownership and declaration.
    pub fn clone_params_from(&mut self, block: Block, other: Block) {
        assert!(
            self.blocks[block].params.is_empty(),
            "cannot clone parameters of {other} onto {block} which already has some"
        );
        for param in self.params(other).to_vec() {
            let ent = self.values[param];
            if let ValueDef::Param {
                kind,
                ownership,
                decl,
                ..
            } = ent.def
            {
                let copy = ValueEnt::param(block, ent.ty, kind, ownership, decl.expand());
                let copy = self.values.push(copy);
                self.blocks[block].params.push(copy, &mut self.value_lists);
            }
        }
    }

    fn insert_param(&mut self, block: Block, index: usize, ent: ValueEnt) -> Value {
        let len = self.param_count(block);
        assert!(
            index <= len,
            "parameter index {index} out of range for {block} with {len} parameters"
        );
        let param = self.values.push(ent);
        self.blocks[block]
            .params
            .insert(index, param, &mut self.value_lists);
        param
    }
}
