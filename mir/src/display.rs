use std::{
    fmt::{self, Write},
    io::IsTerminal,
};

use storage::*;

use crate::*;

bitflags! {
    #[derive(Default)]
    pub struct DisplayFlags: u32 {
        /// Print parameter types next to parameters.
        const TYPES = 1 << 0;
        /// Annotate block headers with their predecessors.
        const PREDS = 1 << 1;
        /// Color block labels for terminal output.
        const COLOR = 1 << 2;
    }
}

pub struct BlockDisplay<'a> {
    module: &'a Module,
    block: Block,
    flags: DisplayFlags,
}

pub struct FuncDisplay<'a> {
    module: &'a Module,
    func: Func,
    flags: DisplayFlags,
}

impl Module {
    pub fn display_block(&self, block: Block, flags: DisplayFlags) -> BlockDisplay {
        BlockDisplay {
            module: self,
            block,
            flags,
        }
    }

    pub fn display_func(&self, func: Func, flags: DisplayFlags) -> FuncDisplay {
        FuncDisplay {
            module: self,
            func,
            flags,
        }
    }

    pub fn print(&self, block: Block, out: &mut impl Write) -> fmt::Result {
        write!(
            out,
            "{}",
            self.display_block(block, DisplayFlags::TYPES | DisplayFlags::PREDS)
        )
    }

    /// Prints `block` to stderr, colored only when stderr is a terminal.
    pub fn dump(&self, block: Block) {
        let flags = dump_flags(std::io::stderr().is_terminal());
        eprint!("{}", self.display_block(block, flags));
    }

    /// Writes the label of `block`, followed by its parameter types when
    /// `print_type` is set.
    pub fn print_as_operand(&self, block: Block, out: &mut impl Write, print_type: bool) -> fmt::Result {
        write!(out, "{}", self.block_label(block))?;
        if print_type {
            let types = self
                .params(block)
                .iter()
                .map(|&param| self.values[param].ty.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(out, "({types})")?;
        }
        Ok(())
    }

    /// `bbN` with `N` the position in the function, the raw handle when
    /// detached.
    pub fn block_label(&self, block: Block) -> String {
        match self.debug_id(block) {
            Some(id) => format!("bb{id}"),
            None => block.to_string(),
        }
    }
}

fn dump_flags(colored: bool) -> DisplayFlags {
    let mut flags = DisplayFlags::TYPES | DisplayFlags::PREDS;
    flags.set(DisplayFlags::COLOR, colored);
    flags
}

impl BlockDisplay<'_> {
    fn label(&self, f: &mut fmt::Formatter, block: Block) -> fmt::Result {
        let label = self.module.block_label(block);
        if self.flags.contains(DisplayFlags::COLOR) {
            write_colored!(f, INFO, "{}", label)
        } else {
            write!(f, "{label}")
        }
    }

    fn values(&self, f: &mut fmt::Formatter, values: &[Value]) -> fmt::Result {
        for (i, value) in values.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }

    fn header(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let module = self.module;
        self.label(f, self.block)?;

        let params = module.params(self.block);
        if !params.is_empty() {
            write!(f, "(")?;
            for (i, &param) in params.iter().enumerate() {
                if i != 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{param}")?;
                if self.flags.contains(DisplayFlags::TYPES) {
                    write!(f, ": {}", module.values[param].ty)?;
                }
            }
            write!(f, ")")?;
        }
        write!(f, ":")?;

        if self.flags.contains(DisplayFlags::PREDS) {
            let mut preds = module.predecessor_blocks(self.block).peekable();
            if preds.peek().is_some() {
                write!(f, "  // preds:")?;
            }
            for pred in preds {
                write!(f, " ")?;
                self.label(f, pred)?;
            }
        }
        writeln!(f)
    }

    fn inst(&self, f: &mut fmt::Formatter, inst: Inst) -> fmt::Result {
        let module = self.module;
        let ent = &module.insts[inst];

        write!(f, "  ")?;
        if let Some(result) = ent.result.expand() {
            write!(f, "{result} = ")?;
        }
        write!(f, "{}", ent.kind.name())?;

        match ent.kind {
            InstKind::IntLit(value) => write!(f, " {value}")?,
            InstKind::BoolLit(value) => write!(f, " {value}")?,
            InstKind::Call(func) => write!(f, " @{}", module.func_name(func))?,
            _ => (),
        }

        let args = module.inst_args(inst);
        if !args.is_empty() {
            write!(f, " ")?;
            self.values(f, args)?;
        }

        for (i, &succ) in module.inst_successors(inst).iter().enumerate() {
            write!(f, "{}", if i == 0 && args.is_empty() { " " } else { ", " })?;
            match module.succ_target(succ) {
                Some(target) => self.label(f, target)?,
                None => write!(f, "<unbound>")?,
            }
            let succ_args = module.succ_args(succ);
            if !succ_args.is_empty() {
                write!(f, "(")?;
                self.values(f, succ_args)?;
                write!(f, ")")?;
            }
        }

        writeln!(f)
    }
}

impl fmt::Display for BlockDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.header(f)?;
        for inst in self.module.insts(self.block) {
            self.inst(f, inst)?;
        }
        Ok(())
    }
}

impl fmt::Display for FuncDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "fn @{} {{", self.module.func_name(self.func))?;
        for block in self.module.blocks(self.func) {
            write!(f, "{}", self.module.display_block(block, self.flags))?;
        }
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod test {
    use super::dump_flags;
    use crate::testing::*;
    use crate::*;

    fn sample() -> (Module, Func, Vec<Block>) {
        let (mut module, func, blocks) = with_blocks(3);
        let ptr = module.create_function_param(blocks[0], int(), None);
        let load = module.make_inst(InstKind::Load, &[ptr], Some(int()));
        module.push_back(blocks[0], load);
        let loaded = module.inst_result(load).unwrap();
        let cond = module.make_inst(InstKind::BoolLit(true), &[], Some(bool()));
        module.push_back(blocks[0], cond);
        let cond = module.inst_result(cond).unwrap();
        let br = module.make_cond_br(cond, blocks[1], &[loaded], blocks[2], &[]);
        module.push_back(blocks[0], br);

        module.create_join_param(blocks[1], int(), Ownership::Owned, None);
        let br = module.make_br(blocks[2], &[]);
        module.push_back(blocks[1], br);

        let ret = module.make_return(None);
        module.push_back(blocks[2], ret);
        (module, func, blocks)
    }

    #[test]
    fn test_print_block() {
        let (module, _, blocks) = sample();

        let mut out = String::new();
        module.print(blocks[0], &mut out).unwrap();
        assert_eq!(
            out,
            "bb0(v0: t0):\n  v1 = load v0\n  v2 = bool true\n  cond_br v2, bb1(v1), bb2\n"
        );

        out.clear();
        module.print(blocks[2], &mut out).unwrap();
        assert_eq!(out, "bb2:  // preds: bb1 bb0\n  return\n");
    }

    #[test]
    fn test_print_as_operand() {
        let (mut module, _, blocks) = sample();

        let mut out = String::new();
        module.print_as_operand(blocks[1], &mut out, false).unwrap();
        module.print_as_operand(blocks[1], &mut out, true).unwrap();
        assert_eq!(out, "bb1bb1(t0)");

        let detached = module.create_block();
        out.clear();
        module.print_as_operand(detached, &mut out, true).unwrap();
        assert_eq!(out, format!("{detached}()"));
    }

    #[test]
    fn test_preds_comment_skips_unplaced_terminators() {
        let (mut module, _, blocks) = with_blocks(2);
        let ret = module.make_return(None);
        module.push_back(blocks[1], ret);
        module.make_br(blocks[1], &[]);
        assert!(module.has_predecessors(blocks[1]));

        let mut out = String::new();
        module.print(blocks[1], &mut out).unwrap();
        assert_eq!(out, "bb1:\n  return\n");
    }

    #[test]
    fn test_dump_colors_only_terminals() {
        assert!(!dump_flags(false).contains(DisplayFlags::COLOR));
        assert!(dump_flags(true).contains(DisplayFlags::COLOR));
        assert!(dump_flags(false).contains(DisplayFlags::TYPES | DisplayFlags::PREDS));
    }

    #[test]
    fn test_display_func() {
        let (module, func, _) = sample();
        let text = module
            .display_func(func, DisplayFlags::empty())
            .to_string();
        assert!(text.starts_with("fn @test {\nbb0(v0):\n"));
        assert!(text.contains("bb1(v3):\n  br bb2\n"));
        assert!(text.ends_with("  return\n}\n"));

        let colored = module.display_func(func, DisplayFlags::COLOR).to_string();
        assert!(colored.contains(storage::INFO));
    }
}
