use blockgraph::storage::EntityRef;
use blockgraph::*;

fn int() -> Ty {
    Ty::new(0)
}

/// entry -> (left | right) -> exit, `exit` joins one int from each side.
fn diamond(module: &mut Module) -> (Func, [Block; 4]) {
    let func = module.create_function("diamond");
    let blocks = [(); 4].map(|_| {
        let block = module.create_block();
        module.append_block(func, block);
        block
    });
    let [entry, left, right, exit] = blocks;

    let cond = module.create_function_param(entry, Ty::new(1), None);
    let br = module.make_cond_br(cond, left, &[], right, &[]);
    module.push_back(entry, br);

    for (side, value) in [(left, 1), (right, 2)] {
        let lit = module.make_inst(InstKind::IntLit(value), &[], Some(int()));
        module.push_back(side, lit);
        let result = module.inst_result(lit).unwrap();
        let br = module.make_br(exit, &[result]);
        module.push_back(side, br);
    }

    let joined = module.create_join_param(exit, int(), Ownership::Trivial, None);
    let ret = module.make_return(Some(joined));
    module.push_back(exit, ret);

    (func, blocks)
}

#[test]
fn test_diamond_edges() {
    let mut module = Module::new();
    let (func, [entry, left, right, exit]) = diamond(&mut module);

    assert!(module.is_entry(entry));
    assert_eq!(module.successor_blocks(entry).collect::<Vec<_>>(), [left, right]);
    assert_eq!(module.single_predecessor(left), Some(entry));
    assert_eq!(module.single_predecessor(exit), None);
    let mut preds = module.predecessor_blocks(exit).collect::<Vec<_>>();
    preds.sort();
    assert_eq!(preds, [left, right]);
    assert_eq!(module.blocks(func).count(), 4);
}

#[test]
fn test_split_reroute_and_erase() {
    let mut module = Module::new();
    let (func, [entry, left, right, exit]) = diamond(&mut module);

    // Split `left` before its branch and close the head with a jump.
    let left_br = module.terminator(left);
    let left_tail = module.split(left, Some(left_br));
    let jump = module.make_br(left_tail, &[]);
    module.push_back(left, jump);
    assert_eq!(
        module.blocks(func).collect::<Vec<_>>(),
        [entry, left, left_tail, right, exit]
    );
    assert!(module.is_predecessor_block(exit, left_tail));
    assert!(!module.is_predecessor_block(exit, left));

    // Send the else edge to `left` too, leaving `right` unreachable.
    let else_edge = module.successors(entry)[1];
    module.set_successor(else_edge, Some(left));
    assert!(!module.has_predecessors(right));
    assert_eq!(module.predecessor_blocks(left).collect::<Vec<_>>(), [entry, entry]);

    module.erase_from_parent(right);
    assert!(!module.is_block_alive(right));
    assert_eq!(module.single_predecessor(exit), Some(left_tail));
    assert_eq!(module.debug_id(exit), Some(3));

    module.move_after(exit, entry);
    assert_eq!(module.block_label(exit), "bb1");
    assert_eq!(module.single_successor(left_tail), Some(exit));
}

#[test]
fn test_print_after_edits() {
    let mut module = Module::new();
    let (_, [entry, _, right, exit]) = diamond(&mut module);

    let else_edge = module.successors(entry)[1];
    module.set_successor(else_edge, Some(exit));
    let param = module.param(exit, 0);
    let zero = module.make_inst(InstKind::IntLit(0), &[], Some(int()));
    module.push_front(entry, zero);
    let zero = module.inst_result(zero).unwrap();
    module.set_succ_args(else_edge, &[zero]);
    module.erase_from_parent(right);

    let mut out = String::new();
    module.print(exit, &mut out).unwrap();
    assert_eq!(
        out,
        format!("bb2({param}: t0):  // preds: bb0 bb1\n  return {param}\n")
    );

    out.clear();
    module.print(entry, &mut out).unwrap();
    assert_eq!(
        out,
        format!("bb0(v0: t1):\n  {zero} = int 0\n  cond_br v0, bb1, bb2({zero})\n")
    );
}
