//! A self-referential expression tree built from variants.

use std::rc::Rc;

use unionvariant::{Recursive, UnwrapRecursive, Variant, Visit, Visitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Op {
    Add,
    Mul,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Binary {
    op: Op,
    lhs: Expr,
    rhs: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Expr(Variant<(i64, Recursive<Binary>)>);

fn num(n: i64) -> Expr {
    Expr(Variant::new(n))
}

fn bin(op: Op, lhs: Expr, rhs: Expr) -> Expr {
    Expr(Variant::new(Binary { op, lhs, rhs }))
}

struct Eval;

impl Visitor for Eval {
    type Output = i64;
}

impl Visit<i64> for Eval {
    fn visit(&mut self, n: &i64) -> i64 {
        *n
    }
}

impl UnwrapRecursive for Eval {}

impl Visit<Binary> for Eval {
    fn visit(&mut self, binary: &Binary) -> i64 {
        let lhs = binary.lhs.0.visit(self);
        let rhs = binary.rhs.0.visit(self);
        match binary.op {
            Op::Add => lhs + rhs,
            Op::Mul => lhs * rhs,
        }
    }
}

#[test]
fn evaluates_nested_tree() {
    // (2 + 3) * 4
    let expr = bin(Op::Mul, bin(Op::Add, num(2), num(3)), num(4));
    assert_eq!(expr.0.visit(&mut Eval), 20);
}

#[test]
fn typed_access_sees_through_the_wrapper() {
    let expr = bin(Op::Add, num(1), num(2));

    let binary = expr.0.get::<Binary, _>().unwrap();
    assert_eq!(binary.op, Op::Add);
    assert_eq!(binary.lhs.0.get::<i64, _>(), Ok(&1));
    assert!(expr.0.get::<i64, _>().is_err());
}

#[test]
fn move_construction_keeps_the_pointee() {
    let expr = bin(Op::Add, num(1), num(2));
    let address = expr.0.get::<Binary, _>().unwrap() as *const Binary;

    let moved = expr;
    assert_eq!(moved.0.get::<Binary, _>().unwrap() as *const Binary, address);
    assert_eq!(moved.0.visit(&mut Eval), 3);
}

#[test]
fn clone_is_deep() {
    let original = bin(Op::Add, num(1), num(2));
    let mut copy = original.clone();

    copy.0.get_mut::<Binary, _>().unwrap().op = Op::Mul;
    assert_eq!(original.0.visit(&mut Eval), 3);
    assert_eq!(copy.0.visit(&mut Eval), 2);
    assert_ne!(original, copy);
}

#[test]
fn replacing_a_node_with_its_own_child() {
    let mut expr = bin(Op::Add, bin(Op::Mul, num(3), num(5)), num(1));

    // The child is moved out of the tree before the tree itself is replaced.
    let child = expr.0.get::<Binary, _>().unwrap().lhs.clone();
    expr.0.assign(child.0);
    assert_eq!(expr.0.visit(&mut Eval), 15);

    let inner = expr.0.get::<Binary, _>().unwrap().rhs.clone();
    expr = inner;
    assert_eq!(expr.0.get::<i64, _>(), Ok(&5));
}

#[test]
fn dropping_a_tree_releases_every_node_once() {
    struct Leaf(Rc<()>);

    let shared = Rc::new(());
    {
        let tree = Variant::<(Leaf, Recursive<Variant<(Leaf, u8)>>)>::new(Variant::<(Leaf, u8)>::new(
            Leaf(Rc::clone(&shared)),
        ));
        let other = Variant::<(Leaf, Recursive<Variant<(Leaf, u8)>>)>::new(Leaf(Rc::clone(&shared)));
        assert_eq!(Rc::strong_count(&shared), 3);
        drop((tree, other));
    }
    assert_eq!(Rc::strong_count(&shared), 1);
}

#[test]
fn ordering_recurses_into_children() {
    assert!(num(100) < bin(Op::Add, num(0), num(0)));
    assert!(bin(Op::Add, num(0), num(0)) < bin(Op::Mul, num(0), num(0)));
    assert!(bin(Op::Add, num(0), num(1)) < bin(Op::Add, num(0), num(2)));
}

/// Sees the wrapper itself, because it does not opt into unwrapping.
struct Depth;

impl Visitor for Depth {
    type Output = bool;
}

impl<T> Visit<T> for Depth {
    fn visit(&mut self, _: &T) -> bool {
        std::any::type_name::<T>().contains("Recursive<")
    }
}

#[test]
fn visitors_without_opt_in_see_the_stored_alternative() {
    assert!(!num(1).0.visit(&mut Depth));
    assert!(bin(Op::Add, num(1), num(2)).0.visit(&mut Depth));
}
