//! JSON representation of expression trees.
//!
//! Programs are handed to the CLI as JSON, so the shape of the serde
//! encoding is part of the external interface.

use pretty_assertions::assert_eq;
use serde_json::json;
use smallstep_types::ast::Expr;
use smallstep_types::{ArithOp, BinOp, CmpOp, Value};

#[test]
fn operators_serialize_as_bare_names() {
    assert_eq!(
        serde_json::to_value(BinOp::Arith(ArithOp::Times)).unwrap(),
        json!("Times")
    );
    assert_eq!(
        serde_json::to_value(BinOp::Compare(CmpOp::Equal)).unwrap(),
        json!("Equal")
    );
    let op: BinOp = serde_json::from_value(json!("Less")).unwrap();
    assert_eq!(op, BinOp::Compare(CmpOp::Less));
}

#[test]
fn binary_node_shape() {
    let e = Expr::plus(Expr::var("a"), Expr::int(10));
    assert_eq!(
        serde_json::to_value(&e).unwrap(),
        json!({"Binary": {"op": "Plus", "left": {"Var": "a"}, "right": {"Int": 10}}})
    );
}

#[test]
fn loop_program_from_json() {
    let doc = json!({
        "Seq": {
            "first": {
                "While": {
                    "cond": {"Binary": {"op": "Less", "left": {"Var": "d"}, "right": {"Int": 5}}},
                    "body": {"Assign": {"name": "d", "value": {
                        "Binary": {"op": "Plus", "left": {"Var": "d"}, "right": {"Int": 1}}
                    }}}
                }
            },
            "second": {"Var": "d"}
        }
    });
    let parsed: Expr = serde_json::from_value(doc).unwrap();
    let expected = Expr::seq(
        Expr::while_loop(
            Expr::less(Expr::var("d"), Expr::int(5)),
            Expr::assign("d", Expr::plus(Expr::var("d"), Expr::int(1))),
        ),
        Expr::var("d"),
    );
    assert_eq!(parsed, expected);
}

#[test]
fn skip_and_bool_literals() {
    let parsed: Expr = serde_json::from_value(json!({"If": {
        "cond": {"Bool": true},
        "then_branch": "Skip",
        "else_branch": {"Int": 0}
    }}))
    .unwrap();
    assert_eq!(
        parsed,
        Expr::if_then_else(Expr::bool(true), Expr::skip(), Expr::int(0))
    );
}

#[test]
fn unknown_operator_is_rejected() {
    let res: Result<Expr, _> = serde_json::from_value(json!({"Binary": {
        "op": "Modulo", "left": {"Int": 1}, "right": {"Int": 2}
    }}));
    let msg = res.unwrap_err().to_string();
    assert!(msg.contains("unknown variant `Modulo`"), "{msg}");
    assert!(
        msg.contains("expected one of `Plus`, `Minus`, `Times`, `Divide`, `Less`, `Equal`"),
        "{msg}"
    );
}

#[test]
fn values_serialize_externally_tagged() {
    assert_eq!(serde_json::to_value(Value::Int(3)).unwrap(), json!({"Int": 3}));
    assert_eq!(serde_json::to_value(Value::Skip).unwrap(), json!("Skip"));
}
