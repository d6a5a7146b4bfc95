//! The built-in demonstration program.

use smallstep_eval::Heap;
use smallstep_types::ast::Expr;
use smallstep_types::Value;

/// `c < (a - 10) * (b + 1); d := 10; d`
pub fn program() -> Expr {
    Expr::seq(
        Expr::less(
            Expr::var("c"),
            Expr::times(
                Expr::minus(Expr::var("a"), Expr::int(10)),
                Expr::plus(Expr::var("b"), Expr::int(1)),
            ),
        ),
        Expr::seq(Expr::assign("d", Expr::int(10)), Expr::var("d")),
    )
}

/// Bindings the demonstration program starts from.
///
/// `c` is the value of `if a < b then 444 else 4` under the other bindings.
pub fn heap() -> Heap {
    Heap::with_bindings([
        ("a", Value::Int(12)),
        ("b", Value::Int(31)),
        ("c", Value::Int(444)),
        ("d", Value::Int(0)),
    ])
}
