//! Structural pre-filter over candidate syntax nodes

use syn::{Expr, ExprMethodCall, GenericArgument, ItemImpl, Local, Type};

use crate::well_known;

/// Borrowed view of the three syntactic categories the scanner inspects.
#[derive(Debug, Clone, Copy)]
pub enum ScanNode<'ast> {
    /// `impl Trait for Type { .. }`
    TraitImpl(&'ast ItemImpl),
    /// `let name = <chain>;`
    Binding(&'ast Local),
    /// Any method call expression.
    MethodCall(&'ast ExprMethodCall),
}

/// Cheap syntactic relevance test, no symbol lookups.
///
/// Over-inclusive by design: anything that could be a topology declaration
/// passes, and the resolver rejects the false positives. Must never reject
/// a node the resolver could accept.
pub fn is_relevant(node: &ScanNode<'_>) -> bool {
    match node {
        ScanNode::TraitImpl(item) => {
            item.trait_.is_some() && item.generics.params.is_empty()
        }
        ScanNode::Binding(local) => initializer_declares_service(local),
        ScanNode::MethodCall(call) => {
            let typed = single_type_argument(call).is_some();
            if typed {
                call.method == well_known::ADD_SERVICE || call.method == well_known::ADD_GATEWAY
            } else {
                call.turbofish.is_none() && call.method == well_known::WITH_SUBGRAPH
            }
        }
    }
}

/// The call's sole turbofish type argument, if it has exactly one.
pub(crate) fn single_type_argument(call: &ExprMethodCall) -> Option<&Type> {
    let turbofish = call.turbofish.as_ref()?;
    if turbofish.args.len() != 1 {
        return None;
    }
    match turbofish.args.first()? {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}

/// Whether the `let` initializer's receiver spine contains a typed
/// `add_service` call.
fn initializer_declares_service(local: &Local) -> bool {
    let Some(init) = &local.init else {
        return false;
    };
    let mut current: &Expr = &init.expr;
    loop {
        match current {
            Expr::MethodCall(call) => {
                if call.method == well_known::ADD_SERVICE && single_type_argument(call).is_some() {
                    return true;
                }
                current = &call.receiver;
            }
            Expr::Field(field) => current = &field.base,
            _ => return false,
        }
    }
}
