use std::sync::Arc;

use crate::ir::{Malformed, Pattern};
use crate::literal::{Literal, BOOLEAN};
use crate::value::Value;

/// Classify a literal. First match wins:
/// boolean alias → map → sequence → predicate → type → malformed.
pub fn lower_to_ir(literal: &Literal) -> Pattern {
    match literal {
        Literal::Data(Value::Symbol(name)) if name == BOOLEAN => Pattern::Boolean,
        Literal::Map(entries) => match entries.as_slice() {
            [(key, value)] => Pattern::Mapping(
                Box::new(lower_to_ir(key)),
                Box::new(lower_to_ir(value)),
            ),
            _ => Pattern::Malformed(Malformed::MappingArity { literal: literal.to_string() }),
        },
        Literal::Seq(items) => match items.as_slice() {
            [element] => Pattern::Sequence(Box::new(lower_to_ir(element))),
            _ => Pattern::Malformed(Malformed::SequenceArity { literal: literal.to_string() }),
        },
        Literal::Predicate(p) => Pattern::Predicate(Arc::clone(p)),
        Literal::Type(ty) => Pattern::TypeRef(ty.clone()),
        Literal::Data(_) => Pattern::Malformed(Malformed::Unrecognized { literal: literal.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::KindOf;
    use crate::types::Type;

    #[test]
    fn nested_literals_lower_structurally() {
        let lit = Literal::seq(Literal::map(Type::Symbol, Literal::seq(Type::String)));
        let ir = lower_to_ir(&lit);
        assert!(matches!(&ir, Pattern::Sequence(inner) if matches!(**inner, Pattern::Mapping(..))));
        assert_eq!(ir.to_string(), "[{Symbol => [String]}]");
        assert!(!ir.is_malformed());
    }

    #[test]
    fn boolean_sentinel_wins_over_data() {
        assert!(matches!(lower_to_ir(&Literal::boolean()), Pattern::Boolean));
        assert!(matches!(
            lower_to_ir(&Literal::Data(Value::sym("bool"))),
            Pattern::Malformed(Malformed::Unrecognized { .. })
        ));
    }

    #[test]
    fn arity_violations_become_malformed_nodes() {
        let two = lower_to_ir(&Literal::seq_of([Type::String, Type::Symbol]));
        let Pattern::Malformed(m @ Malformed::SequenceArity { .. }) = &two else {
            panic!("expected a sequence arity problem, got {two}")
        };
        assert_eq!(m.literal(), "[String, Symbol]");

        let empty = lower_to_ir(&Literal::seq_of(Vec::<Literal>::new()));
        assert!(matches!(empty, Pattern::Malformed(Malformed::SequenceArity { .. })));

        let map = lower_to_ir(&Literal::map_of([
            (Type::String, Type::Integer),
            (Type::Symbol, Type::Integer),
        ]));
        let Pattern::Malformed(m @ Malformed::MappingArity { .. }) = &map else {
            panic!("expected a map arity problem, got {map}")
        };
        assert_eq!(m.literal(), "{String => Integer, Symbol => Integer}");
    }

    #[test]
    fn malformed_nodes_are_visible_from_the_root() {
        let lit = Literal::map(Type::String, Literal::seq_of([Type::Integer, Type::Symbol]));
        let ir = lower_to_ir(&lit);
        assert!(ir.is_malformed());
        assert_eq!(ir.to_string(), "{String => [Integer, Symbol]}");
    }

    #[test]
    fn predicates_are_shared_not_copied() {
        let lit = Literal::from(KindOf(Type::Integer));
        let Literal::Predicate(p) = &lit else { unreachable!() };
        let Pattern::Predicate(q) = lower_to_ir(&lit) else { panic!("expected predicate leaf") };
        assert!(Arc::ptr_eq(p, &q));
    }
}
