//! Predicates: engine-native match conditions
//!
//! A [`Predicate`] selects the match set from a collection. Comparison
//! operators use the engine-wide total order ([`Value::cmp_total`]);
//! equality is type-strict ([`Value::eq`]), so `Eq(age, Int(22))` never
//! matches `Float(22.0)`.
//!
//! A path that resolves to multiple values (array fan-out) matches when
//! ANY resolved value satisfies the condition. A path that resolves to
//! nothing is treated as a single `Null`.

use folio_core::{Document, FieldPath, Result, Value};
use std::cmp::Ordering;

/// Boolean condition over document fields
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every document
    All,
    /// Field equals value (type-strict)
    Eq(FieldPath, Value),
    /// Field does not equal value
    Ne(FieldPath, Value),
    /// Field orders strictly above value
    Gt(FieldPath, Value),
    /// Field orders at or above value
    Gte(FieldPath, Value),
    /// Field orders strictly below value
    Lt(FieldPath, Value),
    /// Field orders at or below value
    Lte(FieldPath, Value),
    /// Every sub-predicate matches
    And(Vec<Predicate>),
    /// At least one sub-predicate matches
    Or(Vec<Predicate>),
    /// Sub-predicate does not match
    Not(Box<Predicate>),
}

impl Predicate {
    /// Field equals value
    pub fn eq(path: &str, value: impl Into<Value>) -> Result<Self> {
        Ok(Predicate::Eq(FieldPath::parse(path)?, value.into()))
    }

    /// Field does not equal value
    pub fn ne(path: &str, value: impl Into<Value>) -> Result<Self> {
        Ok(Predicate::Ne(FieldPath::parse(path)?, value.into()))
    }

    /// Field orders strictly above value
    pub fn gt(path: &str, value: impl Into<Value>) -> Result<Self> {
        Ok(Predicate::Gt(FieldPath::parse(path)?, value.into()))
    }

    /// Field orders at or above value
    pub fn gte(path: &str, value: impl Into<Value>) -> Result<Self> {
        Ok(Predicate::Gte(FieldPath::parse(path)?, value.into()))
    }

    /// Field orders strictly below value
    pub fn lt(path: &str, value: impl Into<Value>) -> Result<Self> {
        Ok(Predicate::Lt(FieldPath::parse(path)?, value.into()))
    }

    /// Field orders at or below value
    pub fn lte(path: &str, value: impl Into<Value>) -> Result<Self> {
        Ok(Predicate::Lte(FieldPath::parse(path)?, value.into()))
    }

    /// Evaluate against one document
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Eq(path, target) => any_value(path, doc, |v| v == target),
            Predicate::Ne(path, target) => !any_value(path, doc, |v| v == target),
            Predicate::Gt(path, target) => {
                any_value(path, doc, |v| v.cmp_total(target) == Ordering::Greater)
            }
            Predicate::Gte(path, target) => {
                any_value(path, doc, |v| v.cmp_total(target) != Ordering::Less)
            }
            Predicate::Lt(path, target) => {
                any_value(path, doc, |v| v.cmp_total(target) == Ordering::Less)
            }
            Predicate::Lte(path, target) => {
                any_value(path, doc, |v| v.cmp_total(target) != Ordering::Greater)
            }
            Predicate::And(preds) => preds.iter().all(|p| p.matches(doc)),
            Predicate::Or(preds) => preds.iter().any(|p| p.matches(doc)),
            Predicate::Not(pred) => !pred.matches(doc),
        }
    }
}

fn any_value(path: &FieldPath, doc: &Document, check: impl Fn(&Value) -> bool) -> bool {
    let values = path.eval(doc);
    if values.is_empty() {
        return check(&Value::Null);
    }
    values.iter().any(check)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: i64, age: i64) -> Document {
        Document::new(id).with("age", age).with("name", format!("p{}", id))
    }

    #[test]
    fn test_all_matches_everything() {
        assert!(Predicate::All.matches(&person(1, 20)));
    }

    #[test]
    fn test_eq_is_type_strict() {
        let doc = person(1, 22);
        assert!(Predicate::eq("age", 22).unwrap().matches(&doc));
        assert!(!Predicate::eq("age", 22.0).unwrap().matches(&doc));
        assert!(!Predicate::eq("age", 23).unwrap().matches(&doc));
    }

    #[test]
    fn test_ordered_comparisons() {
        let doc = person(1, 22);
        assert!(Predicate::gt("age", 21).unwrap().matches(&doc));
        assert!(Predicate::gte("age", 22).unwrap().matches(&doc));
        assert!(Predicate::lt("age", 23).unwrap().matches(&doc));
        assert!(!Predicate::lt("age", 22).unwrap().matches(&doc));
        assert!(Predicate::lte("age", 22).unwrap().matches(&doc));
    }

    #[test]
    fn test_missing_field_is_null() {
        let doc = Document::new(1);
        assert!(Predicate::eq("age", Value::Null).unwrap().matches(&doc));
        assert!(!Predicate::eq("age", 22).unwrap().matches(&doc));
        // Null sorts below every Int
        assert!(Predicate::lt("age", 0).unwrap().matches(&doc));
    }

    #[test]
    fn test_and_or_not() {
        let doc = person(1, 22);
        let and = Predicate::And(vec![
            Predicate::gt("age", 18).unwrap(),
            Predicate::lt("age", 30).unwrap(),
        ]);
        assert!(and.matches(&doc));

        let or = Predicate::Or(vec![
            Predicate::eq("age", 99).unwrap(),
            Predicate::eq("name", "p1").unwrap(),
        ]);
        assert!(or.matches(&doc));

        assert!(!Predicate::Not(Box::new(Predicate::All)).matches(&doc));
    }

    #[test]
    fn test_array_fan_out_any_semantics() {
        let doc = Document::new(1).with(
            "scores",
            Value::Array(vec![Value::Int(3), Value::Int(9)]),
        );
        assert!(Predicate::eq("scores", 9).unwrap().matches(&doc));
        assert!(!Predicate::eq("scores", 5).unwrap().matches(&doc));
    }

    #[test]
    fn test_predicate_on_id() {
        let doc = person(7, 22);
        assert!(Predicate::eq("_id", 7).unwrap().matches(&doc));
    }
}
