//! Search criteria in prefix (Polish) notation
//!
//! A criteria list is a flat sequence of terms. Each term is either a logic
//! operator (`&`, `|`) or a field comparison triplet. An operator applies to
//! the next two complete sub-expressions, so nesting is expressed by order,
//! never by nested lists:
//!
//! ```text
//! ["|", "&", (a), (b), (c)]   ==   (a AND b) OR c
//! ```
//!
//! This flattening is the wire format expected by the remote side and must be
//! preserved exactly. Consecutive top-level expressions without an operator
//! are joined by an implicit AND, as the remote side does.

use std::fmt;
use std::mem;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CriteriaError;
use crate::value::Value;

/// Logic operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicOperator {
    /// Conjunction of the next two sub-expressions (`&`)
    #[serde(rename = "&")]
    And,
    /// Disjunction of the next two sub-expressions (`|`)
    #[serde(rename = "|")]
    Or,
}

impl LogicOperator {
    /// Wire literal for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicOperator::And => "&",
            LogicOperator::Or => "|",
        }
    }
}

impl fmt::Display for LogicOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicOperator {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "&" => Ok(LogicOperator::And),
            "|" => Ok(LogicOperator::Or),
            other => Err(CriteriaError::UnknownOperator(other.to_string())),
        }
    }
}

/// Field comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    /// `=`
    #[serde(rename = "=")]
    Eq,
    /// `!=`
    #[serde(rename = "!=")]
    Ne,
    /// `in`
    #[serde(rename = "in")]
    In,
    /// `not in`
    #[serde(rename = "not in")]
    NotIn,
    /// `ilike` (case-insensitive contains)
    #[serde(rename = "ilike")]
    Ilike,
    /// `not ilike`
    #[serde(rename = "not ilike")]
    NotIlike,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
}

impl ComparisonOperator {
    /// All operators, in declaration order.
    pub const ALL: [ComparisonOperator; 10] = [
        ComparisonOperator::Eq,
        ComparisonOperator::Ne,
        ComparisonOperator::In,
        ComparisonOperator::NotIn,
        ComparisonOperator::Ilike,
        ComparisonOperator::NotIlike,
        ComparisonOperator::Gt,
        ComparisonOperator::Lt,
        ComparisonOperator::Ge,
        ComparisonOperator::Le,
    ];

    /// Wire literal for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::Ne => "!=",
            ComparisonOperator::In => "in",
            ComparisonOperator::NotIn => "not in",
            ComparisonOperator::Ilike => "ilike",
            ComparisonOperator::NotIlike => "not ilike",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Ge => ">=",
            ComparisonOperator::Le => "<=",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonOperator {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComparisonOperator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CriteriaError::UnknownOperator(s.to_string()))
    }
}

/// A single `(field, operator, value)` comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triplet {
    /// Field name on the model
    pub field: String,
    /// Comparison applied to the field
    pub operator: ComparisonOperator,
    /// Right-hand operand
    pub value: Value,
}

impl Triplet {
    /// Create a new triplet.
    pub fn new(
        field: impl Into<String>,
        operator: ComparisonOperator,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Wire form: `[field, operator, value]`.
    pub fn to_value(&self) -> Value {
        Value::Array(vec![
            Value::String(self.field.clone()),
            Value::String(self.operator.as_str().to_string()),
            self.value.clone(),
        ])
    }
}

impl fmt::Display for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {:?})", self.field, self.operator, self.value)
    }
}

/// One element of a criteria sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    /// `&` or `|`, applying to the next two sub-expressions
    Logic(LogicOperator),
    /// A field comparison
    Triplet(Triplet),
}

impl From<Triplet> for Term {
    fn from(t: Triplet) -> Self {
        Term::Triplet(t)
    }
}

impl From<LogicOperator> for Term {
    fn from(op: LogicOperator) -> Self {
        Term::Logic(op)
    }
}

/// Flat prefix-notation search criteria.
///
/// An empty criteria list matches every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria(Vec<Term>);

impl Criteria {
    /// Empty criteria (matches every record).
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Alias of [`Criteria::new`] that reads better at call sites.
    pub fn all() -> Self {
        Self::new()
    }

    /// Criteria with a single comparison.
    pub fn filter(
        field: impl Into<String>,
        operator: ComparisonOperator,
        value: impl Into<Value>,
    ) -> Self {
        Self(vec![Term::Triplet(Triplet::new(field, operator, value))])
    }

    /// Build criteria from raw terms without validation.
    pub fn from_terms(terms: Vec<Term>) -> Self {
        Self(terms)
    }

    /// Append a term as-is.
    pub fn push(mut self, term: impl Into<Term>) -> Self {
        self.0.push(term.into());
        self
    }

    /// `left AND right`, i.e. `["&", ..left, ..right]`.
    pub fn and(left: Criteria, right: Criteria) -> Criteria {
        Self::combine(LogicOperator::And, left, right)
    }

    /// `left OR right`, i.e. `["|", ..left, ..right]`.
    pub fn or(left: Criteria, right: Criteria) -> Criteria {
        Self::combine(LogicOperator::Or, left, right)
    }

    fn combine(op: LogicOperator, left: Criteria, right: Criteria) -> Criteria {
        // An empty side matches every record: neutral for AND, absorbing for OR.
        if left.is_empty() || right.is_empty() {
            return match op {
                LogicOperator::And if left.is_empty() => right,
                LogicOperator::And => left,
                LogicOperator::Or => Criteria::all(),
            };
        }
        let mut terms = Vec::with_capacity(1 + left.len() + right.len());
        terms.push(Term::Logic(op));
        terms.extend(left.0);
        terms.extend(right.0);
        Self(terms)
    }

    /// Number of terms in the flat sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The flat term sequence.
    pub fn terms(&self) -> &[Term] {
        &self.0
    }

    /// Decode the prefix sequence into an expression tree.
    ///
    /// Returns `Ok(None)` for empty criteria. Nesting depth is bounded only
    /// by memory.
    pub fn parse(&self) -> Result<Option<Expr>, CriteriaError> {
        let mut open: Vec<Pending> = Vec::new();
        let mut root: Option<Expr> = None;

        for (position, term) in self.0.iter().enumerate() {
            let mut done = match term {
                Term::Logic(operator) => {
                    open.push(Pending {
                        operator: *operator,
                        position,
                        left: None,
                    });
                    continue;
                }
                Term::Triplet(t) => Expr::Leaf(t.clone()),
            };

            // Hand the finished expression to the innermost open operator,
            // closing every operator that now has both operands.
            loop {
                let Some(frame) = open.last_mut() else {
                    root = Some(match root.take() {
                        None => done,
                        Some(prev) => Expr::binary(LogicOperator::And, prev, done),
                    });
                    break;
                };
                match frame.left.take() {
                    None => {
                        frame.left = Some(done);
                        break;
                    }
                    Some(left) => {
                        let operator = frame.operator;
                        open.pop();
                        done = Expr::binary(operator, left, done);
                    }
                }
            }
        }

        match open.pop() {
            Some(frame) => Err(CriteriaError::MissingOperand {
                operator: frame.operator,
                position: frame.position,
            }),
            None => Ok(root),
        }
    }

    /// Check that every operator has two complete operands.
    ///
    /// Single pass over the terms; no tree is built.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        // (operator, position, operands still missing)
        let mut open: Vec<(LogicOperator, usize, u8)> = Vec::new();
        for (position, term) in self.0.iter().enumerate() {
            match term {
                Term::Logic(operator) => open.push((*operator, position, 2)),
                Term::Triplet(_) => {
                    while let Some(top) = open.last_mut() {
                        top.2 -= 1;
                        if top.2 > 0 {
                            break;
                        }
                        open.pop();
                    }
                }
            }
        }
        match open.pop() {
            Some((operator, position, _)) => {
                Err(CriteriaError::MissingOperand { operator, position })
            }
            None => Ok(()),
        }
    }

    /// Wire form: an array of `"&"`/`"|"` strings and `[field, op, value]` arrays.
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|term| match term {
                    Term::Logic(op) => Value::String(op.as_str().to_string()),
                    Term::Triplet(t) => t.to_value(),
                })
                .collect(),
        )
    }

    /// Inverse of [`Criteria::to_value`].
    pub fn from_value(value: &Value) -> Result<Criteria, CriteriaError> {
        let items = value.as_array().ok_or_else(|| CriteriaError::InvalidTerm {
            position: 0,
            reason: format!("expected Array, got {}", value.type_name()),
        })?;

        let mut terms = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            let term = match item {
                Value::String(s) => Term::Logic(s.parse()?),
                Value::Array(parts) if parts.len() == 3 => {
                    let field = parts[0].as_str().ok_or_else(|| CriteriaError::InvalidTerm {
                        position,
                        reason: "field name must be a string".to_string(),
                    })?;
                    let op = parts[1].as_str().ok_or_else(|| CriteriaError::InvalidTerm {
                        position,
                        reason: "operator must be a string".to_string(),
                    })?;
                    Term::Triplet(Triplet::new(field, op.parse()?, parts[2].clone()))
                }
                other => {
                    return Err(CriteriaError::InvalidTerm {
                        position,
                        reason: format!("unexpected {}", other.type_name()),
                    })
                }
            };
            terms.push(term);
        }
        Ok(Criteria(terms))
    }
}

impl From<Triplet> for Criteria {
    fn from(t: Triplet) -> Self {
        Criteria(vec![Term::Triplet(t)])
    }
}

impl From<Vec<Term>> for Criteria {
    fn from(terms: Vec<Term>) -> Self {
        Criteria(terms)
    }
}

impl From<Criteria> for Value {
    fn from(c: Criteria) -> Self {
        c.to_value()
    }
}

/// Operator waiting for its operands while parsing.
struct Pending {
    operator: LogicOperator,
    position: usize,
    left: Option<Expr>,
}

/// Boolean expression tree decoded from a [`Criteria`] sequence.
///
/// Flattening, formatting and dropping walk the tree with an explicit stack,
/// so arbitrarily deep trees are safe to handle.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Both sub-expressions hold
    And(Box<Expr>, Box<Expr>),
    /// At least one sub-expression holds
    Or(Box<Expr>, Box<Expr>),
    /// A single comparison
    Leaf(Triplet),
}

impl Expr {
    /// Join two expressions under a logic operator.
    pub fn binary(operator: LogicOperator, left: Expr, right: Expr) -> Expr {
        match operator {
            LogicOperator::And => Expr::And(Box::new(left), Box::new(right)),
            LogicOperator::Or => Expr::Or(Box::new(left), Box::new(right)),
        }
    }

    /// Serialize back to the flat prefix sequence.
    pub fn flatten(&self) -> Criteria {
        let mut terms = Vec::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                Expr::And(l, r) => {
                    terms.push(Term::Logic(LogicOperator::And));
                    stack.extend([&**r, &**l]);
                }
                Expr::Or(l, r) => {
                    terms.push(Term::Logic(LogicOperator::Or));
                    stack.extend([&**r, &**l]);
                }
                Expr::Leaf(t) => terms.push(Term::Triplet(t.clone())),
            }
        }
        Criteria(terms)
    }

    /// Move both children out, leaving empty leaves behind.
    fn detach_children(&mut self, out: &mut Vec<Expr>) {
        if let Expr::And(l, r) | Expr::Or(l, r) = self {
            out.push(mem::replace(&mut **l, Expr::empty_leaf()));
            out.push(mem::replace(&mut **r, Expr::empty_leaf()));
        }
    }

    fn empty_leaf() -> Expr {
        Expr::Leaf(Triplet {
            field: String::new(),
            operator: ComparisonOperator::Eq,
            value: Value::Null,
        })
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_children(&mut detached);
        while let Some(mut child) = detached.pop() {
            child.detach_children(&mut detached);
        }
    }
}

enum Piece<'a> {
    Expr(&'a Expr),
    Text(&'static str),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Piece::Expr(self)];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Expr(Expr::Leaf(t)) => write!(f, "{}", t)?,
                Piece::Expr(Expr::And(l, r)) => {
                    f.write_str("(")?;
                    stack.extend([
                        Piece::Text(")"),
                        Piece::Expr(&**r),
                        Piece::Text(" AND "),
                        Piece::Expr(&**l),
                    ]);
                }
                Piece::Expr(Expr::Or(l, r)) => {
                    f.write_str("(")?;
                    stack.extend([
                        Piece::Text(")"),
                        Piece::Expr(&**r),
                        Piece::Text(" OR "),
                        Piece::Expr(&**l),
                    ]);
                }
            }
        }
        Ok(())
    }
}
