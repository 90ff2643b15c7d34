#[cfg(test)]
#[path = "../../tests/unit/mip/expression_test.rs"]
mod expression_test;

use super::Variable;
use crate::utils::Float;
use std::ops::{Add, Sub};

/// A linear expression: a sum of `coefficient * variable` terms plus a constant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(Variable, Float)>,
    constant: Float,
}

impl LinearExpr {
    /// Creates an empty expression.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a constant expression.
    pub fn constant_value(constant: Float) -> Self {
        Self { terms: vec![], constant }
    }

    /// Adds `coeff * variable` term.
    pub fn add_term(&mut self, variable: Variable, coeff: Float) -> &mut Self {
        self.terms.push((variable, coeff));
        self
    }

    /// Adds another expression.
    pub fn add_expr(&mut self, other: &LinearExpr) -> &mut Self {
        self.add_scaled(other, 1.)
    }

    /// Adds another expression multiplied by `factor`.
    pub fn add_scaled(&mut self, other: &LinearExpr, factor: Float) -> &mut Self {
        self.terms.extend(other.terms.iter().map(|&(variable, coeff)| (variable, coeff * factor)));
        self.constant += other.constant * factor;
        self
    }

    /// Returns the expression multiplied by `factor`.
    pub fn scaled(&self, factor: Float) -> Self {
        let mut expr = LinearExpr::empty();
        expr.add_scaled(self, factor);
        expr
    }

    /// Returns terms in insertion order, variables may repeat.
    pub fn terms(&self) -> &[(Variable, Float)] {
        self.terms.as_slice()
    }

    /// Returns constant part.
    pub fn constant(&self) -> Float {
        self.constant
    }

    /// Returns true if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns an equivalent expression where every variable appears at most once, ordered by variable,
    /// and zero coefficients are dropped.
    pub fn compacted(&self) -> Self {
        let mut terms = self.terms.clone();
        terms.sort_by_key(|(variable, _)| *variable);

        let mut merged: Vec<(Variable, Float)> = Vec::with_capacity(terms.len());
        for (variable, coeff) in terms {
            match merged.last_mut() {
                Some(last) if last.0 == variable => last.1 += coeff,
                _ => merged.push((variable, coeff)),
            }
        }

        Self { terms: merged.into_iter().filter(|(_, coeff)| *coeff != 0.).collect(), constant: self.constant }
    }

    /// Evaluates the expression with the given variable values.
    pub fn evaluate<F: Fn(Variable) -> Float>(&self, value_fn: F) -> Float {
        self.terms.iter().fold(self.constant, |acc, &(variable, coeff)| acc + coeff * value_fn(variable))
    }
}

impl From<Variable> for LinearExpr {
    fn from(variable: Variable) -> Self {
        Self { terms: vec![(variable, 1.)], constant: 0. }
    }
}

impl From<Float> for LinearExpr {
    fn from(constant: Float) -> Self {
        Self::constant_value(constant)
    }
}

impl From<&LinearExpr> for LinearExpr {
    fn from(expr: &LinearExpr) -> Self {
        expr.clone()
    }
}

impl FromIterator<(Variable, Float)> for LinearExpr {
    fn from_iter<T: IntoIterator<Item = (Variable, Float)>>(iter: T) -> Self {
        Self { terms: iter.into_iter().collect(), constant: 0. }
    }
}

impl Extend<(Variable, Float)> for LinearExpr {
    fn extend<T: IntoIterator<Item = (Variable, Float)>>(&mut self, iter: T) {
        self.terms.extend(iter)
    }
}

impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.add_expr(&rhs);
        self
    }
}

impl Sub for LinearExpr {
    type Output = LinearExpr;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self.add_scaled(&rhs, -1.);
        self
    }
}

/// A constraint sense.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sense {
    /// `expr == rhs`
    Eq,
    /// `expr <= rhs`
    Le,
    /// `expr >= rhs`
    Ge,
}

/// A linear constraint in `expr (sense) rhs` form: all variables on the left, the constant on the right.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    /// Constraint name.
    pub label: String,
    /// Compacted left-hand side without constant.
    pub expr: LinearExpr,
    /// Constraint sense.
    pub sense: Sense,
    /// Right-hand side constant.
    pub rhs: Float,
}

impl Constraint {
    /// Creates a constraint `lhs (sense) rhs` where both sides can be expressions or constants.
    pub fn new(
        label: impl Into<String>,
        lhs: impl Into<LinearExpr>,
        sense: Sense,
        rhs: impl Into<LinearExpr>,
    ) -> Self {
        let expr = (lhs.into() - rhs.into()).compacted();
        let rhs = if expr.constant == 0. { 0. } else { -expr.constant };

        Self { label: label.into(), expr: LinearExpr { terms: expr.terms, constant: 0. }, sense, rhs }
    }

    /// Creates `lhs == rhs` constraint.
    pub fn eq(label: impl Into<String>, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Self {
        Self::new(label, lhs, Sense::Eq, rhs)
    }

    /// Creates `lhs <= rhs` constraint.
    pub fn le(label: impl Into<String>, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Self {
        Self::new(label, lhs, Sense::Le, rhs)
    }

    /// Creates `lhs >= rhs` constraint.
    pub fn ge(label: impl Into<String>, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Self {
        Self::new(label, lhs, Sense::Ge, rhs)
    }

    /// Checks whether the constraint holds for the given values within tolerance.
    pub fn is_satisfied<F: Fn(Variable) -> Float>(&self, value_fn: F, tolerance: Float) -> bool {
        let lhs = self.expr.evaluate(value_fn);
        match self.sense {
            Sense::Eq => (lhs - self.rhs).abs() <= tolerance,
            Sense::Le => lhs <= self.rhs + tolerance,
            Sense::Ge => lhs >= self.rhs - tolerance,
        }
    }
}
