#[cfg(test)]
#[path = "../../tests/unit/mip/model_test.rs"]
mod model_test;

use super::*;
use crate::utils::{Float, GenericResult};
use std::io::Write;

/// Maximum amount of terms written on one line of the LP file.
const TERMS_PER_LINE: usize = 8;

/// A declared variable.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableRecord {
    /// Variable name.
    pub name: String,
    /// Variable domain.
    pub domain: VarDomain,
    /// Lower bound.
    pub lower: Float,
    /// Upper bound, can be infinite.
    pub upper: Float,
}

/// An engine independent record of a posted model.
#[derive(Clone, Debug, Default)]
pub struct ModelRecord {
    variables: Vec<VariableRecord>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
    direction: ObjectiveDirection,
}

impl ModelRecord {
    /// Declares a variable.
    pub fn add_variable(
        &mut self,
        name: &str,
        domain: VarDomain,
        lower: Float,
        upper: Float,
    ) -> GenericResult<Variable> {
        if lower > upper {
            return Err(format!("variable '{name}' has empty domain [{lower}, {upper}]").into());
        }

        let (lower, upper) = match domain {
            VarDomain::Binary => (0., 1.),
            _ => (lower, upper),
        };

        self.variables.push(VariableRecord { name: name.to_string(), domain, lower, upper });

        Ok(Variable::new(self.variables.len() - 1))
    }

    /// Posts a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) -> GenericResult<()> {
        self.check_variables(&constraint.expr).map_err(|err| err.context(&constraint.label))?;
        self.constraints.push(constraint);

        Ok(())
    }

    /// Sets the objective.
    pub fn set_objective(&mut self, objective: LinearExpr, direction: ObjectiveDirection) -> GenericResult<()> {
        self.check_variables(&objective).map_err(|err| err.context("objective"))?;
        self.objective = objective.compacted();
        self.direction = direction;

        Ok(())
    }

    /// Returns declared variables.
    pub fn variables(&self) -> &[VariableRecord] {
        self.variables.as_slice()
    }

    /// Returns posted constraints.
    pub fn constraints(&self) -> &[Constraint] {
        self.constraints.as_slice()
    }

    /// Returns compacted objective.
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Returns objective direction.
    pub fn direction(&self) -> ObjectiveDirection {
        self.direction
    }

    /// Writes the model in CPLEX LP text format.
    pub fn write_lp(&self, writer: &mut dyn Write) -> GenericResult<()> {
        let name = |variable: Variable| self.variables[variable.index()].name.as_str();

        writeln!(writer, "\\ {} variables, {} constraints", self.variables.len(), self.constraints.len())?;
        writeln!(writer, "{}", if self.direction == ObjectiveDirection::Minimize { "Minimize" } else { "Maximize" })?;
        write!(writer, " obj:")?;
        self.write_terms(writer, &self.objective, &name)?;
        if self.objective.constant() != 0. {
            write!(writer, " {}", format_coefficient(self.objective.constant(), false))?;
        }
        writeln!(writer)?;

        writeln!(writer, "Subject To")?;
        for constraint in &self.constraints {
            write!(writer, " {}:", constraint.label)?;
            self.write_terms(writer, &constraint.expr, &name)?;
            let sense = match constraint.sense {
                Sense::Eq => "=",
                Sense::Le => "<=",
                Sense::Ge => ">=",
            };
            writeln!(writer, " {sense} {}", constraint.rhs)?;
        }

        writeln!(writer, "Bounds")?;
        for variable in self.variables.iter().filter(|variable| variable.domain != VarDomain::Binary) {
            let upper = if variable.upper.is_infinite() { "+inf".to_string() } else { variable.upper.to_string() };
            let lower = if variable.lower.is_infinite() { "-inf".to_string() } else { variable.lower.to_string() };
            writeln!(writer, " {lower} <= {} <= {upper}", variable.name)?;
        }

        self.write_section(writer, "General", VarDomain::Integer)?;
        self.write_section(writer, "Binary", VarDomain::Binary)?;
        writeln!(writer, "End")?;

        Ok(())
    }

    fn write_terms<'a>(
        &'a self,
        writer: &mut dyn Write,
        expr: &LinearExpr,
        name: &impl Fn(Variable) -> &'a str,
    ) -> GenericResult<()> {
        if expr.is_empty() {
            // LP format does not allow an empty left-hand side
            if let Some(first) = self.variables.first() {
                write!(writer, " 0 {}", first.name)?;
            }
            return Ok(());
        }

        for (idx, &(variable, coeff)) in expr.terms().iter().enumerate() {
            if idx > 0 && idx % TERMS_PER_LINE == 0 {
                write!(writer, "\n   ")?;
            }
            write!(writer, " {} {}", format_coefficient(coeff, idx == 0), name(variable))?;
        }

        Ok(())
    }

    fn write_section(&self, writer: &mut dyn Write, title: &str, domain: VarDomain) -> GenericResult<()> {
        let names = self.variables.iter().filter(|variable| variable.domain == domain).map(|v| v.name.as_str());
        let names = names.collect::<Vec<_>>();

        if !names.is_empty() {
            writeln!(writer, "{title}")?;
            for chunk in names.chunks(TERMS_PER_LINE) {
                writeln!(writer, " {}", chunk.join(" "))?;
            }
        }

        Ok(())
    }

    fn check_variables(&self, expr: &LinearExpr) -> GenericResult<()> {
        match expr.terms().iter().find(|(variable, _)| variable.index() >= self.variables.len()) {
            Some((variable, _)) => Err(format!("unknown variable with index {}", variable.index()).into()),
            None => Ok(()),
        }
    }
}

fn format_coefficient(coeff: Float, is_first: bool) -> String {
    match (coeff < 0., is_first) {
        (true, _) => format!("- {}", -coeff),
        (false, true) => format!("{coeff}"),
        (false, false) => format!("+ {coeff}"),
    }
}
