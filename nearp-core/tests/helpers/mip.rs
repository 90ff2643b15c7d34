use crate::mip::*;
use crate::utils::{Float, GenericResult};
use std::io::Write;

/// A scripted engine: records the posted model, replays incumbents and returns preset values.
pub struct FakeEngine {
    pub record: ModelRecord,
    pub status: SolveStatus,
    pub incumbents: Vec<Float>,
    pub failure: Option<String>,
    pub params: Option<SolveParams>,
    values: Vec<(String, Float)>,
}

impl FakeEngine {
    pub fn new(status: SolveStatus) -> Self {
        Self { record: ModelRecord::default(), status, incumbents: vec![], failure: None, params: None, values: vec![] }
    }

    pub fn with_incumbents(mut self, incumbents: Vec<Float>) -> Self {
        self.incumbents = incumbents;
        self
    }

    pub fn with_failure(mut self, failure: &str) -> Self {
        self.failure = Some(failure.to_string());
        self
    }

    /// Sets solved value of the variable with the given name, unset variables are zero.
    pub fn with_value(mut self, name: &str, value: Float) -> Self {
        self.values.push((name.to_string(), value));
        self
    }

    pub fn set_value(&mut self, name: &str, value: Float) {
        self.values.push((name.to_string(), value));
    }

    pub fn find_variable(&self, name: &str) -> Option<Variable> {
        self.record.variables().iter().position(|variable| variable.name == name).map(Variable::new)
    }

    pub fn find_constraint(&self, label: &str) -> Option<&Constraint> {
        self.record.constraints().iter().find(|constraint| constraint.label == label)
    }

    pub fn constraints_with_prefix(&self, prefix: &str) -> Vec<&Constraint> {
        self.record.constraints().iter().filter(|constraint| constraint.label.starts_with(prefix)).collect()
    }

    fn lookup(&self, variable: Variable) -> Float {
        let name = &self.record.variables()[variable.index()].name;
        self.values.iter().rev().find(|(key, _)| key == name).map_or(0., |(_, value)| *value)
    }
}

impl MipEngine for FakeEngine {
    fn add_variable(&mut self, name: &str, domain: VarDomain, lower: Float, upper: Float) -> GenericResult<Variable> {
        self.record.add_variable(name, domain, lower, upper)
    }

    fn add_constraint(&mut self, constraint: Constraint) -> GenericResult<()> {
        self.record.add_constraint(constraint)
    }

    fn set_objective(&mut self, objective: LinearExpr, direction: ObjectiveDirection) -> GenericResult<()> {
        self.record.set_objective(objective, direction)
    }

    fn solve(&mut self, params: &SolveParams, listener: &mut dyn IncumbentListener) -> GenericResult<SolveStatus> {
        self.params = Some(params.clone());

        if let Some(failure) = &self.failure {
            return Err(failure.clone().into());
        }

        self.incumbents.iter().for_each(|&objective| listener.on_incumbent(objective));

        Ok(self.status.clone())
    }

    fn value(&self, variable: Variable) -> GenericResult<Float> {
        if !self.status.is_solved() {
            return Err("no values".into());
        }

        Ok(self.lookup(variable))
    }

    fn objective_value(&self) -> GenericResult<Float> {
        Ok(self.record.objective().evaluate(|variable| self.lookup(variable)))
    }

    fn write_lp(&self, writer: &mut dyn Write) -> GenericResult<()> {
        self.record.write_lp(writer)
    }
}
