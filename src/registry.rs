use std::collections::{HashMap, HashSet};

use crate::error::GaitError;
use crate::model::{muscle_length, pig_lowerbody, VariableModel};

/// Immutable catalog of variable models, keyed by type tag.
///
/// Constructed once at startup and passed by reference to consumers;
/// registration validates each model eagerly so that definition mistakes
/// surface before any trial is processed.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, VariableModel>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in model catalog.
    pub fn with_builtin_models() -> Result<Self, GaitError> {
        let mut registry = Self::new();
        registry.register(pig_lowerbody())?;
        registry.register(muscle_length())?;
        Ok(registry)
    }

    pub fn register(&mut self, model: VariableModel) -> Result<(), GaitError> {
        let definition_error = |reason: String| GaitError::ModelDefinition {
            model_type: model.model_type.clone(),
            reason,
        };

        if self.models.contains_key(&model.model_type) {
            return Err(definition_error("model type already registered".into()));
        }

        let expanded = model.expand();
        let mut names = HashSet::with_capacity(expanded.len());
        for var in &expanded {
            if !names.insert(var.name.as_str()) {
                return Err(definition_error(format!(
                    "expansion produces duplicate variable '{}'",
                    var.name
                )));
            }
        }

        let labeled: HashSet<&str> = model.var_labels.keys().map(String::as_str).collect();
        let mut unlabeled: Vec<&str> = names.difference(&labeled).copied().collect();
        unlabeled.sort_unstable();
        if let Some(first) = unlabeled.first() {
            return Err(definition_error(format!(
                "{} expanded variable(s) missing from var_labels, e.g. '{first}'",
                unlabeled.len()
            )));
        }
        let mut orphaned: Vec<&str> = labeled.difference(&names).copied().collect();
        orphaned.sort_unstable();
        if let Some(first) = orphaned.first() {
            return Err(definition_error(format!(
                "{} var_labels key(s) not derivable from read_vars, e.g. '{first}'",
                orphaned.len()
            )));
        }

        self.models.insert(model.model_type.clone(), model);
        Ok(())
    }

    pub fn lookup(&self, model_type: &str) -> Result<&VariableModel, GaitError> {
        self.models
            .get(model_type)
            .ok_or_else(|| GaitError::UnknownModel(model_type.to_string()))
    }

    pub fn model_types(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::model::ReadStrategy;

    fn toy_model(model_type: &str) -> VariableModel {
        let mut var_labels = HashMap::new();
        var_labels.insert("StrideLength".to_string(), "Stride length".to_string());
        VariableModel {
            model_type: model_type.into(),
            desc: String::new(),
            read_vars: vec!["StrideLength".into()],
            read_strategy: ReadStrategy::Identity,
            var_labels,
            normal_data_map: HashMap::new(),
            y_labels: HashMap::new(),
        }
    }

    #[test]
    fn builtin_models_register_cleanly() {
        let registry = ModelRegistry::with_builtin_models().unwrap();
        assert!(registry.lookup("PiG").is_ok());
        assert!(registry.lookup("musclelen").is_ok());
    }

    #[test]
    fn unknown_model_is_reported() {
        let registry = ModelRegistry::with_builtin_models().unwrap();
        let err = registry.lookup("OGM").unwrap_err();
        assert!(matches!(err, GaitError::UnknownModel(tag) if tag == "OGM"));
    }

    #[test]
    fn duplicate_type_is_rejected() {
        let mut registry = ModelRegistry::new();
        registry.register(toy_model("gait")).unwrap();
        let err = registry.register(toy_model("gait")).unwrap_err();
        assert!(matches!(err, GaitError::ModelDefinition { .. }));
    }

    #[test]
    fn missing_labels_are_rejected() {
        let mut model = toy_model("gait");
        model.read_vars.push("StepWidth".into());
        let err = ModelRegistry::new().register(model).unwrap_err();
        match err {
            GaitError::ModelDefinition { reason, .. } => {
                assert!(reason.contains("StepWidth"), "{reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn orphan_labels_are_rejected() {
        let mut model = toy_model("gait");
        model
            .var_labels
            .insert("CadenceX".into(), "Cadence".into());
        let err = ModelRegistry::new().register(model).unwrap_err();
        match err {
            GaitError::ModelDefinition { reason, .. } => {
                assert!(reason.contains("CadenceX"), "{reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn duplicate_expansion_is_rejected() {
        let mut model = toy_model("gait");
        model.read_vars.push("StrideLength".into());
        let err = ModelRegistry::new().register(model).unwrap_err();
        match err {
            GaitError::ModelDefinition { reason, .. } => {
                assert!(reason.contains("duplicate"), "{reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
