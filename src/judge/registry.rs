use std::collections::HashMap;

use anyhow::{anyhow, Result};

use super::backend::PoseJudge;

/// Named judge backends.
///
/// The first registered judge becomes the default. A session takes ownership of one judge
/// via `take_default` / `take`.
pub struct JudgeRegistry {
    judges: HashMap<String, Box<dyn PoseJudge>>,
    default_name: Option<String>,
}

impl JudgeRegistry {
    pub fn new() -> Self {
        Self {
            judges: HashMap::new(),
            default_name: None,
        }
    }

    /// Registry holding only the geometric judge.
    pub fn with_geometric() -> Self {
        let mut registry = Self::new();
        registry.register(super::GeometricJudge::new());
        registry
    }

    /// Register a judge. The first registered judge becomes the default.
    pub fn register<J: PoseJudge + 'static>(&mut self, judge: J) {
        let name = judge.name().to_string();
        if self.default_name.is_none() {
            self.default_name = Some(name.clone());
        }
        self.judges.insert(name, Box::new(judge));
    }

    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.judges.contains_key(name) {
            return Err(anyhow!("judge '{}' not registered", name));
        }
        self.default_name = Some(name.to_string());
        Ok(())
    }

    pub fn default_name(&self) -> Option<&str> {
        self.default_name.as_deref()
    }

    /// Sorted list of registered judge names.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.judges.keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove and return a judge by name.
    pub fn take(&mut self, name: &str) -> Result<Box<dyn PoseJudge>> {
        let judge = self
            .judges
            .remove(name)
            .ok_or_else(|| anyhow!("judge '{}' not registered", name))?;
        if self.default_name.as_deref() == Some(name) {
            self.default_name = None;
        }
        Ok(judge)
    }

    /// Remove and return the default judge, warming it up first.
    pub fn take_default(&mut self) -> Result<Box<dyn PoseJudge>> {
        let name = self
            .default_name
            .clone()
            .ok_or_else(|| anyhow!("no default judge registered"))?;
        let mut judge = self.take(&name)?;
        judge.warm_up()?;
        Ok(judge)
    }
}

impl Default for JudgeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
