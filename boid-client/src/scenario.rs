//! Scripted input for headless runs.
//!
//! A scenario is a JSON-lines file, one step per line:
//!
//! ```text
//! # a left-hand pinch held for 120 frames
//! {"frame": 30, "action": {"attraction": {"source": "left", "type": "start", "position": {"x": 0.0, "y": 2.0, "z": 0.0}}}}
//! {"frame": 150, "action": {"attraction": {"source": "left", "type": "end"}}}
//! {"frame": 200, "action": {"settings": {"params": {"cohesion_force": 1.2}}}}
//! {"frame": 400, "action": {"reset": {"count": 50}}}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use boid_shared::{AttractionEvent, SettingsUpdate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Attraction(AttractionEvent),
    Settings(SettingsUpdate),
    Reset { count: usize },
}

/// An action applied before the frame with index `frame` runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    pub frame: u64,
    pub action: Action,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scenario {
    steps: Vec<Step>,
}

impl Scenario {
    pub fn new(mut steps: Vec<Step>) -> Self {
        // Stable, so steps sharing a frame keep their file order
        steps.sort_by_key(|step| step.frame);
        Self { steps }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open scenario {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse scenario {}", path.display()))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut steps = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line.context("Failed to read scenario line")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let step: Step = serde_json::from_str(line)
                .with_context(|| format!("Invalid step on line {}", index + 1))?;
            steps.push(step);
        }

        log::debug!("Loaded scenario with {} steps", steps.len());
        Ok(Self::new(steps))
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
