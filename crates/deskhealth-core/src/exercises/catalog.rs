//! Exercise catalogue and rotation.
//!
//! The catalogue is the built-in stretches followed by user-defined ones,
//! rearranged by a saved id order. Exercises are enabled unless explicitly
//! switched off. The rotation picks the enabled exercise after the one done
//! last, wrapping around.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Stretching,
    Mobility,
    Strength,
    EyeCare,
}

impl std::str::FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stretching" => Ok(Category::Stretching),
            "mobility" => Ok(Category::Mobility),
            "strength" => Ok(Category::Strength),
            "eye-care" | "eyecare" | "eye_care" => Ok(Category::EyeCare),
            other => Err(ValidationError::InvalidValue {
                field: "category".into(),
                message: format!("unknown category '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Free-form, e.g. "30 sec/side".
    pub duration: String,
    pub category: Category,
    #[serde(default)]
    pub custom: bool,
}

/// Fields for a new user-defined exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExercise {
    pub name: String,
    pub description: String,
    pub duration: String,
    pub category: Category,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub category: Option<Category>,
}

fn builtin(id: u32, name: &str, description: &str, duration: &str, category: Category) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.into(),
        description: description.into(),
        duration: duration.into(),
        category,
        custom: false,
    }
}

/// The stretches shipped with the application.
pub fn builtin_exercises() -> Vec<Exercise> {
    vec![
        builtin(1, "Neck Rolls", "Gently roll your head in a circular motion. 5 times/direction.", "1 min", Category::Stretching),
        builtin(2, "Shoulder Shrugs", "Lift your shoulders to your ears, hold for 3s, then release.", "1 min", Category::Stretching),
        builtin(3, "Wrist Flexor Stretch", "Extend arm, pull fingers back gently with other hand.", "30 sec/hand", Category::Stretching),
        builtin(4, "Seated Spine Twist", "Twist your torso to one side, holding the chair back.", "30 sec/side", Category::Mobility),
        builtin(5, "Desk Push-ups", "Stand up, place hands on desk, and do push-ups.", "1 min", Category::Strength),
        builtin(6, "Eye Roll", "Look up, down, left, right without moving your head.", "30 sec", Category::EyeCare),
        builtin(7, "20-20-20 Rule", "Look at something 20 feet away for 20 seconds.", "20 sec", Category::EyeCare),
    ]
}

/// User-editable catalogue state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseCatalog {
    #[serde(default)]
    pub custom: Vec<Exercise>,
    /// Explicit enabled flags by id; missing means enabled.
    #[serde(default)]
    pub states: BTreeMap<String, bool>,
    /// Saved display order by id.
    #[serde(default)]
    pub order: Vec<String>,
}

impl ExerciseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Every exercise in display order.
    pub fn all(&self) -> Vec<Exercise> {
        let merged: Vec<Exercise> = builtin_exercises()
            .into_iter()
            .chain(self.custom.iter().cloned())
            .collect();
        if self.order.is_empty() {
            return merged;
        }

        let mut remaining: Vec<Option<Exercise>> = merged.into_iter().map(Some).collect();
        let mut ordered = Vec::with_capacity(remaining.len());
        for id in &self.order {
            if let Some(slot) = remaining
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|ex| &ex.id == id))
            {
                ordered.extend(slot.take());
            }
        }
        ordered.extend(remaining.into_iter().flatten());
        ordered
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.states.get(id).copied().unwrap_or(true)
    }

    /// Enabled exercises in display order.
    pub fn enabled(&self) -> Vec<Exercise> {
        self.all()
            .into_iter()
            .filter(|ex| self.is_enabled(&ex.id))
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<Exercise> {
        self.all().into_iter().find(|ex| ex.id == id)
    }

    /// Next exercise in the rotation after `last_done`.
    ///
    /// Starts from the first enabled exercise when `last_done` is absent or
    /// no longer enabled. `None` when nothing is enabled.
    pub fn upcoming(&self, last_done: Option<&str>) -> Option<Exercise> {
        let enabled = self.enabled();
        if enabled.is_empty() {
            return None;
        }
        let next = last_done
            .and_then(|id| enabled.iter().position(|ex| ex.id == id))
            .map(|i| (i + 1) % enabled.len())
            .unwrap_or(0);
        enabled.into_iter().nth(next)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Add a user-defined exercise under a fresh id.
    pub fn add(&mut self, new: NewExercise) -> Result<Exercise, ValidationError> {
        if new.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "must not be empty".into(),
            });
        }
        let exercise = Exercise {
            id: uuid::Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            duration: new.duration,
            category: new.category,
            custom: true,
        };
        self.custom.push(exercise.clone());
        Ok(exercise)
    }

    pub fn update(&mut self, id: &str, update: ExerciseUpdate) -> Result<Exercise, ValidationError> {
        let exercise = self.custom_mut(id)?;
        if let Some(name) = update.name {
            exercise.name = name;
        }
        if let Some(description) = update.description {
            exercise.description = description;
        }
        if let Some(duration) = update.duration {
            exercise.duration = duration;
        }
        if let Some(category) = update.category {
            exercise.category = category;
        }
        Ok(exercise.clone())
    }

    /// Remove a user-defined exercise and its saved position.
    pub fn delete(&mut self, id: &str) -> Result<Exercise, ValidationError> {
        self.custom_mut(id)?;
        let index = self
            .custom
            .iter()
            .position(|ex| ex.id == id)
            .ok_or_else(|| ValidationError::ExerciseNotFound(id.to_string()))?;
        self.order.retain(|o| o != id);
        Ok(self.custom.remove(index))
    }

    /// Flip the enabled flag. Returns the new value.
    pub fn toggle_enabled(&mut self, id: &str) -> Result<bool, ValidationError> {
        if self.find(id).is_none() {
            return Err(ValidationError::ExerciseNotFound(id.to_string()));
        }
        let enabled = !self.is_enabled(id);
        self.states.insert(id.to_string(), enabled);
        Ok(enabled)
    }

    /// Move the exercise at `index` one place earlier. No-op at the top.
    pub fn move_up(&mut self, index: usize) -> Result<(), ValidationError> {
        self.check_index(index)?;
        if index > 0 {
            self.move_exercise(index, index - 1);
        }
        Ok(())
    }

    /// Move the exercise at `index` one place later. No-op at the bottom.
    pub fn move_down(&mut self, index: usize) -> Result<(), ValidationError> {
        let len = self.check_index(index)?;
        if index + 1 < len {
            self.move_exercise(index, index + 1);
        }
        Ok(())
    }

    /// Replace the saved order wholesale.
    pub fn reorder(&mut self, ids: Vec<String>) {
        self.order = ids;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn custom_mut(&mut self, id: &str) -> Result<&mut Exercise, ValidationError> {
        if builtin_exercises().iter().any(|ex| ex.id == id) {
            return Err(ValidationError::BuiltinExercise(id.to_string()));
        }
        self.custom
            .iter_mut()
            .find(|ex| ex.id == id)
            .ok_or_else(|| ValidationError::ExerciseNotFound(id.to_string()))
    }

    fn check_index(&self, index: usize) -> Result<usize, ValidationError> {
        let len = self.all().len();
        if index >= len {
            return Err(ValidationError::OutOfBounds {
                collection: "exercises".into(),
                index,
                len,
            });
        }
        Ok(len)
    }

    fn move_exercise(&mut self, from: usize, to: usize) {
        let mut ids: Vec<String> = self.all().into_iter().map(|ex| ex.id).collect();
        let moved = ids.remove(from);
        ids.insert(to, moved);
        self.order = ids;
    }
}
