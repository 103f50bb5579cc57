use crossterm::event::KeyCode;

use crate::flows::WorkoutForm;
use crate::models::Exercise;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Exercise,
    Date,
    Sets,
    Reps,
    Weight,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Exercise,
        FormField::Date,
        FormField::Sets,
        FormField::Reps,
        FormField::Weight,
        FormField::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Exercise => "Exercise",
            FormField::Date => "Date",
            FormField::Sets => "Sets",
            FormField::Reps => "Reps",
            FormField::Weight => "Weight (kg)",
            FormField::Notes => "Notes",
        }
    }

    fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What the editor wants after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    Editing,
    Submit,
    Cancel,
}

/// In-dashboard editor for a `WorkoutForm`
#[derive(Debug, Clone, PartialEq)]
pub struct FormEditor {
    pub form: WorkoutForm,
    pub field: FormField,
    exercise_index: Option<usize>,
}

impl FormEditor {
    /// Start from `form`, preselecting the first exercise when none is set
    pub fn new(mut form: WorkoutForm, exercises: &[Exercise]) -> Self {
        let exercise_index = exercises
            .iter()
            .position(|e| e.id == form.exercise_id)
            .or_else(|| (!exercises.is_empty()).then_some(0));

        if let Some(i) = exercise_index {
            form.exercise_id = exercises[i].id.clone();
        }

        Self {
            form,
            field: FormField::Exercise,
            exercise_index,
        }
    }

    pub fn selected_exercise<'a>(&self, exercises: &'a [Exercise]) -> Option<&'a Exercise> {
        self.exercise_index.and_then(|i| exercises.get(i))
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Exercise => &self.form.exercise_id,
            FormField::Date => &self.form.workout_date,
            FormField::Sets => &self.form.sets,
            FormField::Reps => &self.form.reps,
            FormField::Weight => &self.form.weight_kg,
            FormField::Notes => &self.form.notes,
        }
    }

    fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            // Picked from the catalog, never typed
            FormField::Exercise => None,
            FormField::Date => Some(&mut self.form.workout_date),
            FormField::Sets => Some(&mut self.form.sets),
            FormField::Reps => Some(&mut self.form.reps),
            FormField::Weight => Some(&mut self.form.weight_kg),
            FormField::Notes => Some(&mut self.form.notes),
        }
    }

    fn cycle_exercise(&mut self, exercises: &[Exercise], forward: bool) {
        let len = exercises.len();
        if len == 0 {
            return;
        }

        let next = match self.exercise_index {
            None => 0,
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
        };
        self.exercise_index = Some(next);
        self.form.exercise_id = exercises[next].id.clone();
    }

    pub fn handle_key(&mut self, key: KeyCode, exercises: &[Exercise]) -> FormInput {
        match key {
            KeyCode::Esc => return FormInput::Cancel,
            KeyCode::Enter => return FormInput::Submit,
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.prev(),
            KeyCode::Left if self.field == FormField::Exercise => {
                self.cycle_exercise(exercises, false)
            }
            KeyCode::Right if self.field == FormField::Exercise => {
                self.cycle_exercise(exercises, true)
            }
            KeyCode::Backspace => {
                if let Some(value) = self.value_mut(self.field) {
                    value.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(value) = self.value_mut(self.field) {
                    value.push(c);
                }
            }
            _ => {}
        }
        FormInput::Editing
    }
}
