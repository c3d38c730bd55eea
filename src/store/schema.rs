use serde::{Deserialize, Serialize};

use crate::model::{AppSettings, DEFAULT_GOAL_NAME, Goal, TrackerState};

/// On-disk shape of `goal.json`.
///
/// Every key is optional so files written by older versions (no `appsett`,
/// no `active`) still load; `into_state` turns whatever was read into a
/// state that upholds the model invariants.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SaveFile {
    #[serde(default)]
    pub appsett: AppSettingsRecord,
    #[serde(default)]
    pub goals: Vec<GoalRecord>,
    #[serde(default)]
    pub active: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppSettingsRecord {
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for AppSettingsRecord {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

fn default_currency() -> String {
    AppSettings::default().currency
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GoalRecord {
    #[serde(default = "default_goal_name")]
    pub name: String,
    #[serde(default)]
    pub target: f64,
    #[serde(default)]
    pub current: f64,
}

fn default_goal_name() -> String {
    DEFAULT_GOAL_NAME.to_string()
}

impl SaveFile {
    pub fn from_state(state: &TrackerState) -> Self {
        Self {
            appsett: AppSettingsRecord {
                currency: state.settings.currency.clone(),
            },
            goals: state
                .goals()
                .iter()
                .map(|g| GoalRecord {
                    name: g.name.clone(),
                    target: g.target,
                    current: g.current,
                })
                .collect(),
            active: state.active_index() as i64,
        }
    }

    pub fn into_state(self) -> TrackerState {
        let goals: Vec<Goal> = self
            .goals
            .into_iter()
            .map(|g| Goal {
                name: g.name,
                target: g.target,
                current: g.current,
            })
            .collect();
        let active = usize::try_from(self.active).unwrap_or(0);
        TrackerState::new(
            AppSettings {
                currency: self.appsett.currency,
            },
            goals,
            active,
        )
    }

    /// Returns true when every number can be represented in JSON.
    pub fn is_encodable(&self) -> bool {
        self.goals
            .iter()
            .all(|g| g.target.is_finite() && g.current.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> TrackerState {
        serde_json::from_str::<SaveFile>(json).unwrap().into_state()
    }

    #[test]
    fn missing_appsett_defaults_currency() {
        let state = decode(r#"{"goals":[{"name":"Car","target":10.0,"current":1.0}],"active":0}"#);
        assert_eq!(state.settings.currency, "$");
        assert_eq!(state.active_goal().name, "Car");
    }

    #[test]
    fn missing_active_defaults_to_zero() {
        let state = decode(
            r#"{"appsett":{"currency":"EUR"},"goals":[{"name":"A","target":1.0,"current":0.0},{"name":"B","target":2.0,"current":0.0}]}"#,
        );
        assert_eq!(state.active_index(), 0);
        assert_eq!(state.settings.currency, "EUR");
    }

    #[test]
    fn missing_goals_yields_placeholder() {
        let state = decode(r#"{"appsett":{"currency":"zl"},"active":3}"#);
        assert_eq!(state.goals(), &[Goal::default()]);
        assert_eq!(state.active_index(), 0);
        assert_eq!(state.settings.currency, "zl");
    }

    #[test]
    fn empty_object_yields_default_state() {
        assert_eq!(decode("{}"), TrackerState::default());
    }

    #[test]
    fn out_of_range_active_is_clamped() {
        let state = decode(
            r#"{"goals":[{"name":"A","target":1.0,"current":0.0},{"name":"B","target":2.0,"current":0.0}],"active":7}"#,
        );
        assert_eq!(state.active_index(), 1);
    }

    #[test]
    fn negative_active_is_clamped_to_zero() {
        let state = decode(
            r#"{"goals":[{"name":"A","target":1.0,"current":0.0},{"name":"B","target":2.0,"current":0.0}],"active":-2}"#,
        );
        assert_eq!(state.active_index(), 0);
    }

    #[test]
    fn partial_goal_record_gets_defaults() {
        let state = decode(r#"{"goals":[{"target":50}]}"#);
        let g = state.active_goal();
        assert_eq!(g.name, "Placeholder");
        assert_eq!(g.target, 50.0);
        assert_eq!(g.current, 0.0);
    }

    #[test]
    fn integer_amounts_are_accepted() {
        let state = decode(r#"{"goals":[{"name":"Bike","target":300,"current":45}]}"#);
        assert_eq!(state.active_goal().target, 300.0);
        assert_eq!(state.active_goal().current, 45.0);
    }

    #[test]
    fn encode_then_decode_preserves_state() {
        let state = TrackerState::new(
            AppSettings {
                currency: "PLN".to_string(),
            },
            vec![
                Goal::new("Holiday", 1234.5, 99.99),
                Goal::new("Laptop", 0.1, -3.25),
            ],
            1,
        );
        let json = serde_json::to_string_pretty(&SaveFile::from_state(&state)).unwrap();
        assert_eq!(decode(&json), state);
    }

    #[test]
    fn non_finite_numbers_are_not_encodable() {
        let mut file = SaveFile::from_state(&TrackerState::default());
        assert!(file.is_encodable());
        file.goals[0].target = f64::NAN;
        assert!(!file.is_encodable());
    }
}
