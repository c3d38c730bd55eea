pub const BAR_WIDTH: usize = 30;

pub const DEFAULT_CURRENCY: &str = "$";
pub const DEFAULT_GOAL_NAME: &str = "Placeholder";

#[derive(Clone, Debug, PartialEq)]
pub struct AppSettings {
    pub currency: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Goal {
    pub name: String,
    pub target: f64,
    pub current: f64,
}

impl Goal {
    pub fn new(name: &str, target: f64, current: f64) -> Self {
        Self {
            name: name.to_string(),
            target,
            current,
        }
    }

    /// Fraction of the target reached, capped at 1.0.
    ///
    /// A zero target counts as complete once anything has been saved toward it.
    /// Negative progress is passed through so the percentage shows it.
    pub fn progress_ratio(&self) -> f64 {
        if self.target == 0.0 {
            return if self.current > 0.0 { 1.0 } else { 0.0 };
        }
        (self.current / self.target).min(1.0)
    }

    pub fn filled_cells(&self) -> usize {
        filled_cells(self.progress_ratio())
    }
}

impl Default for Goal {
    fn default() -> Self {
        Self::new(DEFAULT_GOAL_NAME, 230.0, 150.0)
    }
}

pub fn filled_cells(ratio: f64) -> usize {
    let cells = (BAR_WIDTH as f64 * ratio.clamp(0.0, 1.0)).floor() as usize;
    cells.min(BAR_WIDTH)
}

/// Root aggregate: settings, a non-empty goal list and the index of the goal on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerState {
    pub settings: AppSettings,
    goals: Vec<Goal>,
    active: usize,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            settings: AppSettings::default(),
            goals: vec![Goal::default()],
            active: 0,
        }
    }
}

impl TrackerState {
    /// Builds a state, substituting the placeholder goal for an empty list and
    /// clamping `active` into range.
    pub fn new(settings: AppSettings, goals: Vec<Goal>, active: usize) -> Self {
        let goals = if goals.is_empty() {
            vec![Goal::default()]
        } else {
            goals
        };
        let active = active.min(goals.len() - 1);
        Self {
            settings,
            goals,
            active,
        }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_goal(&self) -> &Goal {
        &self.goals[self.active]
    }

    pub fn active_goal_mut(&mut self) -> &mut Goal {
        &mut self.goals[self.active]
    }

    pub fn switch_goal(&mut self) {
        self.active = (self.active + 1) % self.goals.len();
    }
}
