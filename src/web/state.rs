use crate::calc::Calculator;
use crate::config::Config;

/// Shared, read-only state. Requests never mutate it.
pub struct AppState {
    pub calculator: Calculator,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            calculator: Calculator::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
