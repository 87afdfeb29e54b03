//! Shared test utilities for handler modules

#[cfg(test)]
pub fn create_test_state() -> crate::app::State {
    crate::app::State::new(&crate::config::AppConfig::default(), None).0
}

/// State as it looks once the startup poll has reported back
#[cfg(test)]
pub fn create_idle_state() -> crate::app::State {
    let mut state = create_test_state();
    state.busy = false;
    state
}
