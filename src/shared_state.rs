use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

use crate::{config::Config, coordinates::Lla};

/// Shared state accessible by all widgets.
pub struct SharedState {
    /// Observer the sky is drawn for.
    pub observer: Observer,
    /// Simulation time state.
    pub time: TimeState,
}

impl SharedState {
    pub fn with_config(config: &Config) -> Self {
        let observer = &config.sky.observer;
        let name = observer
            .name
            .clone()
            .unwrap_or_else(|| observer.position.country_city().1);

        Self {
            observer: Observer {
                name,
                position: observer.position.clone(),
            },
            time: TimeState::default(),
        }
    }
}

/// Shared time state.
#[derive(Default)]
pub struct TimeState {
    /// Time offset from the current UTC time for time simulation.
    time_offset: Duration,
}

impl TimeState {
    /// Returns the current simulation time.
    pub fn time(&self) -> DateTime<Utc> {
        Utc::now() + self.time_offset
    }

    /// Returns the calendar date of the simulation time in the local timezone.
    pub fn local_date(&self) -> NaiveDate {
        self.time().with_timezone(&Local).date_naive()
    }

    /// Sets the current simulation time.
    pub fn set_time(&mut self, time: DateTime<Utc>) {
        self.time_offset = time - Utc::now();
    }

    /// Returns the time offset.
    pub fn time_offset(&self) -> Duration {
        self.time_offset
    }

    /// Returns to the wall clock.
    pub fn reset(&mut self) {
        self.time_offset = Duration::zero();
    }

    /// Advances the simulation time.
    pub fn advance_time(&mut self, delta: Duration) {
        self.time_offset += delta;
    }

    /// Rewinds the simulation time.
    pub fn rewind_time(&mut self, delta: Duration) {
        self.time_offset -= delta;
    }
}

/// Observing location.
pub struct Observer {
    pub name: String,
    pub position: Lla,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_simulation_time() {
        let mut time = TimeState::default();
        time.advance_time(Duration::days(2));
        time.rewind_time(Duration::hours(12));
        assert_eq!(time.time_offset(), Duration::hours(36));

        time.reset();
        assert_eq!(time.time_offset(), Duration::zero());
    }

    #[test]
    fn set_time_is_relative_to_now() {
        let mut time = TimeState::default();
        let target = Utc::now() + Duration::days(30);
        time.set_time(target);
        assert!((time.time() - target).num_seconds().abs() <= 1);
    }
}
