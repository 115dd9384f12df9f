//! Available-profile directory.
//!
//! Tracks how many identity profiles the backend can still hand out and
//! derives the slider constraints and counter text from that number. A
//! failed refresh degrades to zero availability rather than erroring, so
//! the panel stays usable while the backend is down.

use std::sync::Arc;

use crate::backend::client::LobbyBackend;
use crate::lobby::projection;
use crate::services::activity_log::SharedLog;
use crate::types::view::SliderConstraints;

pub struct ProfileDirectory {
    backend: Arc<dyn LobbyBackend>,
    log: SharedLog,
    available: u32,
}

impl ProfileDirectory {
    pub fn new(backend: Arc<dyn LobbyBackend>, log: SharedLog) -> Self {
        Self {
            backend,
            log,
            available: 0,
        }
    }

    /// Asks the backend how many profiles remain. On failure the count
    /// drops to zero and the failure is logged.
    pub async fn refresh(&mut self) -> u32 {
        match self.backend.profiles().await {
            Ok(response) => {
                self.available = response.count;
                self.log
                    .info(format!("{} profiles available", self.available));
            }
            Err(e) => {
                self.available = 0;
                self.log
                    .warning(format!("Failed to fetch profile count: {}", e));
            }
        }
        self.available
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    /// Counter text shown above the bot-count slider.
    pub fn counter_text(&self) -> String {
        projection::profiles_counter(self.available)
    }

    /// Slider constraints for the current availability.
    pub fn slider(&self, current: u32) -> SliderConstraints {
        projection::slider_constraints(self.available, current)
    }
}
