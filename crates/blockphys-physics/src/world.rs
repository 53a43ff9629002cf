//! Aggregate bookkeeping for the fixed-step world integrator.

use blockphys_core::DeltaTime;
use serde::{Deserialize, Serialize};

/// Elapsed simulation time and active-body count.
///
/// A plain `Copy` value: the tick driver is the only writer and observers
/// always hold a complete snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicsWorld {
    total_time: f64,
    active_bodies: usize,
    tick: u64,
}

impl PhysicsWorld {
    pub const fn new() -> Self {
        Self {
            total_time: 0.0,
            active_bodies: 0,
            tick: 0,
        }
    }

    /// Advance by one tick of `dt`, recording how many bodies were active.
    #[must_use]
    pub fn step(self, dt: DeltaTime, active_body_count: usize) -> Self {
        Self {
            total_time: self.total_time + f64::from(dt.get()),
            active_bodies: active_body_count,
            tick: self.tick + 1,
        }
    }

    /// Seconds simulated so far.
    pub const fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Bodies advanced in the most recent tick.
    pub const fn active_bodies(&self) -> usize {
        self.active_bodies
    }

    /// Ticks completed so far.
    pub const fn tick(&self) -> u64 {
        self.tick
    }
}
