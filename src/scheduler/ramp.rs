//! Ramp profiles.
//!
//! A [`RampProfile`] is an ordered list of stages, each pairing a duration
//! with a virtual-user target. The instantaneous target interpolates linearly
//! from the previous stage's target to the current one, rounded down so the
//! live user count can never overshoot the stage target mid-ramp.

use std::time::Duration;

/// One segment of a ramp profile: over `duration`, move the virtual-user
/// count linearly toward `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub duration: Duration,
    pub target: usize,
}

impl Stage {
    pub const fn new(duration: Duration, target: usize) -> Self {
        Self { duration, target }
    }
}

/// Lifecycle of a scenario as its profile plays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The driver has not taken its first tick yet.
    Pending,
    /// Current stage target is above the previous stage's target.
    RampUp,
    /// Current stage target equals the previous stage's target.
    Steady,
    /// Current stage target is below the previous stage's target.
    RampDown,
    /// The profile's total duration has elapsed.
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RampProfile {
    start_vus: usize,
    stages: Vec<Stage>,
}

impl RampProfile {
    pub fn new(start_vus: usize, stages: Vec<Stage>) -> Self {
        Self { start_vus, stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    /// Highest target named by any stage, used for capacity reporting.
    pub fn peak_target(&self) -> usize {
        self.stages
            .iter()
            .map(|s| s.target)
            .max()
            .unwrap_or(self.start_vus)
            .max(self.start_vus)
    }

    /// The virtual-user target at `elapsed` time into the profile.
    ///
    /// Within a stage the target moves linearly from the previous stage's
    /// target to the stage target, rounded down so an upward ramp never
    /// exceeds the stage target before the stage ends. Past the end of the
    /// profile this stays at the final stage's target.
    pub fn target_at(&self, elapsed: Duration) -> usize {
        let mut from = self.start_vus;
        let mut stage_start = Duration::ZERO;
        for stage in &self.stages {
            let stage_end = stage_start + stage.duration;
            if elapsed < stage_end {
                if stage.duration.is_zero() {
                    return stage.target;
                }
                let frac = (elapsed - stage_start).as_secs_f64() / stage.duration.as_secs_f64();
                let interpolated = from as f64 + (stage.target as f64 - from as f64) * frac;
                return interpolated.floor() as usize;
            }
            from = stage.target;
            stage_start = stage_end;
        }
        from
    }

    /// Classifies `elapsed` into a ramp phase. Never returns
    /// [`Phase::Pending`]; that state belongs to the driver before its first
    /// tick.
    pub fn phase_at(&self, elapsed: Duration) -> Phase {
        let mut from = self.start_vus;
        let mut stage_start = Duration::ZERO;
        for stage in &self.stages {
            let stage_end = stage_start + stage.duration;
            if elapsed < stage_end {
                return match stage.target.cmp(&from) {
                    std::cmp::Ordering::Greater => Phase::RampUp,
                    std::cmp::Ordering::Equal => Phase::Steady,
                    std::cmp::Ordering::Less => Phase::RampDown,
                };
            }
            from = stage.target;
            stage_start = stage_end;
        }
        Phase::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn standard_shape() -> RampProfile {
        RampProfile::new(
            0,
            vec![
                Stage::new(secs(60), 50),
                Stage::new(secs(180), 50),
                Stage::new(secs(60), 0),
            ],
        )
    }

    #[test]
    fn test_total_duration_sums_stages() {
        assert_eq!(standard_shape().total_duration(), secs(300));
    }

    #[test]
    fn test_peak_target() {
        assert_eq!(standard_shape().peak_target(), 50);
    }

    #[test]
    fn test_ramp_up_interpolates_linearly() {
        let profile = standard_shape();
        assert_eq!(profile.target_at(Duration::ZERO), 0);
        assert_eq!(profile.target_at(secs(30)), 25);
        assert_eq!(profile.target_at(secs(60)), 50);
    }

    #[test]
    fn test_steady_phase_holds_target() {
        let profile = standard_shape();
        assert_eq!(profile.target_at(secs(61)), 50);
        assert_eq!(profile.target_at(secs(150)), 50);
        assert_eq!(profile.target_at(secs(239)), 50);
    }

    #[test]
    fn test_ramp_down_strictly_decreases_to_zero() {
        let profile = standard_shape();
        let samples = [secs(240), secs(255), secs(270), secs(285), secs(300)];
        let targets: Vec<usize> = samples.iter().map(|t| profile.target_at(*t)).collect();
        assert_eq!(targets, vec![50, 37, 25, 12, 0]);
        for pair in targets.windows(2) {
            assert!(pair[1] < pair[0] || pair[0] == 0);
        }
    }

    #[test]
    fn test_target_never_exceeds_stage_ceiling() {
        let profile = standard_shape();
        let total_ms = profile.total_duration().as_millis() as u64;
        for ms in (0..=total_ms).step_by(250) {
            let target = profile.target_at(Duration::from_millis(ms));
            assert!(
                target <= 50,
                "target {target} exceeds ceiling at {ms}ms into the profile"
            );
        }
    }

    #[test]
    fn test_target_past_end_stays_at_final_target() {
        let profile = standard_shape();
        assert_eq!(profile.target_at(secs(301)), 0);
        assert_eq!(profile.target_at(secs(10_000)), 0);
    }

    #[test]
    fn test_nonzero_start_vus() {
        let profile = RampProfile::new(10, vec![Stage::new(secs(10), 20)]);
        assert_eq!(profile.target_at(Duration::ZERO), 10);
        assert_eq!(profile.target_at(secs(5)), 15);
    }

    #[test]
    fn test_zero_duration_stage_jumps_immediately() {
        let profile = RampProfile::new(
            0,
            vec![Stage::new(Duration::ZERO, 8), Stage::new(secs(10), 8)],
        );
        assert_eq!(profile.target_at(Duration::ZERO), 8);
    }

    #[test]
    fn test_phase_classification() {
        let profile = standard_shape();
        assert_eq!(profile.phase_at(Duration::ZERO), Phase::RampUp);
        assert_eq!(profile.phase_at(secs(59)), Phase::RampUp);
        assert_eq!(profile.phase_at(secs(60)), Phase::Steady);
        assert_eq!(profile.phase_at(secs(239)), Phase::Steady);
        assert_eq!(profile.phase_at(secs(240)), Phase::RampDown);
        assert_eq!(profile.phase_at(secs(299)), Phase::RampDown);
        assert_eq!(profile.phase_at(secs(300)), Phase::Done);
        assert_eq!(profile.phase_at(secs(400)), Phase::Done);
    }

    #[test]
    fn test_empty_profile_is_done_immediately() {
        let profile = RampProfile::new(0, Vec::new());
        assert_eq!(profile.phase_at(Duration::ZERO), Phase::Done);
        assert_eq!(profile.target_at(Duration::ZERO), 0);
        assert_eq!(profile.total_duration(), Duration::ZERO);
    }
}
