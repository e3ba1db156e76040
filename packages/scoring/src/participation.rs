//! Citizen participation and officer efficiency scores.
//!
//! Both are pure functions of the submitted/verified or
//! assigned/completed counters: safe to recompute on every scheduler
//! pass, never hand-edited.

use crate::round1;

/// Citizen participation score, 0-10.
///
/// `min(10, 5 * verified/submitted + min(submitted/20, 3) + 2)`, rounded
/// to one decimal; zero when the citizen has never submitted a report.
/// The verification ratio rewards quality, the activity bonus rewards
/// volume (capped), and the constant 2 floors any active citizen above
/// inactive ones.
#[must_use]
pub fn participation_score(submitted: u32, verified: u32) -> f64 {
    if submitted == 0 {
        return 0.0;
    }
    let verification_rate = 5.0 * (f64::from(verified) / f64::from(submitted));
    let activity_bonus = (f64::from(submitted) / 20.0).min(3.0);
    round1((verification_rate + activity_bonus + 2.0).min(10.0))
}

/// Officer efficiency, 0-100.
///
/// Completion rate as a rounded percentage; zero when the officer has
/// never been assigned a task.
#[must_use]
pub fn officer_efficiency(assigned: u32, completed: u32) -> f64 {
    if assigned == 0 {
        return 0.0;
    }
    ((f64::from(completed) / f64::from(assigned)) * 100.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participation_fixture() {
        // 10 submitted, all verified: 5*1 + min(0.5, 3) + 2 = 7.5.
        assert!((participation_score(10, 10) - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn participation_zero_without_submissions() {
        assert!((participation_score(0, 0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn participation_caps_at_ten() {
        // Heavy, fully-verified activity saturates the score.
        assert!((participation_score(200, 200) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn participation_is_bounded() {
        for submitted in 0..50 {
            for verified in 0..=submitted {
                let score = participation_score(submitted, verified);
                assert!((0.0..=10.0).contains(&score));
            }
        }
    }

    #[test]
    fn efficiency_rounds_to_whole_percent() {
        assert!((officer_efficiency(3, 2) - 67.0).abs() < f64::EPSILON);
        assert!((officer_efficiency(4, 4) - 100.0).abs() < f64::EPSILON);
        assert!((officer_efficiency(0, 0) - 0.0).abs() < f64::EPSILON);
    }
}
