/// Idle viewport sway: a cosmetic, stateless oscillation of the garment's
/// yaw, `yaw(t) = base + amplitude * sin(t * omega)`.
///
/// Deliberately a pure function of elapsed time, fully decoupled from the
/// texture transform pipeline so render-time jitter never couples with
/// user-driven parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IdleSway {
    /// Constant yaw offset in radians.
    pub base_rad: f64,
    /// Peak deviation from the base, in radians.
    pub amplitude_rad: f64,
    /// Angular frequency in radians per second.
    pub omega: f64,
}

impl Default for IdleSway {
    fn default() -> Self {
        Self {
            base_rad: 0.0,
            amplitude_rad: 0.1,
            omega: 0.3,
        }
    }
}

impl IdleSway {
    /// Yaw angle at `t_secs` seconds of elapsed time.
    pub fn yaw_at(&self, t_secs: f64) -> f64 {
        self.base_rad + self.amplitude_rad * (t_secs * self.omega).sin()
    }

    /// Oscillation period in seconds, infinite when `omega` is zero.
    pub fn period_secs(&self) -> f64 {
        if self.omega == 0.0 {
            f64::INFINITY
        } else {
            std::f64::consts::TAU / self.omega.abs()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/motion.rs"]
mod tests;
