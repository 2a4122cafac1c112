use std::f32::consts::PI;

use crate::foundation::core::Vec3;

/// How the sun's sweep angle avoids the horizon (`0` and `pi`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepPolicy {
    /// Sweep `[pi/8, 7pi/8]`: the second through second-to-last of 9 even samples of `[0, pi]`.
    #[default]
    InsetEighths,
    /// Take `n + 2` even samples of `[0, pi]` and drop both ends.
    OpenInterval,
}

impl SweepPolicy {
    /// `n_frames` sweep angles, strictly inside `(0, pi)` and increasing.
    pub fn angles(self, n_frames: usize) -> Vec<f32> {
        match self {
            Self::InsetEighths => linspace(PI / 8.0, 7.0 * PI / 8.0, n_frames),
            Self::OpenInterval => {
                let all = linspace(0.0, PI, n_frames + 2);
                all[1..=n_frames].to_vec()
            }
        }
    }
}

/// Orthonormal basis of the vertical sweep plane: `(1,0,0)` and `normalize((0,-1,1))`.
pub fn sweep_basis() -> (Vec3, Vec3) {
    (Vec3::x(), Vec3::new(0.0, -1.0, 1.0).normalize())
}

/// Towards-sun directions `cos(phi) b1 + sin(phi) b2` for each sweep angle.
pub fn sun_directions(n_frames: usize, policy: SweepPolicy) -> Vec<Vec3> {
    let (b1, b2) = sweep_basis();
    policy
        .angles(n_frames)
        .into_iter()
        .map(|phi| b1 * phi.cos() + b2 * phi.sin())
        .collect()
}

/// `n` evenly spaced samples of `[start, end]`; a single sample is `start`.
fn linspace(start: f32, end: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f32;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f32 })
                .collect()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sun.rs"]
mod tests;
