use crate::{
    effects::colormap::viridis,
    engine::{
        options::{RenderOptions, ToneMode},
        scene::Scene,
        session::{Engine, render_checked},
    },
    foundation::error::{RtnprError, RtnprResult},
    render::frame::Frame,
};

/// How the composite pass separates the mesh from the ground plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneMask {
    /// Plane is rendered transparent: it still shows the mesh's shadow in RGB, alpha is mesh-only.
    #[default]
    Transparent,
    /// Plane is not rendered at all.
    Hidden,
}

/// Settings for difference mode.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Multiplier applied to `foreground - background` before clipping to `[0, 1]`.
    pub scale: f32,
    /// Upper bound on the sample budget of the mesh-less background pass.
    pub background_spp_cap: u32,
    /// How the composite pass treats the ground plane.
    pub plane_mask: PlaneMask,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background_spp_cap: 64,
            plane_mask: PlaneMask::Transparent,
        }
    }
}

/// What one output frame is made of.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CompositeMode {
    /// One render, passed through unchanged.
    #[default]
    Standard,
    /// Three renders merged into a mesh-over-heat-map image.
    Difference(DiffOptions),
}

/// The scene/options pair for each difference-mode pass.
///
/// Every pass is derived from the same base values, so no toggle from one pass is visible to
/// another or to the next frame.
#[derive(Clone, Debug)]
pub struct DiffPasses {
    /// Tone-mapped full scene; supplies alpha and the base colour.
    pub composite: (Scene, RenderOptions),
    /// Raw render without meshes, at a capped sample budget.
    pub background: (Scene, RenderOptions),
    /// Raw render with meshes.
    pub foreground: (Scene, RenderOptions),
}

impl DiffPasses {
    /// Derive the three passes from the base scene and options.
    pub fn derive(scene: &Scene, options: &RenderOptions, diff: &DiffOptions) -> Self {
        let mut composite_scene = scene.clone();
        match diff.plane_mask {
            PlaneMask::Transparent => composite_scene.plane.transparent = true,
            PlaneMask::Hidden => composite_scene.plane.visible = false,
        }
        let composite_opts = RenderOptions {
            tone_mode: ToneMode::Reinhard,
            ..options.clone()
        };

        let bg_spp = options.spp.min(diff.background_spp_cap).max(1);
        let background_opts = RenderOptions {
            tone_mode: ToneMode::Raw,
            spp: bg_spp,
            spp_frame: options.spp_frame.min(bg_spp),
            ..options.clone()
        };

        let foreground_opts = RenderOptions {
            tone_mode: ToneMode::Raw,
            ..options.clone()
        };

        Self {
            composite: (composite_scene, composite_opts),
            background: (scene.with_meshes_visible(false), background_opts),
            foreground: (scene.with_meshes_visible(true), foreground_opts),
        }
    }
}

/// Produces exactly one output frame per frame index from one or more engine renders.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameCompositor {
    /// Standard or difference compositing.
    pub mode: CompositeMode,
}

impl FrameCompositor {
    /// Create a compositor for `mode`.
    pub fn new(mode: CompositeMode) -> Self {
        Self { mode }
    }

    /// Whether output frames are display-ready composites rather than plain renders.
    pub fn is_difference(&self) -> bool {
        matches!(self.mode, CompositeMode::Difference(_))
    }

    /// Render the current scene state and merge the passes. `scene`/`options` are not modified.
    #[tracing::instrument(level = "debug", skip_all, fields(mode = ?self.mode))]
    pub fn compose<E: Engine + ?Sized>(
        &self,
        engine: &mut E,
        scene: &Scene,
        options: &RenderOptions,
    ) -> RtnprResult<Frame> {
        match self.mode {
            CompositeMode::Standard => render_checked(engine, scene, options),
            CompositeMode::Difference(diff) => {
                let passes = DiffPasses::derive(scene, options, &diff);
                let composite = render_checked(engine, &passes.composite.0, &passes.composite.1)?;
                tracing::debug!("composite pass done");
                let background =
                    render_checked(engine, &passes.background.0, &passes.background.1)?;
                tracing::debug!(spp = passes.background.1.spp, "background pass done");
                let foreground =
                    render_checked(engine, &passes.foreground.0, &passes.foreground.1)?;
                tracing::debug!("foreground pass done");

                let scalar = difference_scalar(&foreground, &background, diff.scale)?;
                overlay_difference(&composite, &scalar)
            }
        }
    }
}

/// Pixel-wise `clip(scale * (mean_rgb(fg) - mean_rgb(bg)), 0, 1)`.
pub fn difference_scalar(fg: &Frame, bg: &Frame, scale: f32) -> RtnprResult<Vec<f32>> {
    if fg.canvas() != bg.canvas() {
        return Err(RtnprError::invalid_frame(format!(
            "difference passes disagree on size: {}x{} vs {}x{}",
            fg.width, fg.height, bg.width, bg.height
        )));
    }
    Ok(fg
        .rgb_mean()
        .into_iter()
        .zip(bg.rgb_mean())
        .map(|(f, b)| (scale * (f - b)).clamp(0.0, 1.0))
        .collect())
}

/// Blend `composite` over the viridis-mapped `scalar` field using the composite's alpha.
///
/// `out.rgb = c.rgb * c.a + (1 - c.a) * viridis(s)`, `out.a = 1`.
pub fn overlay_difference(composite: &Frame, scalar: &[f32]) -> RtnprResult<Frame> {
    if scalar.len() != composite.pixel_count() {
        return Err(RtnprError::invalid_frame(format!(
            "difference field has {} values for a {}x{} frame",
            scalar.len(),
            composite.width,
            composite.height
        )));
    }

    let mut data = Vec::with_capacity(composite.data.len());
    for (px, &s) in composite.pixels().zip(scalar) {
        let a = px[3];
        let overlay = viridis(s);
        for c in 0..3 {
            data.push(px[c] * a + (1.0 - a) * overlay[c]);
        }
        data.push(1.0);
    }

    Ok(Frame {
        width: composite.width,
        height: composite.height,
        data,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
