use avatar_animation_core::{
    missing_bones, Clip, ClipPlayer, PlayerConfig, PoseCorrectionSet, RetargetCache,
    RetargetReport, Skeleton,
};

use crate::diagnostics::DiagnosticsCfg;

/// Body side of an avatar: the idle clip player followed by the static pose
/// corrections.
#[derive(Debug)]
pub struct AnimationController {
    pub player: ClipPlayer,
    pub corrections: PoseCorrectionSet,
    cache: RetargetCache,
    report: Option<RetargetReport>,
}

impl AnimationController {
    pub fn new(player: PlayerConfig, cache: RetargetCache, corrections: PoseCorrectionSet) -> Self {
        Self {
            player: ClipPlayer::new(player),
            corrections,
            cache,
            report: None,
        }
    }

    /// Retarget `clip` onto `skeleton` (memoized) and make it the idle clip.
    /// The player keeps its playing state and restarts from 0.
    pub fn bind_clip(
        &mut self,
        clip: &Clip,
        skeleton: &Skeleton,
        diagnostics: &DiagnosticsCfg,
    ) -> RetargetReport {
        let bound = self.cache.get_or_retarget(clip, skeleton);
        diagnostics.report_binding(&clip.name, &skeleton.name, &bound.report);
        self.player.set_clip(Some(bound.clip));
        self.report = Some(bound.report.clone());
        bound.report
    }

    pub fn unbind_clip(&mut self) {
        self.player.set_clip(None);
        self.report = None;
    }

    /// Bones the clip animates that the skeleton lacks, under this
    /// controller's bone map.
    pub fn missing_bones(&self, clip: &Clip, skeleton: &Skeleton) -> Vec<String> {
        missing_bones(clip, skeleton, self.cache.bone_map())
    }

    pub fn report(&self) -> Option<&RetargetReport> {
        self.report.as_ref()
    }

    pub fn cache(&self) -> &RetargetCache {
        &self.cache
    }

    /// Advance the clip, then override with the corrections.
    /// Returns (tracks applied, corrections applied).
    pub fn update(&mut self, dt: f32, skeleton: &mut Skeleton) -> (usize, usize) {
        let applied = self.player.update(dt, skeleton);
        let corrected = self.corrections.apply(skeleton);
        (applied, corrected)
    }
}
