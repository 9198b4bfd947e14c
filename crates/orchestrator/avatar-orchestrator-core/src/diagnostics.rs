use serde::{Deserialize, Serialize};

use avatar_animation_core::RetargetReport;

/// Toggles the retarget/missing-bone summary the avatar logs when a clip is
/// bound. Per-bone warnings from the retargeting pass are unaffected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsCfg {
    pub enabled: bool,
}

impl Default for DiagnosticsCfg {
    fn default() -> Self {
        DiagnosticsCfg { enabled: true }
    }
}

impl DiagnosticsCfg {
    pub(crate) fn report_binding(&self, clip: &str, skeleton: &str, report: &RetargetReport) {
        if !self.enabled {
            return;
        }
        if report.is_complete() {
            log::info!(
                "clip '{clip}' bound to '{skeleton}': {} tracks",
                report.kept
            );
        } else {
            log::warn!(
                "clip '{clip}' bound to '{skeleton}': kept {} tracks, dropped {}; missing bones {:?}",
                report.kept,
                report.dropped,
                report.unresolved
            );
        }
    }
}
