/*!
 * Playback-side view of a subtitle document.
 *
 * The navigator answers the queries a player makes on every clock tick:
 * which cue is showing, whether a cue end was just reached (for auto-pause),
 * and where "next", "previous" and "replay" should seek to.
 *
 * It keeps a single piece of state, the end time of the last boundary
 * reported by `is_time_close_to_end_of_cue`. While that is set the navigator
 * is *armed*: the same boundary will not be reported again and
 * `start_of_current_cue` points at the cue that just finished.
 * `clean_last_boundary` returns it to *idle*.
 *
 * None of the queries fail. Missing cues come back as `None` or as the
 * input time unchanged, so a player can keep going without subtitles.
 */

use log::{debug, trace};

use crate::app_config::NavigatorConfig;
use crate::document::{Cue, SubtitleDocument};

/// Stateful cue lookup for one playback session
#[derive(Debug, Clone)]
pub struct SubtitleNavigator {
    document: SubtitleDocument,
    config: NavigatorConfig,
    last_boundary_end: Option<f64>,
}

impl SubtitleNavigator {
    pub fn new(document: SubtitleDocument, config: NavigatorConfig) -> Self {
        Self {
            document,
            config,
            last_boundary_end: None,
        }
    }

    pub fn document(&self) -> &SubtitleDocument {
        &self.document
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// End time of the boundary most recently reported
    pub fn last_boundary_end(&self) -> Option<f64> {
        self.last_boundary_end
    }

    pub fn is_armed(&self) -> bool {
        self.last_boundary_end.is_some()
    }

    fn tolerance(&self) -> f64 {
        self.config.boundary_tolerance_secs
    }

    fn cues(&self) -> &[Cue] {
        self.document.items()
    }

    /// Text of the cue showing at `time`, lines joined with newlines
    pub fn cue_text_for_time(&self, time: f64) -> Option<String> {
        if time <= 0.0 {
            return None;
        }
        self.document.cue_at(time).map(Cue::text)
    }

    /// Report whether `time` has reached the end of a cue.
    ///
    /// A boundary is reported once: after returning true for a cue end, the
    /// same end is ignored until `clean_last_boundary` or until another cue
    /// end is reached.
    pub fn is_time_close_to_end_of_cue(&mut self, time: f64) -> bool {
        let tolerance = self.tolerance();
        let last = self.last_boundary_end;

        let reached = self
            .cues()
            .iter()
            .find(|cue| (time - cue.end).abs() < tolerance && Some(cue.end) != last)
            .map(|cue| (cue.index, cue.end));

        match reached {
            Some((index, end)) => {
                debug!("Reached end of cue {} at {:.3}s (t={:.3}s)", index, end, time);
                self.last_boundary_end = Some(end);
                true
            }
            None => false,
        }
    }

    /// Start of the cue whose end was most recently reported
    pub fn start_of_current_cue(&self) -> Option<f64> {
        let end = self.last_boundary_end?;
        self.cues()
            .iter()
            .find(|cue| cue.end == end)
            .map(|cue| cue.start)
    }

    /// Forget the last reported boundary so it can fire again
    pub fn clean_last_boundary(&mut self) {
        trace!("Clearing last boundary {:?}", self.last_boundary_end);
        self.last_boundary_end = None;
    }

    /// Seek target for "next cue".
    ///
    /// Returns `current_time` unchanged when no cue is found or the current cue
    /// is the last one.
    pub fn start_of_next_cue(&self, current_time: f64) -> f64 {
        let Some(pos) = self.position_near(current_time) else {
            return current_time;
        };

        match self.cues().get(pos + 1) {
            Some(next) => {
                trace!("Next cue from {:.3}s: cue {} at {:.3}s", current_time, next.index, next.start);
                next.start
            }
            None => current_time,
        }
    }

    /// Seek target for "previous cue".
    ///
    /// Returns 0 from the first cue and `current_time` unchanged when no cue
    /// is found.
    pub fn start_of_prev_cue(&self, current_time: f64) -> f64 {
        let Some(pos) = self.position_near(current_time) else {
            return current_time;
        };

        match pos.checked_sub(1).and_then(|prev| self.cues().get(prev)) {
            Some(prev) => {
                trace!("Previous cue from {:.3}s: cue {} at {:.3}s", current_time, prev.index, prev.start);
                prev.start
            }
            None => 0.0,
        }
    }

    /// Document position of the cue playback is in, stepping back from `time`.
    ///
    /// Probes `time`, `time - step`, `time - 2*step`, ... while the probe stays
    /// above zero; the first probe inside a cue wins, earliest cue in document
    /// order on a tie. Each cue's first hit is computed directly instead of
    /// walking the probes one by one. A time that is not finite finds nothing.
    fn position_near(&self, time: f64) -> Option<usize> {
        let step = self.tolerance();
        if !time.is_finite() || time <= 0.0 {
            return None;
        }
        if step.is_nan() || step <= 0.0 {
            return self.document.position_at(time);
        }

        let mut best: Option<(u64, usize)> = None;

        for (pos, cue) in self.cues().iter().enumerate() {
            let Some(k) = first_probe_inside(cue, time, step) else {
                continue;
            };
            if best.is_none_or(|(best_k, _)| k < best_k) {
                best = Some((k, pos));
            }
        }

        best.map(|(_, pos)| pos)
    }
}

/// Smallest `k` with `time - k*step` strictly inside `cue` and above zero
fn first_probe_inside(cue: &Cue, time: f64, step: f64) -> Option<u64> {
    if cue.end <= cue.start || time <= cue.start {
        return None;
    }

    let k = if time < cue.end {
        0
    } else {
        // Saturates for times far past the cue
        (((time - cue.end) / step).floor() as u64).saturating_add(1)
    };

    // Float rounding can put the computed probe on the wrong side of an edge
    let k = (k.saturating_sub(1)..=k.saturating_add(1)).find(|&k| {
        let probe = time - k as f64 * step;
        probe > 0.0 && cue.contains(probe)
    })?;

    Some(k)
}
