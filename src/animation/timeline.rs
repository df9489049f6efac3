use std::collections::HashMap;
use std::sync::Arc;

use crate::config::model::Timing;
use crate::encode::sink::{AnimationSink, SinkConfig};
use crate::foundation::error::{FlowgramError, FlowgramResult};
use crate::render::frame::{FrameComposer, FrameRGB};

/// Segment of the animation a step belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Title and footer only.
    TitleOnly,
    /// Cards appearing one by one.
    Reveal,
    /// Fully revealed diagram held before looping.
    FinalHold,
}

/// One entry of the timeline before rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineStep {
    pub phase: Phase,
    pub visible: usize,
    pub connectors: bool,
    pub duration_ms: u16,
}

impl TimelineStep {
    /// Frame parameters; steps with equal keys render identical frames.
    pub fn frame_key(&self) -> (usize, bool) {
        (self.visible, self.connectors)
    }
}

/// Expected entry count: `title_hold + node_count * node_hold + final_hold`.
pub fn timeline_len(timing: &Timing, node_count: usize) -> usize {
    timing.title_hold as usize + node_count * timing.node_hold as usize + timing.final_hold as usize
}

/// Lay out the three phases in order: title-only, one reveal per node, final hold.
pub fn plan_timeline(timing: &Timing, node_count: usize) -> Vec<TimelineStep> {
    let mut steps = Vec::with_capacity(timeline_len(timing, node_count));
    let step = |phase, visible, connectors, duration_ms| TimelineStep {
        phase,
        visible,
        connectors,
        duration_ms,
    };

    for _ in 0..timing.title_hold {
        steps.push(step(Phase::TitleOnly, 0, false, timing.frame_duration_ms));
    }
    for n in 1..=node_count {
        for _ in 0..timing.node_hold {
            steps.push(step(Phase::Reveal, n, n > 1, timing.frame_duration_ms));
        }
    }
    for _ in 0..timing.final_hold {
        steps.push(step(Phase::FinalHold, node_count, true, timing.final_duration_ms));
    }
    steps
}

/// One displayed frame and how long it stays on screen.
#[derive(Clone, Debug)]
pub struct AnimationFrame {
    pub frame: Arc<FrameRGB>,
    pub duration_ms: u16,
    pub phase: Phase,
}

/// Rendered timeline; repeated holds share one frame.
#[derive(Clone, Debug, Default)]
pub struct Animation {
    entries: Vec<AnimationFrame>,
}

impl Animation {
    pub fn entries(&self) -> &[AnimationFrame] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn durations(&self) -> Vec<u16> {
        self.entries.iter().map(|e| e.duration_ms).collect()
    }

    /// Total play time of one loop.
    pub fn total_duration_ms(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.duration_ms)).sum()
    }

    /// The fully revealed frame shown last.
    pub fn last_frame(&self) -> Option<&Arc<FrameRGB>> {
        self.entries.last().map(|e| &e.frame)
    }

    /// Number of distinct rendered frames backing the entries.
    pub fn distinct_frames(&self) -> usize {
        let mut seen: Vec<*const FrameRGB> = self.entries.iter().map(|e| Arc::as_ptr(&e.frame)).collect();
        seen.sort();
        seen.dedup();
        seen.len()
    }

    /// Push every entry into `sink` in timeline order, bracketed by `begin`/`end`.
    pub fn stream_into(&self, sink: &mut dyn AnimationSink) -> FlowgramResult<()> {
        let Some(first) = self.entries.first() else {
            return Err(FlowgramError::validation("animation has no frames"));
        };
        sink.begin(SinkConfig {
            width: first.frame.width,
            height: first.frame.height,
        })?;
        for entry in &self.entries {
            sink.push_frame(&entry.frame, entry.duration_ms)?;
        }
        sink.end()
    }
}

/// Render every step of the timeline, composing each distinct frame once.
#[tracing::instrument(skip(composer), fields(nodes = composer.node_count()))]
pub fn assemble(composer: &mut FrameComposer) -> FlowgramResult<Animation> {
    let steps = plan_timeline(&composer.config().timing, composer.node_count());
    let mut rendered: HashMap<(usize, bool), Arc<FrameRGB>> = HashMap::new();
    let mut entries = Vec::with_capacity(steps.len());

    for step in steps {
        let frame = match rendered.get(&step.frame_key()) {
            Some(f) => Arc::clone(f),
            None => {
                let f = Arc::new(composer.compose(step.visible, step.connectors)?);
                rendered.insert(step.frame_key(), Arc::clone(&f));
                f
            }
        };
        entries.push(AnimationFrame {
            frame,
            duration_ms: step.duration_ms,
            phase: step.phase,
        });
    }

    tracing::debug!(
        entries = entries.len(),
        distinct = rendered.len(),
        "animation assembled"
    );
    Ok(Animation { entries })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
