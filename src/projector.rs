//! Turns backend snapshots into render models.
//!
//! Snapshots arrive every second while a phase runs, so side effects are tied
//! to phase edges rather than to snapshots: the projector remembers the last
//! phase it observed and only emits [`TransitionEffect`]s when a snapshot
//! reports a different one. Everything else in the [`RenderModel`] is a pure
//! function of the snapshot and is rebuilt on every call.

use crate::{
    break_prompt::BreakPromptSelector,
    model::{format_time, BreakPrompt, ControlsEnabled, DotState, Phase, RenderModel, StatusSnapshot},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEffect {
    ShowBreakPrompt(BreakPrompt),
    HideBreakPrompt,
    /// Re-resolve the background for this phase. The resolver drops it if the
    /// asset key is unchanged.
    ChangeBackground(Phase),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseEdge {
    /// `None` for the first snapshot ever observed.
    pub from: Option<Phase>,
    pub to: Phase,
}

#[derive(Debug, Clone)]
pub struct Projection {
    pub model: RenderModel,
    pub edge: Option<PhaseEdge>,
    pub effects: Vec<TransitionEffect>,
}

#[derive(Debug, Default, Clone, Copy)]
struct TransitionMemory {
    last_observed_phase: Option<Phase>,
}

pub struct StatusProjector {
    memory: TransitionMemory,
    prompts: BreakPromptSelector,
    prompt: Option<BreakPrompt>,
    dot_count: u32,
}

impl StatusProjector {
    pub fn new(dot_count: u32, prompts: BreakPromptSelector) -> Self {
        Self {
            memory: TransitionMemory::default(),
            prompts,
            prompt: None,
            dot_count,
        }
    }

    pub fn last_observed_phase(&self) -> Option<Phase> {
        self.memory.last_observed_phase
    }

    pub fn project(&mut self, snapshot: &StatusSnapshot) -> Projection {
        let mut effects = Vec::new();
        let edge = self.detect_edge(snapshot.phase);

        if let Some(edge) = edge {
            log::debug!("Phase edge {:?} -> {:?}", edge.from, edge.to);

            if edge.to.is_break() {
                let prompt = self.prompts.select();
                self.prompt = Some(prompt.clone());
                effects.push(TransitionEffect::ShowBreakPrompt(prompt));
            } else {
                self.prompt = None;
                effects.push(TransitionEffect::HideBreakPrompt);
            }
            effects.push(TransitionEffect::ChangeBackground(edge.to));
        }

        Projection {
            model: self.render(snapshot),
            edge,
            effects,
        }
    }

    fn detect_edge(&mut self, phase: Phase) -> Option<PhaseEdge> {
        let from = self.memory.last_observed_phase;
        if from == Some(phase) {
            return None;
        }
        self.memory.last_observed_phase = Some(phase);
        Some(PhaseEdge { from, to: phase })
    }

    fn render(&self, snapshot: &StatusSnapshot) -> RenderModel {
        RenderModel {
            time_text: format_time(snapshot.remaining_seconds),
            phase_label: snapshot.phase.label().to_string(),
            theme: snapshot.phase.theme().to_string(),
            dot_states: dot_states(self.dot_count, snapshot.cycle_index, snapshot.phase),
            controls_enabled: ControlsEnabled {
                start: !snapshot.is_running,
                pause: snapshot.is_running,
            },
            background_asset_key: None,
            break_prompt: self.prompt.clone(),
            notice: None,
        }
    }
}

pub fn dot_states(count: u32, cycle_index: u32, phase: Phase) -> Vec<DotState> {
    (1..=count)
        .map(|i| {
            if i < cycle_index {
                DotState::Completed
            } else if i == cycle_index && phase != Phase::Idle {
                DotState::Active
            } else {
                DotState::Pending
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use DotState::*;

    fn projector() -> StatusProjector {
        StatusProjector::new(4, BreakPromptSelector::with_rng(StdRng::seed_from_u64(5)))
    }

    fn snapshot(phase: Phase, remaining_seconds: u32, cycle_index: u32, is_running: bool) -> StatusSnapshot {
        StatusSnapshot {
            phase,
            remaining_seconds,
            cycle_index,
            is_running,
        }
    }

    fn count(effects: &[TransitionEffect], pred: impl Fn(&TransitionEffect) -> bool) -> usize {
        effects.iter().filter(|effect| pred(effect)).count()
    }

    #[test]
    fn dots_for_third_focus_cycle() {
        assert_eq!(dot_states(4, 3, Phase::Focus), vec![Completed, Completed, Active, Pending]);
    }

    #[test]
    fn idle_never_marks_a_dot_active() {
        assert_eq!(dot_states(4, 1, Phase::Idle), vec![Pending; 4]);
    }

    #[test]
    fn long_break_end_to_end() {
        let mut projector = projector();
        let projection = projector.project(&snapshot(Phase::LongBreak, 900, 4, true));

        assert_eq!(projection.model.time_text, "15:00");
        assert_eq!(projection.model.phase_label, "LONG BREAK");
        assert_eq!(projection.model.theme, "long-break");
        assert_eq!(projection.model.dot_states, vec![Completed, Completed, Completed, Active]);
        assert_eq!(
            projection.model.controls_enabled,
            ControlsEnabled { start: false, pause: true }
        );
        assert!(projection.model.break_prompt.is_some());
    }

    #[test]
    fn repeated_phase_fires_no_effects() {
        let mut projector = projector();
        projector.project(&snapshot(Phase::Focus, 1500, 1, true));

        let second = projector.project(&snapshot(Phase::Focus, 1499, 1, true));
        assert!(second.effects.is_empty());
        assert!(second.edge.is_none());
        assert_eq!(second.model.time_text, "24:59");
    }

    #[test]
    fn duplicate_delivery_after_edge_is_ignored() {
        let mut projector = projector();
        projector.project(&snapshot(Phase::Focus, 3, 1, true));

        let entered = projector.project(&snapshot(Phase::ShortBreak, 300, 1, true));
        let duplicate = projector.project(&snapshot(Phase::ShortBreak, 300, 1, true));

        assert_eq!(entered.effects.len(), 2);
        assert!(duplicate.effects.is_empty());
        assert_eq!(entered.model.break_prompt, duplicate.model.break_prompt);
    }

    #[test]
    fn idle_focus_break_focus_fires_three_edges() {
        let mut projector = projector();
        let initial = projector.project(&snapshot(Phase::Idle, 1500, 1, false));
        assert_eq!(initial.edge, Some(PhaseEdge { from: None, to: Phase::Idle }));

        let sequence = [
            snapshot(Phase::Focus, 1500, 1, true),
            snapshot(Phase::ShortBreak, 300, 1, true),
            snapshot(Phase::Focus, 1500, 2, true),
        ];
        let projections: Vec<Projection> = sequence.iter().map(|s| projector.project(s)).collect();

        let edges = projections.iter().filter(|p| p.edge.is_some()).count();
        assert_eq!(edges, 3);

        for projection in &projections {
            let backgrounds = count(&projection.effects, |e| {
                matches!(e, TransitionEffect::ChangeBackground(_))
            });
            assert_eq!(backgrounds, 1);
        }

        let shows: Vec<usize> = projections
            .iter()
            .map(|p| count(&p.effects, |e| matches!(e, TransitionEffect::ShowBreakPrompt(_))))
            .collect();
        assert_eq!(shows, vec![0, 1, 0]);

        assert!(projections[2].effects.contains(&TransitionEffect::HideBreakPrompt));
        assert!(projections[2].model.break_prompt.is_none());
    }

    #[test]
    fn short_to_long_break_picks_a_fresh_prompt() {
        let mut projector = projector();
        projector.project(&snapshot(Phase::ShortBreak, 300, 3, true));
        let long = projector.project(&snapshot(Phase::LongBreak, 900, 4, true));

        assert_eq!(
            count(&long.effects, |e| matches!(e, TransitionEffect::ShowBreakPrompt(_))),
            1
        );
    }

    #[test]
    fn non_monotonic_remaining_time_is_rendered_as_is() {
        let mut projector = projector();
        projector.project(&snapshot(Phase::Focus, 10, 1, true));
        let reset = projector.project(&snapshot(Phase::Focus, 1500, 1, false));

        assert_eq!(reset.model.time_text, "25:00");
        assert_eq!(reset.model.controls_enabled, ControlsEnabled { start: true, pause: false });
        assert!(reset.effects.is_empty());
    }
}
