//! Trace hooks for the engine.

use rand::Rng;

use super::engine::Engine;
use super::time::SimTime;
use crate::net::Attempt;
use crate::viz::{VizEndpointInfo, VizEvent, VizEventKind};

impl<R: Rng> Engine<R> {
    fn viz_push(&mut self, ev: VizEvent) {
        if let Some(v) = &mut self.viz {
            v.push(ev);
        }
    }

    fn viz_attempt(&mut self, now: SimTime, attempt: &Attempt, kind: VizEventKind) {
        if self.viz.is_none() {
            return;
        }
        self.viz_push(VizEvent {
            t: now.0,
            attempt_id: Some(attempt.id.0),
            src: Some(attempt.src.0),
            dst: Some(attempt.dst.0),
            kind,
        });
    }

    pub fn emit_viz_meta(&mut self) {
        if self.viz.is_none() {
            return;
        }
        let endpoints = self
            .endpoints
            .iter()
            .map(|ep| VizEndpointInfo {
                id: ep.id.0,
                mac: ep.mac.to_string(),
                position_m: ep.position_m,
                peer: ep.peer.0,
            })
            .collect::<Vec<_>>();
        let kind = VizEventKind::Meta {
            endpoints,
            bit_rate_bps: self.medium.bit_rate_bps,
            slot_bits: self.medium.slot_bits,
        };
        self.viz_push(VizEvent {
            t: 0,
            attempt_id: None,
            src: None,
            dst: None,
            kind,
        });
    }

    pub(crate) fn viz_admit(&mut self, now: SimTime, attempt: &Attempt) {
        self.viz_attempt(now, attempt, VizEventKind::Admit);
    }

    pub(crate) fn viz_complete(&mut self, now: SimTime, attempt: &Attempt) {
        let delay_ticks = attempt.delay().unwrap_or_default();
        self.viz_attempt(now, attempt, VizEventKind::Complete { delay_ticks });
    }

    pub(crate) fn viz_collision(&mut self, now: SimTime, on_wire: usize) {
        self.viz_push(VizEvent {
            t: now.0,
            attempt_id: None,
            src: None,
            dst: None,
            kind: VizEventKind::Collision { on_wire },
        });
    }

    pub(crate) fn viz_backoff(&mut self, now: SimTime, attempt: &Attempt, slots: u64) {
        let kind = VizEventKind::Backoff {
            retries: attempt.retries,
            slots,
            next_slot: attempt.time_slot.0,
        };
        self.viz_attempt(now, attempt, kind);
    }

    pub(crate) fn viz_drop(&mut self, now: SimTime, attempt: &Attempt) {
        let kind = VizEventKind::Drop {
            retries: attempt.retries,
        };
        self.viz_attempt(now, attempt, kind);
    }
}
