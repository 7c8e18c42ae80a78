//! # Movement
//!
//! The per-frame movement pass of [`GameSession`]: local prediction,
//! throttled move intents and remote interpolation.
//!
//! The local entity moves immediately under its own input and never
//! interpolates toward server state - the server echo would otherwise
//! drag it backwards every frame. Remote entities do the opposite: they
//! only ever chase `server_position`.

use ashvale_shared::math::Vec2;
use ashvale_shared::protocol::MovePayload;

use crate::adapters::{NetworkAdapter, RendererAdapter};
use crate::animation;
use crate::input::InputSnapshot;
use crate::session::GameSession;

impl<R: RendererAdapter, N: NetworkAdapter> GameSession<R, N> {
    /// Runs prediction, intent throttling and interpolation for one frame.
    pub(crate) fn update_movement(&mut self, dt_ms: f64, input: &InputSnapshot) {
        self.predict_local(dt_ms, input);
        self.flush_move_intent(dt_ms);
        self.interpolate_remotes();
    }

    /// Advances the local entity under its own input, before any server
    /// acknowledgment.
    fn predict_local(&mut self, dt_ms: f64, input: &InputSnapshot) {
        let axis = input.move_axis(self.config.input_deadzone);
        let step = self.config.move_speed * (dt_ms / 1000.0) as f32;

        let Some(record) = self.registry.local_mut() else {
            return;
        };

        record.is_moving = axis != Vec2::ZERO;
        if record.is_moving {
            record.position = record.position + axis * step;
            record.look_direction = axis.normalize_or_zero();
        }

        animation::update_entity(record, &mut self.renderer, axis.x, axis.y);
        if let Some(handle) = record.visual {
            self.renderer
                .set_position(handle, record.position.x, record.position.y);
        }
    }

    /// Sends at most one move intent per send interval, carrying the
    /// current predicted state. The accumulator resets to zero rather
    /// than carrying remainder; cadence is deliberately coarse.
    fn flush_move_intent(&mut self, dt_ms: f64) {
        self.send_timer_ms += dt_ms;
        if self.send_timer_ms < self.config.send_interval_ms {
            return;
        }
        self.send_timer_ms = 0.0;

        let Some(record) = self.registry.local() else {
            return;
        };
        let (x, y) = record.position.floored();
        self.network.send_move(MovePayload {
            x,
            y,
            direction: record.direction.as_str().to_owned(),
            lookx: record.look_direction.x,
            looky: record.look_direction.y,
        });
    }

    /// Eases every remote entity toward its authoritative position.
    ///
    /// Within `stop_epsilon` on both axes the entity snaps exactly onto
    /// `server_position` and reads as stopped; asymptotic easing would
    /// otherwise leave sprites walking in place forever.
    fn interpolate_remotes(&mut self) {
        let eps = self.config.stop_epsilon;
        let factor = self.config.interpolation_factor;

        for id in self.registry.session_ids() {
            if self.registry.is_local(&id) {
                continue;
            }
            let Some(record) = self.registry.get_mut(&id) else {
                continue;
            };
            let Some(handle) = record.visual else {
                continue;
            };

            let diff = record.server_position - record.position;
            record.is_moving = diff.x.abs() > eps || diff.y.abs() > eps;

            if record.is_moving {
                animation::update_entity(record, &mut self.renderer, diff.x, diff.y);
                record.position = record.position.lerp(record.server_position, factor);
            } else {
                animation::update_entity(record, &mut self.renderer, 0.0, 0.0);
                record.position = record.server_position;
            }

            self.renderer
                .set_position(handle, record.position.x, record.position.y);
        }
    }
}
