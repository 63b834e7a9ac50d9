use fastrand::Rng;
use glam::{EulerRot, Quat, Vec3A};
use log::{debug, info, trace};
use std::f32::consts::PI;

use super::{Body, ContactModel, PhysState, SimControls, WorldConfig};
use crate::{collision::detect_pair, dynamics::impulse_solver::resolve_body_with_normals};

/// Index of a body inside its `World`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl BodyId {
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Per-frame counters, mostly for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Vertex/face hits found by the detector
    pub hits: usize,
    /// Contact points that received an impulse
    pub impulses: usize,
}

/// Owns a fixed set of bodies and runs simulate -> detect -> resolve over them.
pub struct World {
    rng: Rng,
    config: WorldConfig,
    pub controls: SimControls,
    bodies: Vec<Body>,
    /// Scratch list of the normals a body was pushed along during resolution
    impulse_normals: Vec<Vec3A>,
    tick_count: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::DEFAULT)
    }
}

impl World {
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };

        let mut controls = config.controls;
        controls.clamp_fix();

        info!(
            "Created world (gravity {}, {:?}, {:?} contacts)",
            config.gravity, config.integrator, config.contact_model
        );

        Self {
            rng,
            config,
            controls,
            bodies: Vec::new(),
            impulse_normals: Vec::new(),
            tick_count: 0,
        }
    }

    #[must_use]
    #[inline]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// # Panics
    ///
    /// If the simulation already stepped; the body set is fixed once it starts.
    pub fn add_body(&mut self, body: Body) -> BodyId {
        assert_eq!(
            self.tick_count, 0,
            "World::add_body(): bodies can only be added before the first step"
        );

        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        id
    }

    #[must_use]
    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    #[must_use]
    #[inline]
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    #[must_use]
    #[inline]
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    #[must_use]
    #[inline]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Places every dynamic body at a random position in the box `[min, max]` with a random
    /// orientation, no linear momentum, and a random angular velocity of up to `max_spin` rad/s
    /// around each axis.
    pub fn scatter_dynamic_bodies(&mut self, min: Vec3A, max: Vec3A, max_spin: f32) {
        for body in self.bodies.iter_mut().filter(|body| body.is_dynamic()) {
            let mut rand_vec = || Vec3A::new(self.rng.f32(), self.rng.f32(), self.rng.f32());

            let pos = min + (max - min) * rand_vec();
            let angles = (rand_vec() * 2.0 - 1.0) * PI;
            let spin = (rand_vec() * 2.0 - 1.0) * max_spin;

            let mut state = PhysState::at(pos);
            state.orientation = Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z);
            let rot = state.rot_mat();
            state.ang_momentum = rot * (body.inertia_local() * (rot.transpose() * spin));

            body.set_state(state);
        }
    }

    /// Integrates every dynamic body by `dt`, then empties every contact list
    pub fn simulate(&mut self, dt: f32) {
        let with_contacts = self.config.contact_model == ContactModel::Penalty;

        for body in &mut self.bodies {
            self.config
                .integrator
                .integrate(body, self.config.gravity, with_contacts, dt);
            body.clear_contacts();
        }
    }

    /// Tests every vertex of each body against every face of each later body, filling the
    /// contact lists. Returns the number of hits.
    pub fn detect_collisions(&mut self) -> usize {
        for body in &mut self.bodies {
            body.refresh_swept_pose();
        }

        let mut hits = 0;
        for j in 1..self.bodies.len() {
            let (head, tail) = self.bodies.split_at_mut(j);
            let later = &mut tail[0];

            for earlier in head.iter_mut() {
                if !earlier.is_dynamic() && !later.is_dynamic() {
                    continue;
                }

                hits += detect_pair(earlier, later);
                if self.config.two_sided {
                    hits += detect_pair(later, earlier);
                }
            }
        }

        if hits != 0 {
            trace!("Tick {}: {hits} vertex/face hits", self.tick_count);
        }

        hits
    }

    /// Applies the pending contacts and snapshots every body's state as the new previous state.
    ///
    /// With `rewind_on_contact`, a body that received impulses gives back the motion that took it
    /// into the surfaces it hit (see `Body::rewind_along`).
    /// Under the penalty contact model the contacts are kept for the next simulate phase.
    /// Returns the number of contact points that received an impulse.
    pub fn resolve_collisions(&mut self) -> usize {
        let mut impulses = 0;

        for body in &mut self.bodies {
            if self.config.contact_model == ContactModel::Impulse {
                impulses += resolve_body_with_normals(body, &mut self.impulse_normals);

                if self.config.rewind_on_contact {
                    body.rewind_along(&self.impulse_normals);
                }
            }

            body.prev_state = body.state;
        }

        impulses
    }

    /// Runs one full frame of the simulation with a time step of `dt`
    pub fn step(&mut self, dt: f32) -> StepStats {
        debug_assert!(dt > 0.0 && dt.is_finite());

        self.simulate(dt);
        let hits = self.detect_collisions();
        let impulses = self.resolve_collisions();
        self.tick_count += 1;

        if hits != 0 {
            debug!(
                "Tick {}: resolved {hits} hits with {impulses} impulses",
                self.tick_count
            );
        }

        StepStats { hits, impulses }
    }

    /// Steps according to the controls, for a frame that took `elapsed` seconds.
    /// Returns None while the simulation is stopped
    pub fn frame(&mut self, elapsed: f32) -> Option<StepStats> {
        let dt = self.controls.step_for(elapsed)?;
        Some(self.step(dt))
    }
}
