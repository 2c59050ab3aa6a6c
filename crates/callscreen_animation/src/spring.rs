//! Spring physics
//!
//! A damped harmonic oscillator integrated with RK4. Springs carry their
//! velocity across target changes, so a grab during a snap-back picks up
//! where the thumb actually is.

/// Spring configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Convert the tension/friction pair used by designers' motion specs
    /// (Origami units) into stiffness/damping.
    pub fn from_tension_friction(tension: f32, friction: f32) -> Self {
        let stiffness = (tension - 30.0) * 3.62 + 194.0;
        let damping = (friction - 8.0) * 3.0 + 25.0;
        Self::new(stiffness.max(0.0), damping.max(0.0), 1.0)
    }

    /// Quick settle with little overshoot
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    pub fn snappy() -> Self {
        Self::new(300.0, 20.0, 1.0)
    }

    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Visible overshoot, several oscillations
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }
}

impl Default for SpringConfig {
    /// Tension 40, friction 7
    fn default() -> Self {
        Self::from_tension_friction(40.0, 7.0)
    }
}

/// Displacement and speed below which a spring counts as settled
const REST_THRESHOLD: f32 = 0.001;

/// Largest integration step, in seconds
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// A single animated value driven by a spring
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Retarget without touching the current velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to a value and stop
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_THRESHOLD && self.velocity.abs() < REST_THRESHOLD
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || self.is_settled() {
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            self.rk4(h);
            remaining -= h;
        }

        if self.is_settled() {
            self.snap_to(self.target);
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass.max(f32::EPSILON)
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);

        let k2x = v + k1v * h * 0.5;
        let k2v = self.acceleration(x + k1x * h * 0.5, k2x);

        let k3x = v + k2v * h * 0.5;
        let k3v = self.acceleration(x + k2x * h * 0.5, k3x);

        let k4x = v + k3v * h;
        let k4v = self.acceleration(x + k3x * h, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}
