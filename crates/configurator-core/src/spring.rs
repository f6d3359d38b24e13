use crate::constants::{SPRING_FRICTION, SPRING_MASS, SPRING_PRECISION, SPRING_TENSION};

// Fixed integration step in seconds; a frame's leftover runs as one shorter step.
const SUBSTEP_SEC: f32 = 0.001;
// Guards against a stalled tab handing us a huge delta.
const MAX_STEP_SEC: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub mass: f32,
    pub tension: f32,
    pub friction: f32,
    pub precision: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: SPRING_MASS,
            tension: SPRING_TENSION,
            friction: SPRING_FRICTION,
            precision: SPRING_PRECISION,
        }
    }
}

/// Damped spring that eases `value` toward `target`.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    pub config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(value: f32, config: SpringConfig) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
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

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        self.velocity.abs() <= self.config.precision
            && (self.value - self.target).abs() <= self.config.precision
    }

    /// Advances the simulation by `dt_sec` and returns the new value.
    pub fn step(&mut self, dt_sec: f32) -> f32 {
        let dt = dt_sec.clamp(0.0, MAX_STEP_SEC);
        let full = (dt / SUBSTEP_SEC).floor();
        let remainder = dt - full * SUBSTEP_SEC;
        let substeps = std::iter::repeat(SUBSTEP_SEC)
            .take(full as usize)
            .chain((remainder > f32::EPSILON).then_some(remainder));
        for h in substeps {
            if self.is_settled() {
                self.value = self.target;
                self.velocity = 0.0;
                break;
            }
            self.integrate(h);
        }
        self.value
    }

    fn integrate(&mut self, h: f32) {
        let SpringConfig {
            mass,
            tension,
            friction,
            ..
        } = self.config;
        let spring_force = -tension * (self.value - self.target);
        let damping_force = -friction * self.velocity;
        let accel = (spring_force + damping_force) / mass.max(f32::EPSILON);
        self.velocity += accel * h;
        self.value += self.velocity * h;
    }
}
