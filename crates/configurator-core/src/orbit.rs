//! Damped orbit camera around a target point.
//!
//! Dragging rotates around the target or pans it; motion decays over a few
//! frames through the damping factor. Zoom is disabled, so the orbit radius
//! never changes.

use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

use crate::constants::{
    CAMERA_FOVY_DEGREES, CAMERA_POSITION, CAMERA_ZFAR, CAMERA_ZNEAR, ORBIT_DAMPING_FACTOR,
    ORBIT_PAN_SPEED, ORBIT_POLAR_EPSILON, ORBIT_ROTATE_SPEED,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSettings {
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            enable_rotate: true,
            enable_pan: true,
            enable_zoom: false,
        }
    }
}

/// Polar coordinates around the target: `theta` about +Y from +Z, `phi` from +Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub settings: OrbitSettings,
    pub target: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    pub damping_factor: f32,
    spherical: Spherical,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::from(CAMERA_POSITION), Vec3::ZERO, OrbitSettings::default())
    }
}

impl OrbitControls {
    pub fn new(eye: Vec3, target: Vec3, settings: OrbitSettings) -> Self {
        Self {
            settings,
            target,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            damping_factor: ORBIT_DAMPING_FACTOR,
            spherical: Spherical::from_offset(eye - target),
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
        }
    }

    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.spherical.to_offset()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-3), self.znear, self.zfar)
    }

    /// Queues a rotation for a pointer drag of `(dx, dy)` pixels.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.settings.enable_rotate {
            return;
        }
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * dx * ORBIT_ROTATE_SPEED / h;
        self.delta_phi -= TAU * dy * ORBIT_ROTATE_SPEED / h;
    }

    /// Queues a screen-space pan for a pointer drag of `(dx, dy)` pixels.
    pub fn pan_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.settings.enable_pan {
            return;
        }
        let h = viewport_height.max(1.0);
        // distance covered by the visible half-height at the target plane
        let target_distance = self.spherical.radius * (self.fovy_radians / 2.0).tan();
        let view_inv = self.view_matrix().inverse();
        let right = view_inv.x_axis.truncate();
        let up = view_inv.y_axis.truncate();
        let left_amount = 2.0 * dx * target_distance / h * ORBIT_PAN_SPEED;
        let up_amount = 2.0 * dy * target_distance / h * ORBIT_PAN_SPEED;
        self.pan_offset += right * -left_amount + up * up_amount;
    }

    /// Applies a wheel step. Returns `false` (and does nothing) while zoom is
    /// disabled.
    pub fn zoom(&mut self, scale: f32) -> bool {
        if !self.settings.enable_zoom || !scale.is_finite() || scale <= 0.0 {
            return false;
        }
        self.spherical.radius *= scale;
        true
    }

    /// Integrates queued motion with damping. Returns `true` while the camera
    /// is still moving.
    pub fn update(&mut self) -> bool {
        let f = self.damping_factor;
        self.spherical.theta += self.delta_theta * f;
        self.spherical.phi += self.delta_phi * f;
        self.spherical.phi = self
            .spherical
            .phi
            .clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);
        self.target += self.pan_offset * f;

        self.delta_theta *= 1.0 - f;
        self.delta_phi *= 1.0 - f;
        self.pan_offset *= 1.0 - f;

        const REST: f32 = 1e-6;
        let moving = self.delta_theta.abs() > REST
            || self.delta_phi.abs() > REST
            || self.pan_offset.length_squared() > REST * REST;
        if !moving {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        moving
    }
}
