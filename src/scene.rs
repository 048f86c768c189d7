//! The decorative 3D scene: a cube, a sphere and a caption plane lit by one
//! ambient and two point lights, seen from a camera orbiting the origin.
//!
//! [`Scene::advance`] holds all of the animation; the browser frame loop only
//! calls it and hands the scene to the renderer.

use glam::{vec3, EulerRot, Mat4, Vec3};

use crate::geometry::{self, MeshData};

/// Camera orbit radius in the x/z plane.
pub const ORBIT_RADIUS: f32 = 8.0;
/// Fixed per-tick spin increments, in radians.
pub const CUBE_SPIN_PER_TICK: f32 = 0.01;
pub const SPHERE_SPIN_PER_TICK: f32 = 0.005;

pub fn rgb(hex: u32) -> Vec3 {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    vec3(channel(16), channel(8), channel(0))
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles applied in X, Y, Z order.
    pub rotation: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_translation(self.position) * Mat4::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    /// Unlit materials ignore every light and draw their flat colour.
    pub lit: bool,
}

impl Material {
    fn standard(color: u32, opacity: f32, roughness: f32, metalness: f32) -> Self {
        Self {
            color: rgb(color),
            opacity,
            roughness,
            metalness,
            lit: true,
        }
    }

    fn basic(color: u32, opacity: f32) -> Self {
        Self {
            color: rgb(color),
            opacity,
            roughness: 1.0,
            metalness: 0.0,
            lit: false,
        }
    }

    /// Blinn-Phong exponent standing in for roughness.
    pub fn shininess(&self) -> f32 {
        2.0 + (1.0 - self.roughness).powi(2) * 126.0
    }

    pub fn specular_strength(&self) -> f32 {
        0.04 + self.metalness * 0.5
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub name: &'static str,
    pub geometry: MeshData,
    pub material: Material,
    pub transform: Transform,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

fn aspect_of(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub cube: Mesh,
    pub sphere: Mesh,
    pub plane: Mesh,
    pub ambient: AmbientLight,
    pub point_lights: [PointLight; 2],
    pub camera: Camera,
    viewport: (u32, u32),
}

impl Scene {
    /// Builds the scene for a drawing surface of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cube: Mesh {
                name: "cube",
                geometry: geometry::cuboid(2.0, 2.0, 2.0),
                material: Material::standard(0x8b5cf6, 0.8, 0.3, 0.7),
                transform: Transform::default(),
            },
            sphere: Mesh {
                name: "sphere",
                geometry: geometry::uv_sphere(1.0, 32, 32),
                material: Material::standard(0x06b6d4, 0.7, 0.2, 0.8),
                transform: Transform::at(vec3(-3.0, 0.0, 1.0)),
            },
            // Stand-in for a welcome caption.
            plane: Mesh {
                name: "caption",
                geometry: geometry::plane(4.0, 1.0),
                material: Material::basic(0xffffff, 0.8),
                transform: Transform::at(vec3(0.0, -3.0, 0.0)),
            },
            ambient: AmbientLight {
                color: rgb(0xffffff),
                intensity: 0.5,
            },
            point_lights: [
                PointLight {
                    color: rgb(0xffffff),
                    intensity: 1.0,
                    position: vec3(10.0, 10.0, 10.0),
                },
                PointLight {
                    color: rgb(0x8b5cf6),
                    intensity: 0.5,
                    position: vec3(-10.0, -10.0, -10.0),
                },
            ],
            camera: Camera {
                fov_y_deg: 75.0,
                aspect: aspect_of(width, height),
                near: 0.1,
                far: 1000.0,
                position: vec3(0.0, 0.0, ORBIT_RADIUS),
                target: Vec3::ZERO,
            },
            viewport: (width, height),
        }
    }

    /// Meshes in insertion order, which is also draw order.
    pub fn meshes(&self) -> [&Mesh; 3] {
        [&self.cube, &self.sphere, &self.plane]
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// One animation tick at `time` seconds of wall-clock time.
    ///
    /// Cube and sphere y-rotation advance by a fixed step per call, the rest
    /// is a pure function of `time`.
    ///
    /// `time` is epoch-sized, so the trig stays in `f64`. Only results are
    /// narrowed to `f32`.
    pub fn advance(&mut self, time: f64) {
        let cube = &mut self.cube.transform;
        cube.rotation.x = (time.sin() * 0.3) as f32;
        cube.rotation.y += CUBE_SPIN_PER_TICK;
        cube.rotation.z = (time.cos() * 0.2) as f32;
        cube.position.y = ((time * 2.0).sin() * 0.2) as f32;

        let sphere = &mut self.sphere.transform;
        sphere.rotation.y += SPHERE_SPIN_PER_TICK;
        sphere.position.y = ((time * 1.5).sin() * 0.2) as f32;

        let angle = time * 0.5;
        self.camera.position.x = (angle.cos() * f64::from(ORBIT_RADIUS)) as f32;
        self.camera.position.z = (angle.sin() * f64::from(ORBIT_RADIUS)) as f32;
        self.camera.target = Vec3::ZERO;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.camera.aspect = aspect_of(width, height);
    }
}

/// A [`Scene`] plus its run state. Once torn down, ticks and resizes are
/// ignored so late callbacks cannot touch a disposed scene.
#[derive(Clone, Debug)]
pub struct Stage {
    scene: Scene,
    running: bool,
    frames: u64,
}

impl Stage {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            running: true,
            frames: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns `false` without touching the scene after teardown.
    pub fn tick(&mut self, time: f64) -> bool {
        if !self.running {
            return false;
        }
        self.scene.advance(time);
        self.frames += 1;
        true
    }

    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if !self.running {
            return false;
        }
        self.scene.resize(width, height);
        true
    }

    /// Stops the stage. Returns whether it was still running.
    pub fn teardown(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }
}
