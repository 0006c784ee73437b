use softcloth::{Cloth, ClothError, GridConfig, SimulationOptions, SpringFamily, Vec3};
use wasm_bindgen::prelude::*;

fn to_js(err: ClothError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn flatten(points: &[Vec3<f32>]) -> Vec<f32> {
    let mut out = Vec::with_capacity(points.len() * 3);
    for p in points {
        out.push(p.x);
        out.push(p.y);
        out.push(p.z);
    }
    out
}

// ---- Cloth Demo ----

#[wasm_bindgen]
pub struct ClothDemo {
    cloth: Cloth<f32>,
}

#[wasm_bindgen]
impl ClothDemo {
    /// A cloth hanging from its two top corners, one unit above the floor.
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize, spacing: f32) -> Result<ClothDemo, JsValue> {
        let options = SimulationOptions::new().with_spacing(spacing);
        let origin = Vec3::new(-0.5 * spacing * width.saturating_sub(1) as f32, 1.0, 0.0);
        let mut cloth = Cloth::new(origin, &GridConfig::new(width, height, spacing), options).map_err(to_js)?;
        cloth.set_anchor(0, 0).map_err(to_js)?;
        cloth.set_anchor(width - 1, 0).map_err(to_js)?;
        Ok(ClothDemo { cloth })
    }

    /// Advance by one frame of `dt_ms` milliseconds.
    pub fn update(&mut self, dt_ms: f32) {
        self.cloth.update(dt_ms);
    }

    pub fn width(&self) -> usize {
        self.cloth.width()
    }

    pub fn height(&self) -> usize {
        self.cloth.height()
    }

    /// Returns flat [x0, y0, z0, x1, y1, z1, ...] positions, row-major
    pub fn positions(&self) -> Vec<f32> {
        flatten(self.cloth.positions())
    }

    /// Triangle indices into `positions()`, two per grid cell
    pub fn surface_indices(&self) -> Vec<u32> {
        self.cloth.surface_indices()
    }

    /// Net acceleration magnitude per particle, for tinting the surface
    pub fn accelerations(&self) -> Vec<f32> {
        self.cloth.acceleration_magnitudes()
    }

    /// Returns flat [ax, ay, az, bx, by, bz, strain, family, ...] per spring
    pub fn springs(&self) -> Vec<f32> {
        let mut out = Vec::new();
        for link in self.cloth.spring_links() {
            let a = self.cloth.position_at(link.from.0, link.from.1);
            let b = self.cloth.position_at(link.to.0, link.to.1);
            let family = match link.family {
                SpringFamily::Structural => 0.0,
                SpringFamily::Shear => 1.0,
                SpringFamily::Bend => 2.0,
            };
            out.extend_from_slice(&[a.x, a.y, a.z, b.x, b.y, b.z, link.strain, family]);
        }
        out
    }

    pub fn set_anchor(&mut self, x: usize, y: usize) -> Result<(), JsValue> {
        self.cloth.set_anchor(x, y).map_err(to_js)
    }

    pub fn release_anchor(&mut self, x: usize, y: usize) -> Result<(), JsValue> {
        self.cloth.release_anchor(x, y).map_err(to_js)
    }

    pub fn drag_anchor(&mut self, x: usize, y: usize, px: f32, py: f32, pz: f32) -> Result<(), JsValue> {
        self.cloth.drag_anchor(x, y, Vec3::new(px, py, pz)).map_err(to_js)
    }

    pub fn set_particle_position(&mut self, x: usize, y: usize, px: f32, py: f32, pz: f32) -> Result<(), JsValue> {
        self.cloth.set_particle_position(x, y, Vec3::new(px, py, pz)).map_err(to_js)
    }

    pub fn is_pinned(&self, x: usize, y: usize) -> bool {
        x < self.cloth.width() && y < self.cloth.height() && self.cloth.is_pinned(x, y)
    }

    /// 0 = Euler, 1 = Runge-Kutta 4
    pub fn set_integrator(&mut self, index: usize) -> Result<(), JsValue> {
        self.cloth.set_integrator(index).map_err(to_js)
    }

    pub fn set_particle_mass(&mut self, mass: f32) {
        self.cloth.options_mut().particle_mass = mass;
    }

    pub fn set_toughness(&mut self, toughness: f32) {
        self.cloth.options_mut().toughness = toughness;
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.cloth.options_mut().spacing = spacing;
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.cloth.options_mut().gravity = gravity;
    }

    pub fn set_air_resistance(&mut self, air_resistance: f32) {
        self.cloth.options_mut().air_resistance = air_resistance;
    }

    pub fn set_wind(&mut self, enabled: bool, strength: f32) {
        let options = self.cloth.options_mut();
        options.wind_enabled = enabled;
        options.wind_strength = strength;
    }

    pub fn set_adaptive(&mut self, enabled: bool, max_error: f32) {
        let options = self.cloth.options_mut();
        options.adaptive_step_size = enabled;
        options.max_error = max_error;
    }

    pub fn set_max_steps_per_frame(&mut self, steps: usize) {
        self.cloth.options_mut().max_steps_per_frame = steps.max(1);
    }

    /// Sub-steps the last frame used
    pub fn current_steps_per_frame(&self) -> usize {
        self.cloth.options().current_steps_per_frame()
    }

    pub fn current_step_size(&self) -> f32 {
        self.cloth.options().current_step_size()
    }

    pub fn elapsed(&self) -> f32 {
        self.cloth.elapsed()
    }
}
