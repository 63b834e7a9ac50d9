use glam::{Mat4, Vec2, Vec3};

/// Degrees of yaw/pitch per pixel of cursor travel
pub const MOUSE_SENSITIVITY: f32 = 0.2;
pub const MAX_PITCH: f32 = 89.0;
pub const MIN_FOV: f32 = 1.0;
pub const MAX_FOV: f32 = 45.0;
pub const MIN_SENSITIVITY: f32 = 0.01;
/// Move speed gained per scroll notch
pub const SCROLL_SENSITIVITY: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraMove {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Free-flying, Z-up viewer camera driven by cursor, scroll and movement input.
///
/// Angles are in degrees. A yaw of -90 looks down -Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraController {
    pub pos: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Movement speed, in units per second
    pub sensitivity: f32,
    pub fov: f32,
    /// Cursor input only turns the camera while focused
    pub focused: bool,
    last_cursor: Option<Vec2>,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CameraController {
    pub const DEFAULT: Self = Self {
        pos: Vec3::new(5.0, 5.0, 0.0),
        front: Vec3::NEG_Y,
        up: Vec3::Z,
        yaw: -90.0,
        pitch: 0.0,
        sensitivity: 5.0,
        fov: MAX_FOV,
        focused: false,
        last_cursor: None,
    };

    /// Direction the camera looks at for the given angles
    #[must_use]
    pub fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
        let (yaw_sin, yaw_cos) = yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = pitch.to_radians().sin_cos();

        Vec3::new(yaw_cos * pitch_cos, yaw_sin * pitch_cos, pitch_sin).normalize()
    }

    /// Turns the camera by the cursor travel since the last call.
    ///
    /// The first position seen only establishes the reference point.
    pub fn on_cursor(&mut self, cursor: Vec2) {
        if !self.focused {
            return;
        }

        let last = self.last_cursor.replace(cursor).unwrap_or(cursor);
        let offset = (cursor - last) * MOUSE_SENSITIVITY;

        self.yaw -= offset.x;
        self.pitch = (self.pitch - offset.y).clamp(-MAX_PITCH, MAX_PITCH);
        self.front = Self::front_from_angles(self.yaw, self.pitch);
    }

    /// Scrolling up speeds movement up and zooms in
    pub fn on_scroll(&mut self, delta: f32) {
        self.sensitivity = (self.sensitivity + SCROLL_SENSITIVITY * delta).max(MIN_SENSITIVITY);
        self.fov = (self.fov - delta).clamp(MIN_FOV, MAX_FOV);
    }

    pub const fn toggle_focus(&mut self) {
        self.focused = !self.focused;
    }

    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize()
    }

    /// Moves the camera for `dt` seconds of held input
    pub fn on_move(&mut self, dir: CameraMove, dt: f32) {
        let speed = self.sensitivity * dt;
        let offset = match dir {
            CameraMove::Forward => self.front,
            CameraMove::Backward => -self.front,
            CameraMove::Left => -self.right(),
            CameraMove::Right => self.right(),
            CameraMove::Up => self.up,
            CameraMove::Down => -self.up,
        };

        self.pos += offset * speed;
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.pos, self.pos + self.front, self.up)
    }

    /// Right-handed perspective projection with the current field of view
    #[must_use]
    pub fn projection_matrix(&self, aspect_ratio: f32, z_near: f32, z_far: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect_ratio, z_near, z_far)
    }
}
