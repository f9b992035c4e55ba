use std::sync::Arc;

use eframe::egui::{self, Color32, Pos2, Sense, Shape, Stroke};

use crate::app::theme::Palette;
use crate::session::{Orientation, OrientationTarget};

/// Half extents of the device box (3 x 0.5 x 5).
const HALF_EXTENTS: [f32; 3] = [1.5, 0.25, 2.5];
const CAMERA_EYE: [f32; 3] = [0.0, 2.0, 8.0];
const FIELD_OF_VIEW_DEG: f32 = 75.0;
const AMBIENT: f32 = 0.25;
const SETTLED_EPSILON: f32 = 1e-3;

const EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0),
    (4, 5), (5, 7), (7, 6), (6, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Corner indices of each face with its outward normal.
const FACES: [([usize; 4], [f32; 3]); 6] = [
    ([0, 2, 6, 4], [-1.0, 0.0, 0.0]),
    ([1, 5, 7, 3], [1.0, 0.0, 0.0]),
    ([0, 4, 5, 1], [0.0, -1.0, 0.0]),
    ([2, 3, 7, 6], [0.0, 1.0, 0.0]),
    ([0, 1, 3, 2], [0.0, 0.0, -1.0]),
    ([4, 6, 7, 5], [0.0, 0.0, 1.0]),
];

type Vec3 = [f32; 3];

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: Vec3, b: Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: Vec3) -> Vec3 {
    let len = dot(v, v).sqrt();
    if len == 0.0 {
        v
    } else {
        [v[0] / len, v[1] / len, v[2] / len]
    }
}

/// Applies the z rotation, then the x rotation.
fn rotate(v: Vec3, orientation: Orientation) -> Vec3 {
    let (sz, cz) = orientation.rot_z.sin_cos();
    let (sx, cx) = orientation.rot_x.sin_cos();
    let x = v[0] * cz - v[1] * sz;
    let y = v[0] * sz + v[1] * cz;
    let z = v[2];
    [x, y * cx - z * sx, y * sx + z * cx]
}

fn corners() -> [Vec3; 8] {
    let [hx, hy, hz] = HALF_EXTENTS;
    let mut out = [[0.0; 3]; 8];
    for (i, corner) in out.iter_mut().enumerate() {
        *corner = [
            if i & 1 == 0 { -hx } else { hx },
            if i & 2 == 0 { -hy } else { hy },
            if i & 4 == 0 { -hz } else { hz },
        ];
    }
    out
}

/// Pinhole camera at `CAMERA_EYE` looking at the origin.
#[derive(Debug, Clone, Copy)]
struct Camera {
    eye: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    focal: f32,
}

impl Camera {
    fn new() -> Self {
        let eye = CAMERA_EYE;
        let forward = normalize(sub([0.0, 0.0, 0.0], eye));
        let right = normalize(cross(forward, [0.0, 1.0, 0.0]));
        let up = cross(right, forward);
        let focal = 1.0 / (FIELD_OF_VIEW_DEG.to_radians() / 2.0).tan();
        Self { eye, right, up, forward, focal }
    }

    fn depth(&self, p: Vec3) -> f32 {
        dot(sub(p, self.eye), self.forward)
    }

    /// Screen position inside `rect`, or `None` behind the camera.
    fn project(&self, p: Vec3, rect: egui::Rect) -> Option<Pos2> {
        let rel = sub(p, self.eye);
        let depth = dot(rel, self.forward);
        if depth <= 0.0 {
            return None;
        }
        let scale = self.focal * rect.height() / 2.0 / depth;
        let center = rect.center();
        Some(Pos2::new(
            center.x + dot(rel, self.right) * scale,
            center.y - dot(rel, self.up) * scale,
        ))
    }
}

fn shade(color: Color32, intensity: f32, alpha: u8) -> Color32 {
    let k = intensity.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * k) as u8,
        (color.g() as f32 * k) as u8,
        (color.b() as f32 * k) as u8,
        alpha,
    )
}

/// Device model that eases toward the latest orientation target each frame.
pub struct DeviceView {
    target: Arc<OrientationTarget>,
    current: Orientation,
    smoothing: f32,
    camera: Camera,
    light: Vec3,
}

impl DeviceView {
    pub fn new(target: Arc<OrientationTarget>, smoothing: f32) -> Self {
        Self {
            target,
            current: Orientation::default(),
            smoothing,
            camera: Camera::new(),
            light: normalize([1.0, 1.0, 2.0]),
        }
    }

    pub fn current(&self) -> Orientation {
        self.current
    }

    /// Advances one frame. Returns true while the model is still moving.
    pub fn step(&mut self) -> bool {
        let target = self.target.load();
        self.current = self.current.approach(target, self.smoothing);
        self.current.distance(target) > SETTLED_EPSILON
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, palette: &Palette, height: f32) {
        if self.step() {
            ui.ctx().request_repaint();
        }

        let size = egui::vec2(ui.available_width(), height);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;

        let world: Vec<Vec3> = corners().iter().map(|&c| rotate(c, self.current)).collect();
        let Some(screen) = world
            .iter()
            .map(|&p| self.camera.project(p, rect))
            .collect::<Option<Vec<Pos2>>>()
        else {
            return;
        };

        // Far faces first.
        let mut faces: Vec<(f32, [usize; 4], Vec3)> = FACES
            .iter()
            .map(|&(idx, normal)| {
                let depth = idx.iter().map(|&i| self.camera.depth(world[i])).sum::<f32>() / 4.0;
                (depth, idx, rotate(normal, self.current))
            })
            .collect();
        faces.sort_by(|a, b| b.0.total_cmp(&a.0));

        for (_, idx, normal) in faces {
            let lit = AMBIENT + (1.0 - AMBIENT) * dot(normal, self.light).max(0.0);
            let points = idx.iter().map(|&i| screen[i]).collect();
            painter.add(Shape::convex_polygon(points, shade(palette.device, lit, 204), Stroke::NONE));
        }

        let stroke = Stroke::new(1.0, palette.wireframe);
        for (a, b) in EDGES {
            painter.line_segment([screen[a], screen[b]], stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(400.0, 300.0))
    }

    #[test]
    fn origin_projects_to_center() {
        let camera = Camera::new();
        let p = camera.project([0.0, 0.0, 0.0], rect()).unwrap();
        assert!((p.x - 200.0).abs() < 1e-3);
        assert!((p.y - 150.0).abs() < 1e-3);
    }

    #[test]
    fn points_behind_camera_are_dropped() {
        let camera = Camera::new();
        assert!(camera.project([0.0, 2.0, 20.0], rect()).is_none());
    }

    #[test]
    fn positive_x_lands_right_of_center() {
        let camera = Camera::new();
        let p = camera.project([1.0, 0.0, 0.0], rect()).unwrap();
        assert!(p.x > 200.0);
    }

    #[test]
    fn quarter_turn_about_z_swaps_x_into_y() {
        let v = rotate([1.0, 0.0, 0.0], Orientation::new(0.0, std::f32::consts::FRAC_PI_2));
        assert!(v[0].abs() < 1e-6);
        assert!((v[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn face_normals_point_outward() {
        let c = corners();
        for (idx, normal) in FACES {
            let center = idx.iter().fold([0.0; 3], |acc, &i| {
                [acc[0] + c[i][0] / 4.0, acc[1] + c[i][1] / 4.0, acc[2] + c[i][2] / 4.0]
            });
            assert!(dot(center, normal) > 0.0);
        }
    }

    #[test]
    fn eases_toward_target_and_settles() {
        let target = Arc::new(OrientationTarget::new());
        let mut view = DeviceView::new(Arc::clone(&target), 0.1);
        target.store(Orientation::new(1.0, -1.0));

        assert!(view.step());
        assert!((view.current().rot_x - 0.1).abs() < 1e-6);
        assert!((view.current().rot_z + 0.1).abs() < 1e-6);

        let mut frames = 1;
        while view.step() {
            frames += 1;
            assert!(frames < 200);
        }
        assert!(view.current().distance(Orientation::new(1.0, -1.0)) <= SETTLED_EPSILON);
    }
}
