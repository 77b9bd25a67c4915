use crate::constants::panel_half_extents;
use crate::panel::PanelDraw;
use crate::state::Ray;
use glam::{Mat4, Vec3};

/// Ray vs. oriented box given by `model` applied to an axis-aligned box of
/// `half_extents` around the local origin. Returns the world-space ray
/// parameter of the nearest hit at or in front of the origin.
pub fn ray_box(ray: Ray, model: &Mat4, half_extents: Vec3) -> Option<f32> {
    let det = model.determinant();
    if det.abs() < 1e-12 {
        return None;
    }
    let inv = model.inverse();
    // affine transform keeps the ray parameter, so t is shared with world space
    let o = inv.transform_point3(ray.origin);
    let d = inv.transform_vector3(ray.dir);

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let (oa, da, h) = (o[axis], d[axis], half_extents[axis]);
        if da.abs() < 1e-8 {
            if oa < -h || oa > h {
                return None;
            }
            continue;
        }
        let t1 = (-h - oa) / da;
        let t2 = (h - oa) / da;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
        if t_min > t_max {
            return None;
        }
    }
    if t_max < 0.0 {
        return None;
    }
    Some(t_min.max(0.0))
}

/// Nearest panel under the ray, as an index into `draws`' panel order.
pub fn pick_panel(ray: Ray, draws: &[PanelDraw]) -> Option<usize> {
    let half = panel_half_extents();
    let mut best = None::<(usize, f32)>;
    for d in draws {
        if let Some(t) = ray_box(ray, &d.model, half) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((d.index, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_unit_box_head_on() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            dir: Vec3::NEG_Z,
        };
        let t = ray_box(ray, &Mat4::IDENTITY, Vec3::ONE).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn misses_box_behind_origin() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            dir: Vec3::Z,
        };
        assert!(ray_box(ray, &Mat4::IDENTITY, Vec3::ONE).is_none());
    }

    #[test]
    fn respects_translation_and_scale() {
        let model = Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0))
            * Mat4::from_scale(Vec3::splat(2.0));
        let ray = Ray {
            origin: Vec3::new(4.5, 0.0, 10.0),
            dir: Vec3::NEG_Z,
        };
        let t = ray_box(ray, &model, Vec3::ONE).unwrap();
        assert!((t - 8.0).abs() < 1e-4);
    }
}
