//! Presentation helpers shared by renderers
//!
//! Sizes, positions, colors and display strings. No DOM access here; the
//! web shell and the native text output both format through these.

use rand::Rng;

use crate::consts::{HEAVY_WEIGHT, PLANK_CENTER};
use crate::sim::{PhysicsResult, PlacedObject};
use crate::to_fixed;

/// Preview ball color for heavy weights
pub const HEAVY_COLOR: &str = "#e74c3c";
/// Preview ball color for light weights
pub const LIGHT_COLOR: &str = "#3498db";

/// Diameter (px) of the box/ball drawn for a weight
#[inline]
pub fn object_size(weight: u8) -> f64 {
    20.0 + f64::from(weight) * 2.5
}

/// Left offset (px) of an object inside the plank
#[inline]
pub fn object_left(obj: &PlacedObject) -> f64 {
    obj.distance + PLANK_CENTER
}

/// Random saturated color for a newly dropped object
pub fn random_color(rng: &mut impl Rng) -> String {
    let hue: f64 = rng.random_range(0.0..360.0);
    format!("hsl({hue:.0}, 65%, 50%)")
}

/// Translucent ball following the pointer before a drop
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewBall {
    pub weight: u8,
    pub size: f64,
    pub color: &'static str,
}

impl PreviewBall {
    pub fn new(weight: u8) -> Self {
        Self {
            weight,
            size: object_size(weight),
            color: if weight > HEAVY_WEIGHT { HEAVY_COLOR } else { LIGHT_COLOR },
        }
    }

    pub fn label(&self) -> String {
        format!("{}kg", self.weight)
    }
}

/// Display strings for one physics result
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsText {
    pub left_weight: String,
    pub right_weight: String,
    pub tilt_angle: String,
    pub left_torque: String,
    pub right_torque: String,
    pub balance: &'static str,
    pub balance_class: &'static str,
    /// CSS transform for the plank
    pub transform: String,
}

impl From<&PhysicsResult> for PhysicsText {
    fn from(result: &PhysicsResult) -> Self {
        Self {
            left_weight: format!("{} kg", to_fixed(result.left_weight_sum, 1)),
            right_weight: format!("{} kg", to_fixed(result.right_weight_sum, 1)),
            tilt_angle: format!("{}°", to_fixed(result.final_angle, 1)),
            left_torque: to_fixed(result.left_torque, 0),
            right_torque: to_fixed(result.right_torque, 0),
            balance: result.balance.as_str(),
            balance_class: result.balance.css_class(),
            transform: format!("rotate({}deg)", result.final_angle),
        }
    }
}

/// Text for the pending weight label
pub fn next_weight_label(weight: u8) -> String {
    format!("{weight} kg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::evaluate;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_object_geometry() {
        assert_eq!(object_size(1), 22.5);
        assert_eq!(object_size(10), 45.0);
        assert_eq!(object_left(&PlacedObject::new(3, -40.0)), 160.0);
    }

    #[test]
    fn test_preview_ball_colors() {
        let light = PreviewBall::new(5);
        assert_eq!(light.color, LIGHT_COLOR);
        assert_eq!(light.label(), "5kg");
        let heavy = PreviewBall::new(6);
        assert_eq!(heavy.color, HEAVY_COLOR);
        assert_eq!(heavy.size, 35.0);
    }

    #[test]
    fn test_random_color_format() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..20 {
            let color = random_color(&mut rng);
            assert!(color.starts_with("hsl("));
            assert!(color.ends_with(", 65%, 50%)"));
        }
    }

    #[test]
    fn test_physics_text() {
        let objs = [PlacedObject::new(5, -40.0), PlacedObject::new(3, 60.0)];
        let text = PhysicsText::from(&evaluate(&objs));
        assert_eq!(text.left_weight, "5.0 kg");
        assert_eq!(text.right_weight, "3.0 kg");
        assert_eq!(text.tilt_angle, "-2.0°");
        assert_eq!(text.left_torque, "200");
        assert_eq!(text.right_torque, "180");
        assert_eq!(text.balance, "Tilting Left");
        assert_eq!(text.balance_class, "status-tilting");
        assert_eq!(text.transform, "rotate(-2deg)");
    }

    #[test]
    fn test_physics_text_rounds_halves_up() {
        let text = PhysicsText::from(&evaluate(&[PlacedObject::new(1, 2.5)]));
        assert_eq!(text.right_torque, "3");
        assert_eq!(text.tilt_angle, "0.3°");
    }

    #[test]
    fn test_next_weight_label() {
        assert_eq!(next_weight_label(7), "7 kg");
    }
}
