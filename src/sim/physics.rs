//! Static torque balance
//!
//! Torque = weight * |distance|. The plank tilts toward the heavier side by
//! the torque difference divided by a constant, clamped to a maximum angle.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::PlacedObject;
use crate::settings::PhysicsConfig;

/// Which way the plank leans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Balance {
    Balanced,
    TiltingLeft,
    TiltingRight,
}

impl Balance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Balance::Balanced => "Balanced",
            Balance::TiltingLeft => "Tilting Left",
            Balance::TiltingRight => "Tilting Right",
        }
    }

    /// CSS class used by the status label
    pub fn css_class(&self) -> &'static str {
        match self {
            Balance::Balanced => "status-balanced",
            Balance::TiltingLeft | Balance::TiltingRight => "status-tilting",
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsResult {
    pub left_torque: f64,
    pub right_torque: f64,
    pub left_weight_sum: f64,
    pub right_weight_sum: f64,
    /// Tilt in degrees, positive = clockwise (right side down)
    pub final_angle: f64,
    pub balance: Balance,
}

impl PhysicsResult {
    /// Right torque minus left torque
    pub fn torque_diff(&self) -> f64 {
        self.right_torque - self.left_torque
    }
}

impl Default for PhysicsResult {
    fn default() -> Self {
        Self {
            left_torque: 0.0,
            right_torque: 0.0,
            left_weight_sum: 0.0,
            right_weight_sum: 0.0,
            final_angle: 0.0,
            balance: Balance::Balanced,
        }
    }
}

impl PhysicsConfig {
    /// Sum torques and weights per side, then derive angle and balance
    pub fn evaluate(&self, objects: &[PlacedObject]) -> PhysicsResult {
        let mut result = PhysicsResult::default();

        for obj in objects {
            let torque = obj.torque();
            let weight = f64::from(obj.weight);
            if obj.is_left() {
                result.left_torque += torque;
                result.left_weight_sum += weight;
            } else {
                result.right_torque += torque;
                result.right_weight_sum += weight;
            }
        }

        let config = self.sanitized();
        let raw_angle = result.torque_diff() / config.angle_divisor;
        result.final_angle = raw_angle.clamp(-config.max_angle, config.max_angle);
        result.balance = config.classify(result.left_torque, result.right_torque);
        result
    }

    /// Balanced within tolerance, otherwise the side with more torque
    pub fn classify(&self, left_torque: f64, right_torque: f64) -> Balance {
        let diff = left_torque - right_torque;
        if diff.abs() < self.balance_tolerance {
            Balance::Balanced
        } else if diff > 0.0 {
            Balance::TiltingLeft
        } else {
            Balance::TiltingRight
        }
    }
}

/// Evaluate with the default constants
pub fn evaluate(objects: &[PlacedObject]) -> PhysicsResult {
    PhysicsConfig::default().evaluate(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn objs(list: &[(u8, f64)]) -> Vec<PlacedObject> {
        list.iter().map(|&(w, d)| PlacedObject::new(w, d)).collect()
    }

    #[test]
    fn test_empty_is_zero_and_balanced() {
        let result = evaluate(&[]);
        assert_eq!(result, PhysicsResult::default());
        assert_eq!(result.balance, Balance::Balanced);
    }

    #[test]
    fn test_left_heavier_example() {
        let result = evaluate(&objs(&[(5, -40.0), (3, 60.0)]));
        assert_eq!(result.left_torque, 200.0);
        assert_eq!(result.right_torque, 180.0);
        assert_eq!(result.left_weight_sum, 5.0);
        assert_eq!(result.right_weight_sum, 3.0);
        assert_eq!(result.torque_diff(), -20.0);
        assert_eq!(result.final_angle, -2.0);
        assert_eq!(result.balance, Balance::TiltingLeft);
        assert_eq!(result.balance.to_string(), "Tilting Left");
    }

    #[test]
    fn test_symmetric_is_balanced() {
        let result = evaluate(&objs(&[(10, -10.0), (10, 10.0)]));
        assert_eq!(result.left_torque, 100.0);
        assert_eq!(result.right_torque, 100.0);
        assert_eq!(result.final_angle, 0.0);
        assert_eq!(result.balance, Balance::Balanced);
    }

    #[test]
    fn test_zero_distance_counts_right() {
        let result = evaluate(&objs(&[(7, 0.0)]));
        assert_eq!(result.right_weight_sum, 7.0);
        assert_eq!(result.left_weight_sum, 0.0);
        assert_eq!(result.right_torque, 0.0);
        assert_eq!(result.balance, Balance::Balanced);
    }

    #[test]
    fn test_angle_clamps() {
        let right = evaluate(&objs(&[(10, 190.0)]));
        assert_eq!(right.final_angle, 30.0);
        assert_eq!(right.balance, Balance::TiltingRight);

        let left = evaluate(&objs(&[(10, -190.0)]));
        assert_eq!(left.final_angle, -30.0);
    }

    #[test]
    fn test_balance_tolerance_boundary() {
        let config = PhysicsConfig::default();
        assert_eq!(config.classify(109.99, 100.0), Balance::Balanced);
        assert_eq!(config.classify(110.0, 100.0), Balance::TiltingLeft);
        assert_eq!(config.classify(100.0, 110.0), Balance::TiltingRight);
    }

    #[test]
    fn test_custom_config() {
        let config = PhysicsConfig::default().with_max_angle(5.0).with_angle_divisor(2.0);
        let result = config.evaluate(&objs(&[(1, 4.0)]));
        assert_eq!(result.final_angle, 2.0);
        let result = config.evaluate(&objs(&[(10, 100.0)]));
        assert_eq!(result.final_angle, 5.0);
    }

    #[test]
    fn test_invalid_config_fields_fall_back() {
        let config = PhysicsConfig {
            max_angle: f64::NAN,
            angle_divisor: 0.0,
            balance_tolerance: f64::NAN,
        };
        let result = config.evaluate(&objs(&[(10, 190.0)]));
        assert_eq!(result.final_angle, 30.0);
        assert_eq!(result.balance, Balance::TiltingRight);
    }

    fn arb_objects() -> impl Strategy<Value = Vec<(u8, f64)>> {
        prop::collection::vec((1u8..=10, -200.0f64..200.0), 0..30)
    }

    proptest! {
        #[test]
        fn prop_angle_is_clamped_diff(list in arb_objects()) {
            let result = evaluate(&objs(&list));
            prop_assert!((-30.0..=30.0).contains(&result.final_angle));
            let expected = ((result.right_torque - result.left_torque) / 10.0).clamp(-30.0, 30.0);
            prop_assert_eq!(result.final_angle, expected);
        }

        #[test]
        fn prop_order_independent(
            (list, shuffled) in arb_objects()
                .prop_flat_map(|list| (Just(list.clone()), Just(list).prop_shuffle()))
        ) {
            let original = evaluate(&objs(&list));
            let permuted = evaluate(&objs(&shuffled));
            let eps = 1e-6;
            prop_assert!((original.left_torque - permuted.left_torque).abs() < eps);
            prop_assert!((original.right_torque - permuted.right_torque).abs() < eps);
            prop_assert_eq!(original.left_weight_sum, permuted.left_weight_sum);
            prop_assert_eq!(original.right_weight_sum, permuted.right_weight_sum);
        }

        #[test]
        fn prop_weight_sums_cover_all(list in arb_objects()) {
            let result = evaluate(&objs(&list));
            let total: f64 = list.iter().map(|&(w, _)| f64::from(w)).sum();
            prop_assert_eq!(result.left_weight_sum + result.right_weight_sum, total);
        }
    }
}
