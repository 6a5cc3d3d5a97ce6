use std::f64::consts::E;

/// Logistic function, turning a weighted sum into a firing probability.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_one_half() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn strictly_inside_unit_interval() {
        let mut x = -30.0;
        while x <= 30.0 {
            let y = sigmoid(x);
            assert!(y > 0.0 && y < 1.0, "sigmoid({x}) = {y}");
            x += 0.25;
        }
    }

    #[test]
    fn symmetric_around_zero() {
        for x in [0.1, 1.0, 2.5, 7.0] {
            assert!((sigmoid(x) + sigmoid(-x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn extreme_inputs_stay_within_closed_range() {
        for x in [-1e6, -800.0, 800.0, 1e6] {
            let y = sigmoid(x);
            assert!((0.0..=1.0).contains(&y), "sigmoid({x}) = {y}");
        }
    }
}
