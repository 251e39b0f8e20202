//! 通用工具函数

/// 计算BMI (体重 / 身高²)，保留完整精度
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> Option<f64> {
    if weight_kg > 0.0 && height_m > 0.0 {
        Some(weight_kg / (height_m * height_m))
    } else {
        None
    }
}

/// 四舍五入到一位小数，仅用于显示
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_bmi() {
        let bmi = compute_bmi(70.0, 1.75).unwrap();
        assert!((bmi - 22.857_142).abs() < 1e-5);
        assert_eq!(round_one_decimal(bmi), 22.9);
    }

    #[test]
    fn test_compute_bmi_rejects_non_positive_height() {
        assert!(compute_bmi(70.0, 0.0).is_none());
        assert!(compute_bmi(70.0, -1.75).is_none());
        assert!(compute_bmi(0.0, 1.75).is_none());
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(24.449), 24.4);
        assert_eq!(round_one_decimal(24.46), 24.5);
        assert_eq!(round_one_decimal(18.0), 18.0);
    }
}
