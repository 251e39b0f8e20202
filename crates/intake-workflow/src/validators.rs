//! 字段验证器
//!
//! 纯函数：接收原始文本输入，返回类型化的值或验证失败。验证失败总是可以
//! 通过重新提问恢复。

use intake_core::{Concern, Sex, ValidationError};

use crate::catalog::OptionTable;

/// 姓名类文本：去除首尾空白后非空，且只含字母和空格
pub fn alphabetic_text(raw: &str) -> Result<String, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    if text.chars().all(|c| c.is_alphabetic() || c == ' ') {
        Ok(text.to_string())
    } else {
        Err(ValidationError::NotAlphabetic)
    }
}

/// 解析整数并检查闭区间 [lo, hi]
pub fn integer_in_range(raw: &str, lo: i64, hi: i64) -> Result<i64, ValidationError> {
    let text = raw.trim();
    let value: i64 = text
        .parse()
        .map_err(|_| ValidationError::NotAnInteger(text.to_string()))?;

    if (lo..=hi).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange { value, lo, hi })
    }
}

/// 解析正浮点数，拒绝 0、负数、NaN 和无穷大
pub fn positive_float(raw: &str) -> Result<f64, ValidationError> {
    let text = raw.trim();
    let value: f64 = text
        .parse()
        .map_err(|_| ValidationError::NotANumber(text.to_string()))?;

    if !value.is_finite() {
        return Err(ValidationError::NotANumber(text.to_string()));
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive(value));
    }
    Ok(value)
}

/// 解析菜单编号
pub fn choice(raw: &str, table: &OptionTable) -> Result<usize, ValidationError> {
    let text = raw.trim();
    let code: usize = text
        .parse()
        .map_err(|_| ValidationError::NotAnInteger(text.to_string()))?;

    if table.contains(code) {
        Ok(code)
    } else {
        Err(ValidationError::UnknownOption { max: table.len() })
    }
}

/// 严格的 Y/N 回答，大小写不敏感
pub fn yes_no(raw: &str) -> Result<bool, ValidationError> {
    match raw.trim().to_uppercase().as_str() {
        "Y" => Ok(true),
        "N" => Ok(false),
        _ => Err(ValidationError::NotYesNo),
    }
}

/// 确认问题：只有 "Y" 才算通过，其余一律视为否定
pub fn is_affirmative(raw: &str) -> bool {
    matches!(yes_no(raw), Ok(true))
}

/// 登记最终确认：接受 "Y" 或 "YES"
pub fn is_yes_word(raw: &str) -> bool {
    matches!(raw.trim().to_uppercase().as_str(), "Y" | "YES")
}

pub fn sex(raw: &str) -> Result<Sex, ValidationError> {
    match raw.trim().to_lowercase().as_str() {
        "m" | "male" => Ok(Sex::Male),
        "f" | "female" => Ok(Sex::Female),
        "other" => Ok(Sex::Other),
        other => Err(ValidationError::UnknownSex(other.to_string())),
    }
}

/// 患者顾虑：单独输入 "N" 表示无顾虑，否则至少 `min_len` 个字符
pub fn concern(raw: &str, min_len: usize) -> Result<Concern, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    if text.eq_ignore_ascii_case("n") {
        return Ok(Concern::NoConcerns);
    }
    if text.chars().count() >= min_len {
        Ok(Concern::Narrative(text.to_string()))
    } else {
        Err(ValidationError::TooShort { min: min_len })
    }
}

/// "其他"选项的手动描述
pub fn free_text(raw: &str) -> Result<String, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        Err(ValidationError::Empty)
    } else {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DOSAGES, STAGES};

    #[test]
    fn test_integer_range_boundaries() {
        assert_eq!(integer_in_range("0", 0, 10), Ok(0));
        assert_eq!(integer_in_range("10", 0, 10), Ok(10));
        assert_eq!(integer_in_range(" 7 ", 0, 10), Ok(7));
        assert_eq!(
            integer_in_range("11", 0, 10),
            Err(ValidationError::OutOfRange { value: 11, lo: 0, hi: 10 })
        );
        assert_eq!(
            integer_in_range("-1", 0, 10),
            Err(ValidationError::OutOfRange { value: -1, lo: 0, hi: 10 })
        );
        assert!(matches!(integer_in_range("seven", 0, 10), Err(ValidationError::NotAnInteger(_))));
        assert!(matches!(integer_in_range("7.5", 0, 10), Err(ValidationError::NotAnInteger(_))));
        assert!(matches!(integer_in_range("", 0, 10), Err(ValidationError::NotAnInteger(_))));
    }

    #[test]
    fn test_integer_range_sweep() {
        for value in -5..=15 {
            let result = integer_in_range(&value.to_string(), 0, 10);
            assert_eq!(result.is_ok(), (0..=10).contains(&value), "value {}", value);
        }
    }

    #[test]
    fn test_alphabetic_text() {
        assert_eq!(alphabetic_text("  Jane Doe "), Ok("Jane Doe".to_string()));
        assert_eq!(alphabetic_text("Zoë"), Ok("Zoë".to_string()));
        assert_eq!(alphabetic_text("   "), Err(ValidationError::Empty));
        assert_eq!(alphabetic_text("R2D2"), Err(ValidationError::NotAlphabetic));
        assert_eq!(alphabetic_text("O'Neil"), Err(ValidationError::NotAlphabetic));
    }

    #[test]
    fn test_positive_float() {
        assert_eq!(positive_float("1.75"), Ok(1.75));
        assert_eq!(positive_float("70"), Ok(70.0));
        assert_eq!(positive_float("0"), Err(ValidationError::NotPositive(0.0)));
        assert_eq!(positive_float("-1.2"), Err(ValidationError::NotPositive(-1.2)));
        assert!(matches!(positive_float("tall"), Err(ValidationError::NotANumber(_))));
        assert!(matches!(positive_float("NaN"), Err(ValidationError::NotANumber(_))));
        assert!(matches!(positive_float("inf"), Err(ValidationError::NotANumber(_))));
    }

    #[test]
    fn test_choice() {
        assert_eq!(choice("1", &STAGES), Ok(1));
        assert_eq!(choice("4", &STAGES), Ok(4));
        assert_eq!(choice("5", &STAGES), Err(ValidationError::UnknownOption { max: 4 }));
        assert_eq!(choice("0", &STAGES), Err(ValidationError::UnknownOption { max: 4 }));
        assert_eq!(choice("8", &DOSAGES), Ok(8));
        assert!(matches!(choice("II", &STAGES), Err(ValidationError::NotAnInteger(_))));
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no("y"), Ok(true));
        assert_eq!(yes_no(" N "), Ok(false));
        assert_eq!(yes_no("YES"), Err(ValidationError::NotYesNo));
        assert_eq!(yes_no("no"), Err(ValidationError::NotYesNo));
        assert_eq!(yes_no("maybe"), Err(ValidationError::NotYesNo));
        assert_eq!(yes_no(""), Err(ValidationError::NotYesNo));

        assert!(is_affirmative("Y"));
        assert!(is_affirmative(" y "));
        assert!(!is_affirmative("YES"));
        assert!(!is_affirmative("N"));
        assert!(!is_affirmative("sure"));
    }

    #[test]
    fn test_registration_yes_word() {
        assert!(is_yes_word("y"));
        assert!(is_yes_word(" Yes "));
        assert!(is_yes_word("YES"));
        assert!(!is_yes_word("N"));
        assert!(!is_yes_word("yep"));
    }

    #[test]
    fn test_sex() {
        assert_eq!(sex("female"), Ok(Sex::Female));
        assert_eq!(sex("F"), Ok(Sex::Female));
        assert_eq!(sex("m"), Ok(Sex::Male));
        assert_eq!(sex("Other"), Ok(Sex::Other));
        assert!(matches!(sex("x"), Err(ValidationError::UnknownSex(_))));
    }

    #[test]
    fn test_concern() {
        assert_eq!(concern("n", 5), Ok(Concern::NoConcerns));
        assert_eq!(concern("N", 5), Ok(Concern::NoConcerns));
        assert_eq!(
            concern("I am worried about nausea", 5),
            Ok(Concern::Narrative("I am worried about nausea".to_string()))
        );
        assert_eq!(concern("pain", 5), Err(ValidationError::TooShort { min: 5 }));
        assert_eq!(concern("  ", 5), Err(ValidationError::Empty));
    }
}
