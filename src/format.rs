//! src/format.rs

/// 千分位分隔，如 `1234567` -> `1,234,567`
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 平均值按四舍五入取整后再加千分位
pub fn rounded(value: f64) -> String {
    thousands(value.max(0.0).round() as u64)
}

/// 紧凑写法：`1.2K`、`3.4M`
pub fn compact(value: u64) -> String {
    match value {
        0 => "0".to_string(),
        v if v >= 1_000_000 => format!("{:.1}M", v as f64 / 1_000_000.0),
        v if v >= 1_000 => format!("{:.1}K", v as f64 / 1_000.0),
        v => v.to_string(),
    }
}

pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn price(value: f64) -> String {
    format!("¥{value:.0}")
}

pub fn duration(seconds: f64) -> String {
    if seconds >= 60.0 {
        format!("{:.1}分钟", seconds / 60.0)
    } else {
        format!("{seconds:.0}秒")
    }
}

/// 按字符截断，超出部分用 `...` 代替
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn compact_numbers() {
        assert_eq!(compact(0), "0");
        assert_eq!(compact(950), "950");
        assert_eq!(compact(1500), "1.5K");
        assert_eq!(compact(2_300_000), "2.3M");
    }

    #[test]
    fn durations_switch_to_minutes() {
        assert_eq!(duration(45.0), "45秒");
        assert_eq!(duration(90.0), "1.5分钟");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("家政阿姨的秘密", 4), "家政阿姨...");
        assert_eq!(truncate("短", 4), "短");
    }
}
