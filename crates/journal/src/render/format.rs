use interface::ProfitSign;

/// 통화 단위 접미사
pub const CURRENCY_SUFFIX: &str = "원";

/// HTML 특수문자 이스케이프 (텍스트와 속성값 모두에 사용)
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// 정수로 반올림하고 세 자리마다 쉼표 (예: -1234567.4 → "-1,234,567")
///
/// 정확히 .5인 값은 짝수 쪽으로 반올림한다 (2.5 → "2", 3.5 → "4").
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round_ties_even();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_won(value: f64) -> String {
    format!("{}{}", format_thousands(value), CURRENCY_SUFFIX)
}

/// 수익률 (소수 첫째 자리)
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate)
}

/// 수익 부호별 CSS 클래스
pub fn sign_class(sign: ProfitSign) -> &'static str {
    match sign {
        ProfitSign::Gain => "gain",
        ProfitSign::Loss => "loss",
        ProfitSign::Flat => "flat",
    }
}

pub fn sign_of(value: f64) -> ProfitSign {
    if value > 0.0 {
        ProfitSign::Gain
    } else if value < 0.0 {
        ProfitSign::Loss
    } else {
        ProfitSign::Flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(1234567.4), "1,234,567");
        assert_eq!(format_thousands(-100000.0), "-100,000");
        assert_eq!(format_thousands(-0.3), "0");
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(format_thousands(2.5), "2");
        assert_eq!(format_thousands(3.5), "4");
        assert_eq!(format_thousands(-2.5), "-2");
        assert_eq!(format_thousands(-0.5), "0");
        assert_eq!(format_thousands(1500.5), "1,500");
        assert_eq!(format_won(2.6), "3원");
    }

    #[test]
    fn currency_and_rate() {
        assert_eq!(format_won(-150000.0), "-150,000원");
        assert_eq!(format_rate(20.0), "20.0%");
        assert_eq!(format_rate(-12.345), "-12.3%");
    }

    #[test]
    fn markup_is_escaped() {
        assert_eq!(
            escape_html(r#"<b>"A&B"</b>'"#),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;&#39;"
        );
        assert_eq!(escape_html("월 리딩비"), "월 리딩비");
    }
}
