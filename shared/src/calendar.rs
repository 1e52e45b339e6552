//! 学期推算模块
//!
//! 服务器缺少学期、学年、入学年份时，在本地按固定的日历规则推算。
//! 所有函数都是 (已知学期 | 入学年份, 当前日期) 的纯函数，
//! 便于在测试中固定日期复现结果。

use chrono::{Datelike, NaiveDate};

pub const MIN_SEMESTER: u8 = 1;
pub const MAX_SEMESTER: u8 = 8;

/// 下半年起始月份（0 基，7 月 = 6）
const SECOND_HALF_MONTH_INDEX: u32 = 6;

/// 将任意整数夹到合法学期区间 [1, 8]
pub fn clamp_semester(value: i64) -> u8 {
    value.clamp(MIN_SEMESTER as i64, MAX_SEMESTER as i64) as u8
}

/// 推算当前学期
///
/// 1. 服务器给出学期（正数）时直接使用；
/// 2. 否则若已知入学年份：`2 * 已过年数 + 1`，下半年再加一，最后夹到 [1, 8]；
/// 3. 都未知时仅按月份粗略猜测：上半年 1，下半年 2。
pub fn calculate_current_semester(
    semester: Option<i64>,
    batch_year: Option<i32>,
    today: NaiveDate,
) -> u8 {
    let second_half = today.month0() >= SECOND_HALF_MONTH_INDEX;

    if let Some(direct) = semester.filter(|s| *s > 0) {
        return clamp_semester(direct);
    }

    if let Some(batch) = batch_year.filter(|y| *y > 0) {
        let years = (today.year() - batch) as i64;
        let raw = years * 2 + 1 + i64::from(second_half);
        return clamp_semester(raw);
    }

    if second_half { 2 } else { 1 }
}

/// 学年 = ceil(学期 / 2)
pub fn calculate_academic_year(semester: u8) -> u8 {
    semester.div_ceil(2)
}

/// 由已知学期反推入学年份：当前年份 - 学年 + 1
pub fn estimate_batch_year(semester: u8, today: NaiveDate) -> i32 {
    today.year() - calculate_academic_year(semester) as i32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_batch_2022_in_august_2024_is_sixth_semester() {
        let today = date(2024, 8, 15);
        let semester = calculate_current_semester(None, Some(2022), today);
        assert_eq!(semester, 6);
        assert_eq!(calculate_academic_year(semester), 3);
    }

    #[test]
    fn test_first_half_of_year_does_not_add_unit() {
        let today = date(2024, 3, 1);
        assert_eq!(calculate_current_semester(None, Some(2022), today), 5);
    }

    #[test]
    fn test_direct_semester_wins_over_batch() {
        let today = date(2024, 8, 15);
        assert_eq!(calculate_current_semester(Some(3), Some(2018), today), 3);
        // 非正数视为缺失
        assert_eq!(calculate_current_semester(Some(0), Some(2022), today), 6);
    }

    #[test]
    fn test_semester_is_clamped_for_any_positive_batch() {
        let today = date(2024, 8, 15);
        for batch in [1, 1990, 2010, 2020, 2024, 2025, 2100] {
            let s = calculate_current_semester(None, Some(batch), today);
            assert!((MIN_SEMESTER..=MAX_SEMESTER).contains(&s), "batch {batch} gave {s}");
        }
        assert_eq!(calculate_current_semester(None, Some(1990), today), 8);
        assert_eq!(calculate_current_semester(None, Some(2100), today), 1);
    }

    #[test]
    fn test_month_only_guess() {
        assert_eq!(calculate_current_semester(None, None, date(2024, 6, 30)), 1);
        assert_eq!(calculate_current_semester(None, None, date(2024, 7, 1)), 2);
    }

    #[test]
    fn test_academic_year_and_batch_estimate_for_all_semesters() {
        let today = date(2025, 2, 10);
        for s in MIN_SEMESTER..=MAX_SEMESTER {
            let year = calculate_academic_year(s);
            assert_eq!(year, (s + 1) / 2);
            assert_eq!(estimate_batch_year(s, today), 2025 - year as i32 + 1);
        }
    }

    #[test]
    fn test_batch_estimate_round_trips_through_semester_derivation() {
        for today in [date(2025, 2, 10), date(2025, 9, 1)] {
            for s in MIN_SEMESTER..=MAX_SEMESTER {
                let batch = estimate_batch_year(s, today);
                let derived = calculate_current_semester(None, Some(batch), today);
                assert_eq!(
                    calculate_academic_year(derived),
                    calculate_academic_year(s),
                    "semester {s} on {today}"
                );
            }
        }
    }
}
