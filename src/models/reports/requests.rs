use serde::Deserialize;

// 出生年份筛选参数
#[derive(Debug, Deserialize)]
pub struct BornAfterParams {
    #[serde(default = "default_cutoff_year")]
    pub year: i32,
}

fn default_cutoff_year() -> i32 {
    2004
}

// 排名截取参数
#[derive(Debug, Deserialize)]
pub struct TopStudentsParams {
    #[serde(default = "default_top_limit")]
    pub limit: u64,
}

fn default_top_limit() -> u64 {
    3
}

// 低分筛选参数
#[derive(Debug, Deserialize)]
pub struct FailingStudentsParams {
    #[serde(default = "default_failing_threshold")]
    pub threshold: i32,
}

fn default_failing_threshold() -> i32 {
    80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let born: BornAfterParams = serde_json::from_str("{}").unwrap();
        assert_eq!(born.year, 2004);

        let top: TopStudentsParams = serde_json::from_str("{}").unwrap();
        assert_eq!(top.limit, 3);

        let failing: FailingStudentsParams = serde_json::from_str("{}").unwrap();
        assert_eq!(failing.threshold, 80);
    }
}
