//! 图书字段校验

const MAX_TITLE_LEN: usize = 500;
const MAX_AUTHOR_LEN: usize = 250;

pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(format!("Title must be at most {MAX_TITLE_LEN} characters"));
    }
    Ok(())
}

pub fn validate_author(author: &str) -> Result<(), String> {
    if author.trim().is_empty() {
        return Err("Author cannot be empty".to_string());
    }
    if author.chars().count() > MAX_AUTHOR_LEN {
        return Err(format!("Author must be at most {MAX_AUTHOR_LEN} characters"));
    }
    Ok(())
}

/// 出版年份校验：0 ..= 当前年份
pub fn validate_year(year: i32) -> Result<(), String> {
    use chrono::Datelike;

    let current_year = chrono::Utc::now().year();
    if year < 0 || year > current_year {
        return Err(format!("Year must be between 0 and {current_year}"));
    }
    Ok(())
}
