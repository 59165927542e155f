use serde::Serialize;

pub const DEFAULT_PAGE_NUM: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageArgs {
    pub page_num: i64,
    pub page_size: i64,
}

impl Default for PageArgs {
    fn default() -> Self {
        Self {
            page_num: DEFAULT_PAGE_NUM,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageArgs {
    /// Values below 1 fall back to the defaults.
    pub fn new(page_num: i64, page_size: i64) -> Self {
        Self {
            page_num: if page_num < 1 { DEFAULT_PAGE_NUM } else { page_num },
            page_size: if page_size < 1 { DEFAULT_PAGE_SIZE } else { page_size },
        }
    }

    /// Parses raw query values; anything missing or unparsable uses the default.
    pub fn from_query(page_num: Option<&str>, page_size: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok());
        Self::new(
            parse(page_num).unwrap_or(DEFAULT_PAGE_NUM),
            parse(page_size).unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page_num - 1).saturating_mul(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }
}

/// Candidate search: name substring plus a set of skills that must all be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    search: String,
    skills: Vec<String>,
    pub page: PageArgs,
}

impl CandidateFilter {
    pub fn new(search: impl Into<String>, skills: Vec<String>, page: PageArgs) -> Self {
        let mut skills: Vec<String> = skills
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();
        skills.sort();
        skills.dedup();
        Self {
            search: search.into().trim().to_string(),
            skills,
            page,
        }
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// ILIKE pattern for the name search, `None` when every name matches.
    pub fn name_pattern(&self) -> Option<String> {
        if self.search.is_empty() {
            None
        } else {
            Some(contains_pattern(&self.search))
        }
    }
}

/// Builds a `%needle%` LIKE pattern with the needle's wildcards escaped.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
