use serde::Serialize;

use crate::models::interview::InterviewResults;
use crate::models::pagination::{CandidateFilter, Page, PageArgs};

/// Raw listing parameters: `page_num`, `page_size`, `search` and repeated `skills` / `skills[]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: PageArgs,
    pub search: String,
    pub skills: Vec<String>,
}

impl ListQuery {
    pub fn parse(raw: Option<&str>) -> Self {
        let mut page_num = None;
        let mut page_size = None;
        let mut search = String::new();
        let mut skills = Vec::new();

        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "page_num" => page_num = Some(value.into_owned()),
                "page_size" => page_size = Some(value.into_owned()),
                "search" => search = value.into_owned(),
                "skills" | "skills[]" => skills.push(value.into_owned()),
                _ => {}
            }
        }

        Self {
            page: PageArgs::from_query(page_num.as_deref(), page_size.as_deref()),
            search,
            skills,
        }
    }

    pub fn candidate_filter(self) -> CandidateFilter {
        CandidateFilter::new(self.search, self.skills, self.page)
    }
}

#[derive(Debug, Serialize)]
pub struct InterviewListResponse {
    pub interviews: Vec<InterviewResults>,
    pub count: i64,
}

impl From<Page<InterviewResults>> for InterviewListResponse {
    fn from(page: Page<InterviewResults>) -> Self {
        Self {
            interviews: page.items,
            count: page.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_query_uses_defaults() {
        let query = ListQuery::parse(None);
        assert_eq!(query.page, PageArgs::default());
        assert!(query.search.is_empty());
        assert!(query.skills.is_empty());
    }

    #[test]
    fn invalid_paging_falls_back_to_defaults() {
        let query = ListQuery::parse(Some("page_num=-2&page_size=lots"));
        assert_eq!(query.page, PageArgs::new(1, 10));
    }

    #[test]
    fn collects_repeated_skills_in_both_spellings() {
        let query = ListQuery::parse(Some(
            "search=j%C3%BCrgen&skills=go&skills%5B%5D=rust&skills[]=sql&page_num=2&page_size=3",
        ));
        assert_eq!(query.search, "jürgen");
        assert_eq!(query.skills, vec!["go", "rust", "sql"]);
        assert_eq!(query.page, PageArgs::new(2, 3));
    }
}
