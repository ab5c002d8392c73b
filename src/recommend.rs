//! Ranking of recommendations by importance and time sensitivity

use regex::Regex;

use crate::error::Result;
use crate::models::RecommendationItem;

/// Reads free-text timeframes such as "6 months" or "1 year"
pub struct TimeframeParser {
    re: Regex,
}

impl TimeframeParser {
    pub fn new() -> Result<Self> {
        let re = Regex::new(r"(?i)^\s*(\d+)\s*(day|week|month|year)s?\s*$")?;
        Ok(Self { re })
    }

    /// Approximate length in days, `None` if the text is not a timeframe
    pub fn days(&self, text: &str) -> Option<u32> {
        let cap = self.re.captures(text)?;
        let count: u32 = cap[1].parse().ok()?;
        let unit = match cap[2].to_ascii_lowercase().as_str() {
            "day" => 1,
            "week" => 7,
            "month" => 30,
            "year" => 365,
            _ => return None,
        };
        count.checked_mul(unit)
    }
}

/// Highest priority first; within a priority, the shortest timeframe first.
/// Unreadable timeframes sort after readable ones, keeping entry order.
pub fn rank(items: &[RecommendationItem]) -> Result<Vec<RecommendationItem>> {
    let parser = TimeframeParser::new()?;
    let mut ranked = items.to_vec();
    ranked.sort_by_key(|item| (item.priority, parser.days(item.timeframe).unwrap_or(u32::MAX)));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;
    use crate::models::Priority;

    #[test]
    fn parses_common_timeframes() {
        let parser = TimeframeParser::new().unwrap();
        assert_eq!(parser.days("6 months"), Some(180));
        assert_eq!(parser.days("1 year"), Some(365));
        assert_eq!(parser.days("2 Years"), Some(730));
        assert_eq!(parser.days("3 weeks"), Some(21));
        assert_eq!(parser.days("soon"), None);
        assert_eq!(parser.days("months"), None);
    }

    #[test]
    fn ranks_sample_recommendations() {
        let ranked = rank(&datasets::recommendations()).unwrap();
        let order: Vec<&str> = ranked.iter().map(|r| r.text).collect();
        assert_eq!(
            order,
            vec![
                "Optimize transportation routes",
                "Increase renewable energy usage",
                "Implement advanced waste management systems",
                "Conduct staff training on sustainability",
            ]
        );
    }

    #[test]
    fn unreadable_timeframe_sorts_last_within_priority() {
        let items = vec![
            RecommendationItem {
                text: "a",
                priority: Priority::High,
                timeframe: "ongoing",
            },
            RecommendationItem {
                text: "b",
                priority: Priority::High,
                timeframe: "5 years",
            },
        ];
        let ranked = rank(&items).unwrap();
        assert_eq!(ranked[0].text, "b");
    }
}
