use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::types::{Company, CrmData};

/// A distinct value and how often it occurs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Revenue summed over one industry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryRevenue {
    pub industry: String,
    pub revenue_millions: f64,
    pub companies: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_companies: usize,
    pub total_people: usize,
    pub top_industries: Vec<ValueCount>,
    pub total_revenue_millions: f64,
    pub revenue_by_industry: Vec<IndustryRevenue>,
}

/// Count distinct values, most frequent first; ties keep first-seen order
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<ValueCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(ValueCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort preserves first-seen order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn top_industries(companies: &[Company], n: usize) -> Vec<ValueCount> {
    let mut counts = value_counts(companies.iter().filter_map(|c| c.industry.as_deref()));
    counts.truncate(n);
    counts
}

/// Revenue per industry, largest first. Missing revenue counts as zero.
pub fn revenue_by_industry(companies: &[Company]) -> Vec<IndustryRevenue> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<IndustryRevenue> = Vec::new();

    for company in companies {
        let Some(industry) = company.industry.as_deref() else {
            continue;
        };
        let revenue = company.revenue_millions.unwrap_or(0.0);

        match index.get(industry) {
            Some(&i) => {
                totals[i].revenue_millions += revenue;
                totals[i].companies += 1;
            }
            None => {
                index.insert(industry, totals.len());
                totals.push(IndustryRevenue {
                    industry: industry.to_string(),
                    revenue_millions: revenue,
                    companies: 1,
                });
            }
        }
    }

    totals.sort_by(|a, b| {
        b.revenue_millions
            .partial_cmp(&a.revenue_millions)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    totals
}

pub fn total_revenue(companies: &[Company]) -> f64 {
    companies.iter().filter_map(|c| c.revenue_millions).sum()
}

pub fn dashboard_stats(data: &CrmData, top_n: usize) -> DashboardStats {
    DashboardStats {
        total_companies: data.companies.len(),
        total_people: data.people.len(),
        top_industries: top_industries(&data.companies, top_n),
        total_revenue_millions: total_revenue(&data.companies),
        revenue_by_industry: revenue_by_industry(&data.companies),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(industry: Option<&str>, revenue: Option<f64>) -> Company {
        Company {
            name: "x".to_string(),
            industry: industry.map(String::from),
            revenue_millions: revenue,
        }
    }

    #[test]
    fn test_value_counts_order() {
        let counts = value_counts(["Energy", "Tech", "Retail", "Tech", "Retail", "Tech", "Health"]);
        let pairs: Vec<_> = counts.iter().map(|c| (c.value.as_str(), c.count)).collect();
        assert_eq!(
            pairs,
            vec![("Tech", 3), ("Retail", 2), ("Energy", 1), ("Health", 1)]
        );
    }

    #[test]
    fn test_top_industries_truncates_and_skips_blanks() {
        let companies: Vec<Company> = ["A", "B", "C", "D", "E", "F", "A"]
            .iter()
            .map(|i| company(Some(*i), None))
            .chain(std::iter::once(company(None, None)))
            .collect();

        let top = top_industries(&companies, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0], ValueCount { value: "A".into(), count: 2 });
        assert_eq!(top[4].value, "E");
    }

    #[test]
    fn test_revenue_by_industry() {
        let companies = vec![
            company(Some("Tech"), Some(100.0)),
            company(Some("Energy"), Some(250.0)),
            company(Some("Tech"), Some(200.0)),
            company(Some("Tech"), None),
            company(None, Some(7.0)),
        ];

        let totals = revenue_by_industry(&companies);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].industry, "Tech");
        assert_eq!(totals[0].revenue_millions, 300.0);
        assert_eq!(totals[0].companies, 3);
        assert_eq!(totals[1].revenue_millions, 250.0);

        assert_eq!(total_revenue(&companies), 557.0);
    }

    #[test]
    fn test_dashboard_stats_counts_rows() {
        let data = CrmData::new(vec![company(Some("Tech"), Some(1.0))], vec![]);
        let stats = dashboard_stats(&data, 5);
        assert_eq!(stats.total_companies, 1);
        assert_eq!(stats.total_people, 0);
        assert_eq!(stats.top_industries.len(), 1);
    }
}
