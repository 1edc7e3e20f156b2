//! Pain point analysis shown on the dashboard landing page.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, ToSchema)]
pub enum ImpactLevel {
    Medium,
    High,
    Critical,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Medium => "Medium",
            ImpactLevel::High => "High",
            ImpactLevel::Critical => "Critical",
        }
    }

    /// Badge text, e.g. `Critical Impact`.
    pub fn badge(&self) -> String {
        format!("{} Impact", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PainPoint {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub impact: ImpactLevel,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PainPointAnalysis {
    pub title: String,
    pub description: String,
    pub points: Vec<PainPoint>,
}

impl PainPointAnalysis {
    /// The demo analysis for Company A.
    pub fn company_a() -> Self {
        let points = [
            (
                1,
                "Customer Acquisition",
                "High cost of customer acquisition through traditional channels. Digital marketing efforts are not optimized for conversion.",
                ImpactLevel::High,
                "Implement targeted digital marketing campaigns with improved analytics tracking.",
            ),
            (
                2,
                "User Experience",
                "Customer feedback indicates frustration with the product onboarding process and interface complexity.",
                ImpactLevel::Medium,
                "Redesign onboarding flow and simplify UI based on user testing.",
            ),
            (
                3,
                "Customer Retention",
                "Higher than industry average churn rate, particularly after the first 3 months of usage.",
                ImpactLevel::Critical,
                "Develop a robust customer success program and implement early warning systems for at-risk customers.",
            ),
        ]
        .into_iter()
        .map(|(id, title, description, impact, recommendation)| PainPoint {
            id,
            title: title.to_string(),
            description: description.to_string(),
            impact,
            recommendation: recommendation.to_string(),
        })
        .collect();

        Self {
            title: "Company A Pain Point Analysis".to_string(),
            description: "Comprehensive analysis of pain points identified through customer feedback and market research.".to_string(),
            points,
        }
    }

    /// The point with the highest impact; the first one wins a tie.
    pub fn most_severe(&self) -> Option<&PainPoint> {
        self.points
            .iter()
            .rev()
            .max_by_key(|point| point.impact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_a_has_three_points_in_order() {
        let analysis = PainPointAnalysis::company_a();
        assert_eq!(analysis.title, "Company A Pain Point Analysis");
        let titles: Vec<&str> = analysis.points.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Customer Acquisition", "User Experience", "Customer Retention"]
        );
        assert_eq!(analysis.points[1].impact, ImpactLevel::Medium);
    }

    #[test]
    fn test_badge_and_severity() {
        assert_eq!(ImpactLevel::Critical.badge(), "Critical Impact");
        assert!(ImpactLevel::Critical > ImpactLevel::High);

        let analysis = PainPointAnalysis::company_a();
        assert_eq!(analysis.most_severe().unwrap().title, "Customer Retention");
    }

    #[test]
    fn test_impact_serializes_as_display_text() {
        let json = serde_json::to_value(ImpactLevel::High).unwrap();
        assert_eq!(json, serde_json::json!("High"));
    }
}
