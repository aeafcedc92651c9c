use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Academic,
    Professional,
    Creative,
    Competition,
    #[serde(rename = "Social Impact")]
    SocialImpact,
    Research,
}

impl Category {
    /// Display order of the filter badges.
    pub const ALL: [Category; 6] = [
        Category::Academic,
        Category::Professional,
        Category::Creative,
        Category::Competition,
        Category::SocialImpact,
        Category::Research,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Academic => "Academic",
            Category::Professional => "Professional",
            Category::Creative => "Creative",
            Category::Competition => "Competition",
            Category::SocialImpact => "Social Impact",
            Category::Research => "Research",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub category: Category,
    pub year: String,
    pub organization: String,
    pub description: String,
    pub details: String,
}

/// Category filter for the achievements grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AchievementFilter {
    #[default]
    All,
    Only(Category),
}

impl AchievementFilter {
    pub fn matches(self, achievement: &Achievement) -> bool {
        match self {
            AchievementFilter::All => true,
            AchievementFilter::Only(c) => achievement.category == c,
        }
    }

    /// Achievements passing the filter, in their original order.
    pub fn apply(self, achievements: &[Achievement]) -> Vec<&Achievement> {
        achievements.iter().filter(|a| self.matches(a)).collect()
    }

    /// Parses a filter badge label such as `"All"` or `"Social Impact"`.
    pub fn from_label(label: &str) -> Option<Self> {
        if label == "All" {
            return Some(AchievementFilter::All);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.label() == label)
            .map(AchievementFilter::Only)
    }

    pub fn label(self) -> &'static str {
        match self {
            AchievementFilter::All => "All",
            AchievementFilter::Only(c) => c.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Achievement, AchievementFilter, Category};
    use pretty_assertions::assert_eq;

    fn ach(title: &str, category: Category) -> Achievement {
        Achievement {
            title: title.to_string(),
            category,
            year: "2020".to_string(),
            organization: "Org".to_string(),
            description: String::new(),
            details: String::new(),
        }
    }

    #[test]
    fn filter_keeps_original_order() {
        let all = vec![
            ach("a", Category::Research),
            ach("b", Category::Academic),
            ach("c", Category::Research),
        ];
        let titles: Vec<&str> = AchievementFilter::Only(Category::Research)
            .apply(&all)
            .into_iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(AchievementFilter::All.apply(&all).len(), 3);
    }

    #[test]
    fn social_impact_uses_display_label_on_the_wire() {
        let json = serde_json::to_string(&Category::SocialImpact).expect("serialize");
        assert_eq!(json, "\"Social Impact\"");
        let back: Category = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Category::SocialImpact);
        assert_eq!(AchievementFilter::Only(back).label(), "Social Impact");
    }

    #[test]
    fn filter_labels_parse_back() {
        assert_eq!(AchievementFilter::from_label("All"), Some(AchievementFilter::All));
        assert_eq!(
            AchievementFilter::from_label("Social Impact"),
            Some(AchievementFilter::Only(Category::SocialImpact))
        );
        assert_eq!(AchievementFilter::from_label("Sports"), None);
    }
}
