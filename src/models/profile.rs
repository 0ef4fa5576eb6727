/// A user's allergies and dietary restrictions, in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthProfile {
    pub allergies: Vec<String>,
    pub dietary_restrictions: Vec<String>,
}

impl HealthProfile {
    pub fn new(allergies: Vec<String>, dietary_restrictions: Vec<String>) -> Self {
        Self {
            allergies,
            dietary_restrictions,
        }
    }

    /// Replace both lists with whatever `source` yields. Never appends.
    pub fn load_profile(&mut self, source: &dyn ProfileSource) {
        let loaded = source.load();
        self.allergies = loaded.allergies;
        self.dietary_restrictions = loaded.dietary_restrictions;
    }

    pub fn allergies_joined(&self) -> String {
        self.allergies.join(", ")
    }

    pub fn restrictions_joined(&self) -> String {
        self.dietary_restrictions.join(", ")
    }
}

/// Where a session's health profile comes from.
pub trait ProfileSource: Send + Sync {
    fn load(&self) -> HealthProfile;
}

/// Demo profile used until real user profiles exist.
#[derive(Debug, Clone, Default)]
pub struct StaticProfileSource;

impl ProfileSource for StaticProfileSource {
    fn load(&self) -> HealthProfile {
        HealthProfile::new(
            vec!["gluten".to_string()],
            vec!["low sugar".to_string(), "high protein".to_string()],
        )
    }
}
