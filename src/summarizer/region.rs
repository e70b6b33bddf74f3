//! Location classification against the Recife metropolitan region (RMR).

use super::normalize::{EMPTY_LABEL, clean_text};
use serde::{Deserialize, Serialize};

/// Four-way city classifier: the distinguished city, members of the
/// reference set, everything else, and empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionClassifier {
    pub exact_value: String,
    pub exact_label: String,
    pub members: Vec<String>,
    pub member_label: String,
    pub other_label: String,
}

impl Default for RegionClassifier {
    fn default() -> Self {
        Self {
            exact_value: "recife".to_owned(),
            exact_label: "Recife".to_owned(),
            members: [
                "recife",
                "olinda",
                "jaboatão dos guararapes",
                "paulista",
                "cabo de santo agostinho",
                "camaragibe",
                "igarassu",
                "abreu e lima",
                "ipojuca",
                "itapissuma",
                "moreno",
                "araçoiaba",
                "itamaracá",
                "são lourenço da mata",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            member_label: "Dentro da RMR".to_owned(),
            other_label: "Fora da RMR".to_owned(),
        }
    }
}

impl RegionClassifier {
    pub fn classify(&self, city: Option<&str>) -> String {
        let Some(key) = city.and_then(clean_text) else {
            return EMPTY_LABEL.to_owned();
        };

        if clean_text(&self.exact_value).as_deref() == Some(key.as_str()) {
            self.exact_label.clone()
        } else if self
            .members
            .iter()
            .any(|member| clean_text(member).as_deref() == Some(key.as_str()))
        {
            self.member_label.clone()
        } else {
            self.other_label.clone()
        }
    }

    /// Every label `classify` can return.
    pub fn labels(&self) -> [&str; 4] {
        [
            &self.exact_label,
            &self.member_label,
            &self.other_label,
            EMPTY_LABEL,
        ]
    }
}

pub fn categorize(city: Option<&str>, classifier: &RegionClassifier) -> String {
    classifier.classify(city)
}
