//! Predefined option sets for the searchable selects
//!
//! An [`OptionSet`] is fixed once built. Pages never mutate it; the only
//! runtime operation is computing the candidate set for a filter string.

use std::fmt;

/// Built-in medical conditions, in display order
pub const MEDICAL_CONDITIONS: &[&str] = &[
    "Diabetes Type 1",
    "Diabetes Type 2",
    "Hypertension",
    "Heart Disease",
    "Congestive Heart Failure",
    "Atrial Fibrillation",
    "High Cholesterol",
    "Stroke",
    "Asthma",
    "COPD",
    "Sleep Apnea",
    "Arthritis",
    "Osteoarthritis",
    "Rheumatoid Arthritis",
    "Osteoporosis",
    "Chronic Kidney Disease",
    "Liver Disease",
    "Hypothyroidism",
    "Hyperthyroidism",
    "Cancer",
    "Alzheimer's Disease",
    "Dementia",
    "Parkinson's Disease",
    "Multiple Sclerosis",
    "Epilepsy",
    "Migraine",
    "Depression",
    "Anxiety Disorder",
    "Bipolar Disorder",
    "Crohn's Disease",
    "Ulcerative Colitis",
    "Celiac Disease",
    "GERD",
    "Anemia",
    "Glaucoma",
    "Macular Degeneration",
    "HIV/AIDS",
    "Lupus",
];

/// Built-in allergies: food, drug and environmental
pub const ALLERGIES: &[&str] = &[
    // Food
    "Peanuts",
    "Tree Nuts",
    "Milk",
    "Eggs",
    "Wheat",
    "Soy",
    "Fish",
    "Shellfish",
    "Sesame",
    "Gluten",
    // Drug
    "Penicillin",
    "Amoxicillin",
    "Sulfa Drugs",
    "Aspirin",
    "Ibuprofen",
    "Codeine",
    "Morphine",
    "Latex",
    "Iodine Contrast",
    "Local Anesthetics",
    // Environmental
    "Pollen",
    "Dust Mites",
    "Mold",
    "Pet Dander",
    "Bee Stings",
    "Insect Bites",
    "Grass",
    "Ragweed",
];

/// Which domain an option set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    MedicalConditions,
    Allergies,
}

impl OptionKind {
    /// Built-in terms for this kind
    pub fn builtin(&self) -> &'static [&'static str] {
        match self {
            OptionKind::MedicalConditions => MEDICAL_CONDITIONS,
            OptionKind::Allergies => ALLERGIES,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            OptionKind::MedicalConditions => "Medical Condition",
            OptionKind::Allergies => "Allergy",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An ordered list of distinct domain terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    kind: OptionKind,
    items: Vec<String>,
    /// Lowercased copies of `items`, same indices
    folded: Vec<String>,
}

impl OptionSet {
    /// Build an option set, dropping blank entries and later duplicates
    pub fn new<I, S>(kind: OptionKind, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self {
            kind,
            items: Vec::new(),
            folded: Vec::new(),
        };

        for item in items {
            let item = item.into();
            if item.trim().is_empty() || set.items.contains(&item) {
                continue;
            }
            set.folded.push(item.to_lowercase());
            set.items.push(item);
        }

        set
    }

    /// The built-in set for a kind
    pub fn builtin(kind: OptionKind) -> Self {
        Self::new(kind, kind.builtin().iter().copied())
    }

    pub fn medical_conditions() -> Self {
        Self::builtin(OptionKind::MedicalConditions)
    }

    pub fn allergies() -> Self {
        Self::builtin(OptionKind::Allergies)
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `value` is exactly one of the options
    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|item| item == value)
    }

    /// Indices of the options containing `query`, case-insensitively.
    ///
    /// Order follows the option set; there is no ranking. An empty query
    /// matches every option.
    pub fn candidate_indices(&self, query: &str) -> Vec<usize> {
        let needle = query.to_lowercase();
        self.folded
            .iter()
            .enumerate()
            .filter(|(_, folded)| folded.contains(&needle))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// The candidate set for `query`
    pub fn candidates(&self, query: &str) -> Vec<&str> {
        self.candidate_indices(query)
            .into_iter()
            .map(|idx| self.items[idx].as_str())
            .collect()
    }
}
