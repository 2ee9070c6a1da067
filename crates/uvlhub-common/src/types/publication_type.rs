//! Publication type classification for dataset metadata.

use serde::{Deserialize, Serialize};

use crate::error::HubError;

/// The nature of a published dataset.
///
/// Every variant has two spellings: a machine `name` (how the relational
/// catalog stores it, e.g. `ANNOTATION_COLLECTION`) and a human-readable `value` (how users
/// and API clients refer to it, e.g. `annotationcollection`). Serde uses the
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PublicationType {
    /// Unset. Plain datasets that are not tied to a publication.
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "annotationcollection")]
    AnnotationCollection,
    #[serde(rename = "book")]
    Book,
    #[serde(rename = "section")]
    BookSection,
    #[serde(rename = "conferencepaper")]
    ConferencePaper,
    #[serde(rename = "datamanagementplan")]
    DataManagementPlan,
    #[serde(rename = "article")]
    JournalArticle,
    #[serde(rename = "patent")]
    Patent,
    #[serde(rename = "preprint")]
    Preprint,
    #[serde(rename = "deliverable")]
    ProjectDeliverable,
    #[serde(rename = "milestone")]
    ProjectMilestone,
    #[serde(rename = "proposal")]
    Proposal,
    #[serde(rename = "report")]
    Report,
    #[serde(rename = "softwaredocumentation")]
    SoftwareDocumentation,
    #[serde(rename = "taxonomictreatment")]
    TaxonomicTreatment,
    #[serde(rename = "technicalnote")]
    TechnicalNote,
    #[serde(rename = "thesis")]
    Thesis,
    #[serde(rename = "workingpaper")]
    WorkingPaper,
    #[serde(rename = "other")]
    Other,
}

impl PublicationType {
    /// All publication types in declaration order.
    pub const ALL: [PublicationType; 19] = [
        PublicationType::None,
        PublicationType::AnnotationCollection,
        PublicationType::Book,
        PublicationType::BookSection,
        PublicationType::ConferencePaper,
        PublicationType::DataManagementPlan,
        PublicationType::JournalArticle,
        PublicationType::Patent,
        PublicationType::Preprint,
        PublicationType::ProjectDeliverable,
        PublicationType::ProjectMilestone,
        PublicationType::Proposal,
        PublicationType::Report,
        PublicationType::SoftwareDocumentation,
        PublicationType::TaxonomicTreatment,
        PublicationType::TechnicalNote,
        PublicationType::Thesis,
        PublicationType::WorkingPaper,
        PublicationType::Other,
    ];

    /// Human-readable value, as shown to users and accepted by the explore API.
    pub fn value(self) -> &'static str {
        match self {
            PublicationType::None => "none",
            PublicationType::AnnotationCollection => "annotationcollection",
            PublicationType::Book => "book",
            PublicationType::BookSection => "section",
            PublicationType::ConferencePaper => "conferencepaper",
            PublicationType::DataManagementPlan => "datamanagementplan",
            PublicationType::JournalArticle => "article",
            PublicationType::Patent => "patent",
            PublicationType::Preprint => "preprint",
            PublicationType::ProjectDeliverable => "deliverable",
            PublicationType::ProjectMilestone => "milestone",
            PublicationType::Proposal => "proposal",
            PublicationType::Report => "report",
            PublicationType::SoftwareDocumentation => "softwaredocumentation",
            PublicationType::TaxonomicTreatment => "taxonomictreatment",
            PublicationType::TechnicalNote => "technicalnote",
            PublicationType::Thesis => "thesis",
            PublicationType::WorkingPaper => "workingpaper",
            PublicationType::Other => "other",
        }
    }

    /// Machine name, as stored in the `ds_meta_data.publication_type` column.
    pub fn name(self) -> &'static str {
        match self {
            PublicationType::None => "NONE",
            PublicationType::AnnotationCollection => "ANNOTATION_COLLECTION",
            PublicationType::Book => "BOOK",
            PublicationType::BookSection => "BOOK_SECTION",
            PublicationType::ConferencePaper => "CONFERENCE_PAPER",
            PublicationType::DataManagementPlan => "DATA_MANAGEMENT_PLAN",
            PublicationType::JournalArticle => "JOURNAL_ARTICLE",
            PublicationType::Patent => "PATENT",
            PublicationType::Preprint => "PREPRINT",
            PublicationType::ProjectDeliverable => "PROJECT_DELIVERABLE",
            PublicationType::ProjectMilestone => "PROJECT_MILESTONE",
            PublicationType::Proposal => "PROPOSAL",
            PublicationType::Report => "REPORT",
            PublicationType::SoftwareDocumentation => "SOFTWARE_DOCUMENTATION",
            PublicationType::TaxonomicTreatment => "TAXONOMIC_TREATMENT",
            PublicationType::TechnicalNote => "TECHNICAL_NOTE",
            PublicationType::Thesis => "THESIS",
            PublicationType::WorkingPaper => "WORKING_PAPER",
            PublicationType::Other => "OTHER",
        }
    }

    /// Look up a publication type by its human-readable value, ignoring case.
    ///
    /// Returns `None` for anything that is not one of the known values,
    /// including the empty string.
    pub fn from_value(value: &str) -> Option<Self> {
        let wanted = value.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.value() == wanted)
    }
}

impl std::str::FromStr for PublicationType {
    type Err = HubError;

    /// Parse a machine name (`BOOK_SECTION`), the inverse of [`PublicationType::name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| HubError::UnknownPublicationType(s.to_string()))
    }
}

impl std::fmt::Display for PublicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_value_ignores_case() {
        assert_eq!(PublicationType::from_value("book"), Some(PublicationType::Book));
        assert_eq!(PublicationType::from_value("BOOK"), Some(PublicationType::Book));
        assert_eq!(
            PublicationType::from_value("AnnotationCollection"),
            Some(PublicationType::AnnotationCollection)
        );
        assert_eq!(PublicationType::from_value("none"), Some(PublicationType::None));
    }

    #[test]
    fn test_from_value_rejects_unknown() {
        assert_eq!(PublicationType::from_value(""), None);
        assert_eq!(PublicationType::from_value("any"), None);
        assert_eq!(PublicationType::from_value("not_a_real_type"), None);
        // Machine names are not values
        assert_eq!(PublicationType::from_value("JOURNAL_ARTICLE"), None);
    }

    #[test]
    fn test_from_str_uses_machine_name() {
        assert_eq!(
            "JOURNAL_ARTICLE".parse::<PublicationType>().unwrap(),
            PublicationType::JournalArticle
        );
        assert!(matches!(
            "article".parse::<PublicationType>(),
            Err(HubError::UnknownPublicationType(_))
        ));
    }

    #[test]
    fn test_serde_uses_value() {
        let json = serde_json::to_string(&PublicationType::BookSection).unwrap();
        assert_eq!(json, "\"section\"");
        let parsed: PublicationType = serde_json::from_str("\"workingpaper\"").unwrap();
        assert_eq!(parsed, PublicationType::WorkingPaper);
    }

    proptest! {
        #[test]
        fn prop_from_value_accepts_any_casing(index in 0usize..19, mask in any::<u32>()) {
            let kind = PublicationType::ALL[index];
            let mixed: String = kind
                .value()
                .chars()
                .enumerate()
                .map(|(i, c)| if mask & (1 << (i % 32)) != 0 { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert_eq!(PublicationType::from_value(&mixed), Some(kind));
        }
    }
}
