//! Plan input and export metadata
//!
//! A [`PlanInput`] is an immutable snapshot of the form. Everything else
//! (chunks, page records, artifact names) is derived from it on demand.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// Fallback for a missing day in artifact names and headers
pub const DAY_FALLBACK: &str = "XX";

/// Fallback for a missing month in artifact names
pub const MONTH_FALLBACK: &str = "Mes";

/// Fallback for a missing month in the page header
pub const MONTH_HEADER_FALLBACK: &str = "[mês]";

/// Weekly plan as supplied by the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanInput {
    /// First day of the week ("01".."31")
    pub week_start: String,
    /// Last day of the week
    pub week_end: String,
    /// Month label
    pub month: String,
    /// Roda inicial
    #[serde(rename = "rodaInicial")]
    pub opening_circle: String,
    /// Atividade dirigida
    #[serde(rename = "atividadeDirigida")]
    pub guided_activity: String,
    /// Atividade de livre escolha da criança
    #[serde(rename = "atividadeLivreEscolha")]
    pub free_choice_activity: String,
    /// Atividade diversificada
    #[serde(rename = "atividadeDiversificada")]
    pub diversified_activity: String,
}

impl PlanInput {
    /// Parse a plan from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Parse a plan from JSON (the form payload shape)
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a plan file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&source),
            Some("json") => Self::from_json_str(&source),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("").to_string(),
            )),
        }
    }

    /// Text of one activity column
    pub fn activity(&self, activity: Activity) -> &str {
        match activity {
            Activity::OpeningCircle => &self.opening_circle,
            Activity::Guided => &self.guided_activity,
            Activity::FreeChoice => &self.free_choice_activity,
            Activity::Diversified => &self.diversified_activity,
        }
    }

    /// Metadata the export step needs
    pub fn metadata(&self) -> ExportMetadata {
        ExportMetadata {
            range_start: self.week_start.clone(),
            range_end: self.week_end.clone(),
            period_label: self.month.clone(),
        }
    }

    /// Page header line
    pub fn header_title(&self) -> String {
        format!(
            "PLANEJAMENTO DA SEMANA {} à {} de {}",
            or_fallback(&self.week_start, DAY_FALLBACK),
            or_fallback(&self.week_end, DAY_FALLBACK),
            or_fallback(&self.month, MONTH_HEADER_FALLBACK),
        )
    }
}

/// The four activity columns, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    OpeningCircle,
    Guided,
    FreeChoice,
    Diversified,
}

impl Activity {
    /// All columns in table order
    pub const ALL: [Activity; 4] = [
        Activity::OpeningCircle,
        Activity::Guided,
        Activity::FreeChoice,
        Activity::Diversified,
    ];

    /// Position in the table
    pub fn index(self) -> usize {
        match self {
            Activity::OpeningCircle => 0,
            Activity::Guided => 1,
            Activity::FreeChoice => 2,
            Activity::Diversified => 3,
        }
    }

    /// Column heading
    pub fn heading(self) -> &'static str {
        match self {
            Activity::OpeningCircle => "RODA INICIAL",
            Activity::Guided => "ATIVIDADE DIRIGIDA",
            Activity::FreeChoice => "ATIVIDADE DE LIVRE ESCOLHA DA CRIANÇA",
            Activity::Diversified => "ATIVIDADE DIVERSIFICADA",
        }
    }
}

/// Metadata field required before export is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    RangeStart,
    RangeEnd,
    PeriodLabel,
}

impl std::fmt::Display for MetadataField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MetadataField::RangeStart => "week start",
            MetadataField::RangeEnd => "week end",
            MetadataField::PeriodLabel => "month",
        };
        f.write_str(name)
    }
}

/// Date range and period label of a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub range_start: String,
    pub range_end: String,
    pub period_label: String,
}

impl ExportMetadata {
    /// Required fields that are empty
    pub fn missing_fields(&self) -> Vec<MetadataField> {
        let mut missing = Vec::new();
        if self.range_start.is_empty() {
            missing.push(MetadataField::RangeStart);
        }
        if self.range_end.is_empty() {
            missing.push(MetadataField::RangeEnd);
        }
        if self.period_label.is_empty() {
            missing.push(MetadataField::PeriodLabel);
        }
        missing
    }

    /// Whether every required field is present
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Name of the exported PDF.
    ///
    /// Path separators in field values become `-`.
    pub fn artifact_name(&self) -> String {
        format!(
            "Planejamento_Semana_{}_a_{}_{}.pdf",
            file_token(&self.range_start, DAY_FALLBACK),
            file_token(&self.range_end, DAY_FALLBACK),
            file_token(&self.period_label, MONTH_FALLBACK),
        )
    }
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

fn file_token(value: &str, fallback: &str) -> String {
    or_fallback(value, fallback)
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(start: &str, end: &str, label: &str) -> ExportMetadata {
        ExportMetadata {
            range_start: start.to_string(),
            range_end: end.to_string(),
            period_label: label.to_string(),
        }
    }

    #[test]
    fn test_artifact_name() {
        assert_eq!(
            metadata("01", "07", "marco").artifact_name(),
            "Planejamento_Semana_01_a_07_marco.pdf"
        );
    }

    #[test]
    fn test_artifact_name_fallbacks() {
        assert_eq!(
            metadata("", "", "").artifact_name(),
            "Planejamento_Semana_XX_a_XX_Mes.pdf"
        );
        assert_eq!(
            metadata("10", "", "Abril").artifact_name(),
            "Planejamento_Semana_10_a_XX_Abril.pdf"
        );
    }

    #[test]
    fn test_artifact_name_strips_separators() {
        assert_eq!(
            metadata("01", "07", "../etc").artifact_name(),
            "Planejamento_Semana_01_a_07_..-etc.pdf"
        );
    }

    #[test]
    fn test_missing_fields() {
        assert!(metadata("01", "07", "Maio").is_complete());
        assert_eq!(
            metadata("01", "07", "").missing_fields(),
            vec![MetadataField::PeriodLabel]
        );
        assert_eq!(metadata("", "", "").missing_fields().len(), 3);
    }

    #[test]
    fn test_header_title() {
        let plan = PlanInput {
            week_start: "03".to_string(),
            week_end: "07".to_string(),
            month: "Março".to_string(),
            ..Default::default()
        };
        assert_eq!(plan.header_title(), "PLANEJAMENTO DA SEMANA 03 à 07 de Março");
        assert_eq!(
            PlanInput::default().header_title(),
            "PLANEJAMENTO DA SEMANA XX à XX de [mês]"
        );
    }

    #[test]
    fn test_form_payload_json() {
        let json = r#"{
            "weekStart": "01",
            "weekEnd": "05",
            "month": "Junho",
            "rodaInicial": "Chamadinha",
            "atividadeLivreEscolha": "Cantinhos"
        }"#;
        let plan = PlanInput::from_json_str(json).unwrap();

        assert_eq!(plan.week_end, "05");
        assert_eq!(plan.activity(Activity::OpeningCircle), "Chamadinha");
        assert_eq!(plan.activity(Activity::FreeChoice), "Cantinhos");
        assert_eq!(plan.activity(Activity::Guided), "");
    }

    #[test]
    fn test_plan_toml() {
        let toml = r#"
weekStart = "08"
month = "Julho"
atividadeDiversificada = "Massinha"
"#;
        let plan = PlanInput::from_toml_str(toml).unwrap();
        assert_eq!(plan.week_start, "08");
        assert_eq!(plan.diversified_activity, "Massinha");
        assert_eq!(plan.metadata().missing_fields(), vec![MetadataField::RangeEnd]);
    }

    #[test]
    fn test_activity_order() {
        for (i, activity) in Activity::ALL.iter().enumerate() {
            assert_eq!(activity.index(), i);
        }
    }
}
