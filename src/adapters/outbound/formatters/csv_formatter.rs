use std::collections::HashMap;

use crate::application::read_models::GraphSnapshot;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;

/// CsvFormatter adapter exporting the common-component index
///
/// Emits one row per occurrence of each common component, so spreadsheet
/// users can pivot by identity key or by SBOM.
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for CsvFormatter {
    fn format(&self, snapshot: &GraphSnapshot) -> Result<String> {
        let file_names: HashMap<&str, &str> = snapshot
            .sboms
            .iter()
            .map(|sbom| (sbom.id.as_str(), sbom.file_name.as_str()))
            .collect();

        let mut output = String::from(
            "identityKey,sbomFile,sbomId,componentId,componentName,version,sha256\n",
        );

        for record in &snapshot.common_components {
            let key = record.key.to_string();
            for occurrence in &record.occurrences {
                let sbom_id = occurrence.sbom_id.as_str();
                let file_name = file_names.get(sbom_id).copied().unwrap_or("");
                let row = [
                    key.as_str(),
                    file_name,
                    sbom_id,
                    occurrence.component_id.as_str(),
                    occurrence.component.name.as_str(),
                    occurrence.component.version.as_str(),
                    occurrence.component.sha256.as_str(),
                ];
                let escaped: Vec<String> = row.iter().map(|field| escape_csv(field)).collect();
                output.push_str(&escaped.join(","));
                output.push('\n');
            }
        }

        Ok(output)
    }
}

fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
