//! Report formatting.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

use crate::probe::{FeatureSummary, ProbeReport, ServiceSummary, TileMatrixSetRow};

/// Formats probe results for output.
pub struct ProbeReportFormatter;

impl ProbeReportFormatter {
    pub fn format_service(service: &ServiceSummary) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec!["Collection", "Title", "Formats", "Storage CRS", "Tiles"]);

        for row in &service.collections {
            table.add_row(vec![
                row.id.clone(),
                row.title.clone(),
                row.output_formats.join(", "),
                row.storage_crs.clone().unwrap_or_default(),
                row.tiles_url.clone().unwrap_or_default(),
            ]);
        }

        format!(
            "{} (OpenAPI {})\n{}",
            service.title.as_deref().unwrap_or(&service.base_url),
            if service.version.is_empty() { "n/a" } else { &service.version },
            table
        )
    }

    pub fn format_tile_matrix_sets(rows: &[TileMatrixSetRow]) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec!["Tile Matrix Set", "CRS", "Levels", "Quad-tree from", "Sample tile"]);

        for row in rows {
            table.add_row(vec![
                row.id.clone(),
                row.reference.clone(),
                row.levels.to_string(),
                row.quad_tree_offset.to_string(),
                row.sample_tile.clone().unwrap_or_default(),
            ]);
        }

        table.to_string()
    }

    pub fn format_features(summary: &FeatureSummary) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![format!("Features: {}", summary.collection)]);

        table.add_row(vec!["Reference:", &summary.reference]);
        table.add_row(vec!["Returned:", &summary.returned.to_string()]);
        table.add_row(vec![
            "First id:",
            summary.first_id.as_deref().unwrap_or("-"),
        ]);
        table.add_row(vec!["Geometry:", &summary.geometry_types.join(", ")]);

        table.to_string()
    }

    pub fn format_table(report: &ProbeReport) -> String {
        let mut sections = vec![Self::format_service(&report.service)];
        if !report.tile_matrix_sets.is_empty() {
            sections.push(Self::format_tile_matrix_sets(&report.tile_matrix_sets));
        }
        if let Some(features) = &report.features {
            sections.push(Self::format_features(features));
        }
        sections.join("\n\n")
    }

    /// Format results as JSON.
    pub fn format_json(report: &ProbeReport) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::CollectionRow;

    fn report() -> ProbeReport {
        ProbeReport {
            service: ServiceSummary {
                base_url: "https://x.org/".to_string(),
                version: "3.0.2".to_string(),
                title: Some("Demo".to_string()),
                collections: vec![CollectionRow {
                    id: "lakes".to_string(),
                    title: "Large Lakes".to_string(),
                    output_formats: vec!["application/geo+json".to_string()],
                    storage_crs: Some("CRS:84".to_string()),
                    tiles_url: None,
                }],
            },
            tile_matrix_sets: vec![TileMatrixSetRow {
                id: "WorldCRS84Quad".to_string(),
                reference: "CRS:84".to_string(),
                levels: 3,
                quad_tree_offset: 0,
                sample_tile: Some("https://x.org/tiles/WorldCRS84Quad/0/0/0".to_string()),
            }],
            features: None,
        }
    }

    #[test]
    fn test_format_table() {
        let text = ProbeReportFormatter::format_table(&report());
        assert!(text.starts_with("Demo (OpenAPI 3.0.2)"));
        assert!(text.contains("lakes"));
        assert!(text.contains("WorldCRS84Quad"));
        assert!(!text.contains("Features:"));
    }

    #[test]
    fn test_format_json() {
        let json = ProbeReportFormatter::format_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["service"]["collections"][0]["id"], "lakes");
        assert_eq!(value["tile_matrix_sets"][0]["levels"], 3);
        assert!(value["features"].is_null());
    }
}
