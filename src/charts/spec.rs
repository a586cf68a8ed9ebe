//! Chart Specification Module
//! Declarative bubble-chart encoding, serialisable as a Vega-Lite document.

use crate::data::{Dataset, Indicator, ViewTable};
use serde::Serialize;
use std::collections::HashMap;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Bubble area range in square pixels
pub const SIZE_RANGE: [f64; 2] = [10.0, 1000.0];

pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 600;

/// Color palette for countries (RGB)
pub const PALETTE: [(u8, u8, u8); 10] = [
    (231, 76, 60),  // Red
    (46, 204, 113), // Green
    (155, 89, 182), // Purple
    (243, 156, 18), // Orange
    (26, 188, 156), // Teal
    (233, 30, 99),  // Pink
    (0, 188, 212),  // Cyan
    (255, 87, 34),  // Deep Orange
    (121, 85, 72),  // Brown
    (52, 152, 219), // Blue
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Nominal,
    Ordinal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Linear,
    Log,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Scale {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ScaleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

/// One encoding channel (or tooltip field).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    pub field: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
}

impl Channel {
    fn field(field: &'static str, kind: FieldType) -> Self {
        Self {
            field,
            kind,
            title: None,
            scale: None,
        }
    }

    fn indicator(indicator: Indicator) -> Self {
        Self {
            title: Some(indicator.label()),
            ..Self::field(indicator.column_name(), FieldType::Quantitative)
        }
    }

    fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Encoding {
    pub x: Channel,
    pub y: Channel,
    pub size: Channel,
    pub color: Channel,
    pub tooltip: Vec<Channel>,
}

/// Pan/zoom binding, the Vega-Lite form of an interactive chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: &'static str,
    pub select: &'static str,
    pub bind: &'static str,
}

/// Encoding instructions handed to whichever renderer draws the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub width: u32,
    pub height: u32,
    pub mark: Mark,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    pub encoding: Encoding,
}

impl ChartSpec {
    /// Bubble chart over the whole dataset; the x domain is fixed across years.
    pub fn bubble(dataset: &Dataset) -> Self {
        let x_domain = dataset.max_gni_per_capita.map(|max| [1.0, max]);

        let encoding = Encoding {
            x: Channel::indicator(Indicator::GniPerCapita).with_scale(Scale {
                kind: Some(ScaleType::Log),
                domain: x_domain,
                range: None,
            }),
            y: Channel::indicator(Indicator::LifeExpectancy).with_scale(Scale {
                kind: Some(ScaleType::Linear),
                ..Scale::default()
            }),
            size: Channel::indicator(Indicator::Population).with_scale(Scale {
                range: Some(SIZE_RANGE),
                ..Scale::default()
            }),
            color: Channel::field("country", FieldType::Nominal),
            tooltip: vec![
                Channel::field("country", FieldType::Nominal),
                Channel::field("year", FieldType::Ordinal),
                Channel::indicator(Indicator::GniPerCapita),
                Channel::indicator(Indicator::LifeExpectancy),
                Channel::indicator(Indicator::Population),
            ],
        };

        Self {
            schema: VEGA_LITE_SCHEMA,
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            mark: Mark::Circle,
            params: vec![Param {
                name: "grid",
                select: "interval",
                bind: "scales",
            }],
            encoding,
        }
    }

    /// Lower and upper bound of the x axis. Falls back to one decade when the dataset has no GNI.
    pub fn x_domain(&self) -> [f64; 2] {
        self.encoding
            .x
            .scale
            .as_ref()
            .and_then(|s| s.domain)
            .filter(|[lo, hi]| hi > lo)
            .unwrap_or([1.0, 10.0])
    }

    /// Full Vega-Lite document with the view rows inlined.
    pub fn to_vega_lite(&self, view: &ViewTable) -> serde_json::Result<serde_json::Value> {
        let mut doc = serde_json::to_value(self)?;
        if let serde_json::Value::Object(map) = &mut doc {
            map.insert(
                "data".to_string(),
                serde_json::json!({ "values": serde_json::to_value(&view.rows)? }),
            );
        }
        Ok(doc)
    }
}

/// Bubble area for `population`, scaled linearly from zero to the dataset maximum.
pub fn bubble_area(population: Option<i64>, max_population: Option<i64>) -> f64 {
    let [lo, hi] = SIZE_RANGE;
    match (population, max_population) {
        (Some(p), Some(max)) if max > 0 => lo + (hi - lo) * (p.max(0) as f64 / max as f64).min(1.0),
        _ => lo,
    }
}

/// Bubble radius in pixels for the given area.
pub fn bubble_radius(area: f64) -> f64 {
    (area / std::f64::consts::PI).sqrt()
}

/// Stable country -> palette color assignment, in dataset order.
#[derive(Debug, Clone, Default)]
pub struct ColorScale {
    index: HashMap<String, usize>,
}

impl ColorScale {
    pub fn new(countries: &[String]) -> Self {
        Self {
            index: countries
                .iter()
                .enumerate()
                .map(|(i, c)| (c.clone(), i))
                .collect(),
        }
    }

    pub fn color_for(&self, country: &str) -> (u8, u8, u8) {
        let i = self.index.get(country).copied().unwrap_or(0);
        PALETTE[i % PALETTE.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MergedRow, MergedTable};

    fn dataset() -> Dataset {
        let row = |country: &str, gni: f64, pop: i64| MergedRow {
            country: country.to_string(),
            year: 2000,
            life_expectancy: Some(70.0),
            population: Some(pop),
            gni_per_capita: Some(gni),
        };
        Dataset::from_table(MergedTable {
            rows: vec![row("Foo", 1000.0, 1000), row("Bar", 52000.0, 4000)],
        })
    }

    #[test]
    fn bubble_encoding_matches_dashboard_contract() {
        let spec = ChartSpec::bubble(&dataset());
        let doc = serde_json::to_value(&spec).unwrap();

        assert_eq!(doc["mark"], "circle");
        assert_eq!(doc["encoding"]["x"]["field"], "gni_per_capita");
        assert_eq!(doc["encoding"]["x"]["scale"]["type"], "log");
        assert_eq!(doc["encoding"]["x"]["scale"]["domain"], serde_json::json!([1.0, 52000.0]));
        assert_eq!(doc["encoding"]["y"]["field"], "life_expectancy");
        assert_eq!(doc["encoding"]["y"]["scale"]["type"], "linear");
        assert_eq!(doc["encoding"]["size"]["scale"]["range"], serde_json::json!([10.0, 1000.0]));
        assert_eq!(doc["encoding"]["color"]["type"], "nominal");

        let tooltip: Vec<&str> = doc["encoding"]["tooltip"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["field"].as_str().unwrap())
            .collect();
        assert_eq!(
            tooltip,
            vec!["country", "year", "gni_per_capita", "life_expectancy", "population"]
        );
    }

    #[test]
    fn vega_lite_inlines_view_rows() {
        let dataset = dataset();
        let spec = ChartSpec::bubble(&dataset);
        let view = dataset.view(&dataset.initial_selection());

        let doc = spec.to_vega_lite(&view).unwrap();
        assert_eq!(doc["$schema"], VEGA_LITE_SCHEMA);
        let values = doc["data"]["values"].as_array().unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["country"], "Foo");
        assert_eq!(values[0]["population"], 1000);
    }

    #[test]
    fn x_domain_falls_back_without_gni() {
        let spec = ChartSpec::bubble(&Dataset::from_table(MergedTable::default()));
        assert_eq!(spec.x_domain(), [1.0, 10.0]);
    }

    #[test]
    fn bubble_area_spans_size_range() {
        assert_eq!(bubble_area(Some(0), Some(100)), 10.0);
        assert_eq!(bubble_area(Some(100), Some(100)), 1000.0);
        assert_eq!(bubble_area(Some(50), Some(100)), 505.0);
        assert_eq!(bubble_area(None, Some(100)), 10.0);
        assert_eq!(bubble_area(Some(5), None), 10.0);
    }

    #[test]
    fn colors_are_stable_per_country() {
        let countries: Vec<String> = (0..12).map(|i| format!("C{i}")).collect();
        let colors = ColorScale::new(&countries);
        assert_eq!(colors.color_for("C0"), PALETTE[0]);
        assert_eq!(colors.color_for("C11"), PALETTE[1]);
        assert_eq!(colors.color_for("C3"), colors.color_for("C3"));
    }
}
