use std::cmp::Ordering;

use serde::Serialize;
use serde_json::{json, Value};

use crate::analytics::is_strength;
use crate::models::TopicStat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    Green,
    Red,
}

impl BarColor {
    pub fn rgb(self) -> (f32, f32, f32) {
        match self {
            BarColor::Green => (0.18, 0.62, 0.28),
            BarColor::Red => (0.84, 0.19, 0.16),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub topic: String,
    pub accuracy: f64,
    pub color: BarColor,
}

/// Topic accuracy bar chart, highest accuracy first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

pub fn render_chart(topics: &[TopicStat]) -> TopicChart {
    let mut bars: Vec<Bar> = topics
        .iter()
        .map(|stat| Bar {
            topic: stat.topic.clone(),
            accuracy: stat.accuracy,
            color: if is_strength(stat.accuracy) {
                BarColor::Green
            } else {
                BarColor::Red
            },
        })
        .collect();
    bars.sort_by(|a, b| b.accuracy.partial_cmp(&a.accuracy).unwrap_or(Ordering::Equal));

    TopicChart {
        title: "Topic-wise Accuracy".to_string(),
        bars,
    }
}

impl TopicChart {
    /// Vega-Lite bar chart specification for the chart.
    pub fn to_vega_lite(&self) -> Value {
        let order: Vec<&str> = self.bars.iter().map(|bar| bar.topic.as_str()).collect();
        json!({
            "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
            "title": self.title,
            "height": 300,
            "data": { "values": self.bars },
            "mark": "bar",
            "encoding": {
                "x": { "field": "topic", "type": "nominal", "sort": order, "title": "Topic" },
                "y": {
                    "field": "accuracy",
                    "type": "quantitative",
                    "title": "Accuracy",
                    "scale": { "domain": [0, 100] }
                },
                "color": { "field": "color", "type": "nominal", "scale": null }
            }
        })
    }
}
