//! Static sections around the feature grid: pipeline, optimizations,
//! architecture and tech stack. Each renderer returns an empty string for
//! empty input so the page shell can drop the section.

use std::fmt::Write as _;

use crate::escape::{data_attr, escape_html, escape_html_text};
use crate::model::{ArchLayer, Optimization, PipelineStage, TechItem};

pub fn render_pipeline(stages: &[PipelineStage]) -> String {
    let mut html = String::new();
    for (i, stage) in stages.iter().enumerate() {
        let _ = write!(
            html,
            r#"<div class="pipeline-stage">
  <div class="stage-number">{number}</div>
  <div class="stage-content">
    <h3>{title}</h3>
    <p>{description}</p>
    <div class="stage-details">
"#,
            number = stage.number,
            title = escape_html_text(&stage.title),
            description = escape_html_text(&stage.description),
        );
        for detail in &stage.details {
            let _ = writeln!(
                html,
                "      <span class=\"detail-badge\">{}</span>",
                escape_html_text(detail)
            );
        }
        let _ = write!(
            html,
            "    </div>\n    <code class=\"code-ref\"{} title=\"Click to copy\">{}</code>\n  </div>\n</div>\n",
            data_attr("copy", &stage.reference),
            escape_html_text(&stage.reference),
        );
        if i + 1 < stages.len() {
            html.push_str("<div class=\"stage-arrow\">→</div>\n");
        }
    }
    html
}

pub fn render_optimizations(optimizations: &[Optimization]) -> String {
    let mut html = String::new();
    for opt in optimizations {
        let impact = opt.impact.as_str();
        let _ = write!(
            html,
            r#"<div class="optimization-card">
  <div class="optimization-header">
    <h3>{name}</h3>
    <span class="impact-badge {impact}">{impact} impact</span>
  </div>
  <p>{description}</p>
  <div class="optimization-metrics">
"#,
            name = escape_html_text(&opt.name),
            description = escape_html_text(&opt.description),
        );
        for (label, value) in &opt.metrics {
            let _ = writeln!(
                html,
                "    <div class=\"metric\"><span class=\"metric-label\">{}</span><span class=\"metric-value\">{}</span></div>",
                escape_html_text(label),
                escape_html_text(value),
            );
        }
        html.push_str("  </div>\n</div>\n");
    }
    html
}

/// Layers top to bottom with a connector between consecutive layers. A
/// highlighted layer emphasizes its first component.
pub fn render_architecture(layers: &[ArchLayer]) -> String {
    let mut html = String::new();
    for (i, layer) in layers.iter().enumerate() {
        let _ = write!(
            html,
            "<div class=\"arch-layer\">\n  <h4>{}</h4>\n  <div class=\"arch-components\">\n",
            escape_html_text(&layer.title)
        );
        for (j, component) in layer.components.iter().enumerate() {
            let class = if layer.highlight && j == 0 {
                "arch-component highlight"
            } else {
                "arch-component"
            };
            let _ = writeln!(
                html,
                "    <div class=\"{class}\" title=\"{}\"><span class=\"arch-icon\">{}</span><span class=\"arch-name\">{}</span></div>",
                escape_html(&component.description),
                escape_html_text(&component.icon),
                escape_html_text(&component.name),
            );
        }
        html.push_str("  </div>\n</div>\n");
        if i + 1 < layers.len() {
            html.push_str("<div class=\"arch-connector\">↓</div>\n");
        }
    }
    html
}

pub fn render_tech(items: &[TechItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "<div class=\"tech-item\"><strong>{}</strong><span>{}</span></div>\n",
                escape_html_text(&item.label),
                escape_html_text(&item.value),
            )
        })
        .collect()
}
