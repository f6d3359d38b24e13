//! HTML for the control panel, rendered from a [`PanelView`].
//!
//! Interactive elements carry `data-action` (and `data-value` where the action
//! needs one) so a single delegated listener can decode them with
//! [`PanelAction::decode`](configurator_core::PanelAction::decode).

use configurator_core::{
    OptionView, PanelView, SectionBody, SectionView, SliderView, SwatchView, SLIDER_MAX,
    SLIDER_MIN, SLIDER_STEP,
};
use std::fmt::Write;

pub const ACTION_ATTR: &str = "data-action";
pub const VALUE_ATTR: &str = "data-value";
pub const LABEL_FOR_ATTR: &str = "data-label-for";

pub const PANEL_TITLE: &str = "3D Configurator";

const CHEVRON_DOWN: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" aria-hidden="true"><path d="M6 9L12 15L18 9" stroke="white" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;
const ARROW_RIGHT: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" aria-hidden="true"><path d="M9 18L15 12L9 6" stroke="white" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;
const ARROW_LEFT: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" aria-hidden="true"><path d="M15 18L9 12L15 6" stroke="white" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;

/// Escapes text for use inside element content or a double-quoted attribute.
pub fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[inline]
fn active_class(base: &str, active: bool) -> String {
    if active {
        format!("{} active", base)
    } else {
        base.to_string()
    }
}

pub fn render_panel(view: &PanelView) -> String {
    let mut html = String::new();
    let (toggle_class, icon) = if view.open {
        ("sidebar-toggle open", ARROW_RIGHT)
    } else {
        ("sidebar-toggle", ARROW_LEFT)
    };
    _ = write!(
        html,
        r#"<button type="button" class="{}" {}="toggle-panel" aria-label="{}" aria-expanded="{}">{}</button>"#,
        toggle_class, ACTION_ATTR, view.toggle_label, view.open, icon
    );
    _ = write!(
        html,
        r#"<div class="{}"><div class="sidebar-content"><h1>{}</h1>"#,
        if view.open { "sidebar" } else { "sidebar closed" },
        PANEL_TITLE
    );
    for section in &view.sections {
        render_section(&mut html, section);
    }
    html.push_str("</div></div>");
    html
}

fn render_section(html: &mut String, section: &SectionView) {
    let id = section.section.id();
    _ = write!(
        html,
        r#"<section class="config-section" data-section="{id}"><div class="{}" role="button" tabindex="0" {}="toggle-section" {}="{id}" aria-expanded="{}"><h2>{}</h2>{}</div>"#,
        active_class("section-header", section.expanded),
        ACTION_ATTR,
        VALUE_ATTR,
        section.expanded,
        section.section.title(),
        CHEVRON_DOWN,
    );
    if section.expanded {
        render_body(html, &section.body);
    }
    html.push_str("</section>");
}

fn render_body(html: &mut String, body: &SectionBody) {
    match body {
        SectionBody::Shapes(options) => {
            html.push_str(r#"<div class="option-buttons">"#);
            for option in options {
                render_option(html, option);
            }
            html.push_str("</div>");
        }
        SectionBody::Materials(swatches) => {
            html.push_str(r#"<div class="material-presets">"#);
            for swatch in swatches {
                render_material_swatch(html, swatch);
            }
            html.push_str("</div>");
        }
        SectionBody::Colors { presets, custom } => {
            html.push_str(r#"<div class="color-options"><div class="color-presets">"#);
            for swatch in presets {
                render_color_swatch(html, swatch);
            }
            _ = write!(
                html,
                r#"</div><div class="custom-color"><input type="color" {}="custom-color" value="{}" aria-label="Custom color"><h2>Custom</h2></div></div>"#,
                ACTION_ATTR,
                escape_attr(custom)
            );
        }
        SectionBody::Properties {
            metalness,
            roughness,
        } => {
            html.push_str(r#"<div class="slider-controls">"#);
            render_slider(html, metalness);
            render_slider(html, roughness);
            html.push_str("</div>");
        }
    }
}

fn render_option(html: &mut String, option: &OptionView) {
    _ = write!(
        html,
        r#"<button type="button" class="{}" {}="shape" {}="{}">{}</button>"#,
        active_class("option-button", option.active),
        ACTION_ATTR,
        VALUE_ATTR,
        option.id,
        option.label
    );
}

fn render_material_swatch(html: &mut String, swatch: &SwatchView) {
    let class = active_class("material-swatch", swatch.active);
    let inner = match swatch.image {
        Some(path) => format!(
            r#"<img src="/{}" alt="" loading="lazy">"#,
            escape_attr(path)
        ),
        // flat material shows its initial instead of a thumbnail
        None => format!(
            "<span>{}</span>",
            swatch.label.chars().next().map(String::from).unwrap_or_default()
        ),
    };
    _ = write!(
        html,
        r#"<div class="{}" role="button" tabindex="0" {}="material" {}="{}" title="{}">{}</div>"#,
        class, ACTION_ATTR, VALUE_ATTR, swatch.id, swatch.label, inner
    );
}

fn render_color_swatch(html: &mut String, swatch: &SwatchView) {
    _ = write!(
        html,
        r#"<div class="{}" role="button" tabindex="0" {}="color" {}="{id}" title="{}" style="background-color: {id}"></div>"#,
        active_class("color-swatch", swatch.active),
        ACTION_ATTR,
        VALUE_ATTR,
        swatch.label,
        id = swatch.id,
    );
}

fn render_slider(html: &mut String, slider: &SliderView) {
    _ = write!(
        html,
        r#"<div class="slider-control"><label>{}</label><input type="range" min="{}" max="{}" step="{}" value="{}" {}="{action}" aria-label="{}"><span {}="{action}">{}</span></div>"#,
        slider.label,
        SLIDER_MIN,
        SLIDER_MAX,
        SLIDER_STEP,
        slider.display,
        ACTION_ATTR,
        slider.label,
        LABEL_FOR_ATTR,
        slider.display,
        action = slider.action,
    );
}
