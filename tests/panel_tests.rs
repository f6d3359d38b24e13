// Host-side tests for the control panel model and its HTML rendering.
// The main crate is wasm-only, so we include the pure-Rust markup module directly.

#![allow(dead_code)]
#[path = "../src/panel_html.rs"]
mod panel_html;

use configurator_core::*;
use panel_html::*;

fn config_with(material: &str) -> Configuration {
    Configuration {
        material: material.to_string(),
        ..Configuration::default()
    }
}

#[test]
fn panel_starts_open_with_sections_collapsed() {
    let panel = PanelState::default();
    assert!(panel.open);
    for s in Section::ALL {
        assert!(!panel.is_expanded(s));
    }
}

#[test]
fn local_toggles_do_not_touch_configuration() {
    let mut panel = PanelState::default();
    let config = Configuration::default();
    assert_eq!(panel.apply(PanelAction::ToggleOpen, &config), None);
    assert!(!panel.open);
    assert_eq!(
        panel.apply(PanelAction::ToggleSection(Section::Color), &config),
        None
    );
    assert!(panel.is_expanded(Section::Color));
    assert!(!panel.is_expanded(Section::Shape));
    panel.apply(PanelAction::ToggleSection(Section::Color), &config);
    assert!(!panel.is_expanded(Section::Color));
}

#[test]
fn selections_become_partial_updates() {
    let mut panel = PanelState::default();
    let config = Configuration::default();
    assert_eq!(
        panel.apply(PanelAction::SelectShape("torus".into()), &config),
        Some(ConfigUpdate::shape("torus"))
    );
    assert_eq!(
        panel.apply(PanelAction::SelectMaterial("wallStone".into()), &config),
        Some(ConfigUpdate::material("wallStone"))
    );
    assert_eq!(
        panel.apply(PanelAction::SelectColor("#2ecc71".into()), &config),
        Some(ConfigUpdate::color("#2ecc71"))
    );
    assert_eq!(
        panel.apply(PanelAction::CustomColor("#abcdef".into()), &config),
        Some(ConfigUpdate::color("#abcdef"))
    );
}

#[test]
fn sliders_quantize_and_skip_no_ops() {
    let mut panel = PanelState::default();
    let config = Configuration::default();
    assert_eq!(panel.apply(PanelAction::SetMetalness(0.6), &config), None);
    assert_eq!(
        panel.apply(PanelAction::SetMetalness(0.83), &config),
        Some(ConfigUpdate::metalness(0.8))
    );
    assert_eq!(
        panel.apply(PanelAction::SetRoughness(7.0), &config),
        Some(ConfigUpdate::roughness(1.0))
    );
}

#[test]
fn quantize_slider_snaps_to_tenths() {
    assert_eq!(quantize_slider(0.34), 0.3);
    assert_eq!(quantize_slider(0.7), 0.7);
    assert_eq!(quantize_slider(1.7), 1.0);
    assert_eq!(quantize_slider(-0.2), 0.0);
    assert_eq!(quantize_slider(f32::NAN), 0.0);
    assert_eq!(slider_label(0.6), "0.6");
    assert_eq!(slider_label(1.0), "1.0");
}

#[test]
fn actions_decode_from_markup_attributes() {
    assert_eq!(
        PanelAction::decode("toggle-panel", None),
        Some(PanelAction::ToggleOpen)
    );
    assert_eq!(
        PanelAction::decode("toggle-section", Some("properties")),
        Some(PanelAction::ToggleSection(Section::Properties))
    );
    assert_eq!(
        PanelAction::decode("metalness", Some(" 0.7 ")),
        Some(PanelAction::SetMetalness(0.7))
    );
    assert_eq!(PanelAction::decode("shape", None), None);
    assert_eq!(PanelAction::decode("roughness", Some("rough")), None);
    assert_eq!(PanelAction::decode("toggle-section", Some("lights")), None);
    assert_eq!(PanelAction::decode("explode", Some("1")), None);
}

#[test]
fn mount_seeds_white_only_when_color_is_unset() {
    let panel = PanelState::default();
    assert_eq!(panel.on_mount(&Configuration::default()), None);
    let mut config = Configuration {
        color: None,
        ..Configuration::default()
    };
    assert_eq!(panel.on_mount(&config), Some(ConfigUpdate::color("#ffffff")));
    config.color = Some(String::new());
    assert_eq!(panel.on_mount(&config), Some(ConfigUpdate::color("#ffffff")));
}

#[test]
fn properties_section_only_for_standard_material() {
    let panel = PanelState::default();
    assert_eq!(
        panel.visible_sections(&Configuration::default()).as_slice(),
        &Section::ALL
    );
    let wood = panel.view(&config_with("wood"));
    assert!(wood.section(Section::Properties).is_none());
    assert_eq!(wood.sections.len(), 3);
}

#[test]
fn expanded_properties_survive_a_textured_detour() {
    let mut panel = PanelState::default();
    let mut config = Configuration::default();
    panel.apply(PanelAction::ToggleSection(Section::Properties), &config);

    let update = panel.apply(PanelAction::SelectMaterial("abstract".into()), &config);
    config = config.merged(&update.unwrap());
    assert!(panel.view(&config).section(Section::Properties).is_none());
    assert!(!panel.visible_sections(&config).contains(&Section::Properties));

    let update = panel.apply(PanelAction::SelectMaterial("standard".into()), &config);
    config = config.merged(&update.unwrap());
    let view = panel.view(&config);
    let properties = view.section(Section::Properties).unwrap();
    assert!(properties.expanded);
    assert!(panel.is_expanded(Section::Properties));
}

#[test]
fn enter_and_space_activate_controls() {
    assert!(is_activation_key("Enter"));
    assert!(is_activation_key(" "));
    assert!(is_activation_key("Spacebar"));
    assert!(!is_activation_key("Tab"));
    assert!(!is_activation_key("a"));
    assert!(!is_activation_key("Escape"));
}

#[test]
fn view_marks_active_choices() {
    let mut panel = PanelState::default();
    let mut config = Configuration::default();
    config.color = Some("#3498db".into());
    config.shape = "cone".into();
    panel.apply(PanelAction::ToggleOpen, &config);
    let view = panel.view(&config);
    assert_eq!(view.toggle_label, "Open sidebar");

    match &view.section(Section::Shape).unwrap().body {
        SectionBody::Shapes(options) => {
            let active: Vec<_> = options.iter().filter(|o| o.active).map(|o| o.id).collect();
            assert_eq!(active, vec!["cone"]);
            assert_eq!(options.len(), 5);
        }
        other => panic!("unexpected body {:?}", other),
    }
    match &view.section(Section::Color).unwrap().body {
        SectionBody::Colors { presets, custom } => {
            assert_eq!(presets.len(), 6);
            assert!(presets.iter().any(|p| p.active && p.label == "Blue"));
            assert_eq!(custom, "#3498db");
        }
        other => panic!("unexpected body {:?}", other),
    }
    match &view.section(Section::Properties).unwrap().body {
        SectionBody::Properties {
            metalness,
            roughness,
        } => {
            assert_eq!(metalness.display, "0.6");
            assert_eq!(roughness.display, "0.4");
        }
        other => panic!("unexpected body {:?}", other),
    }
}

#[test]
fn html_carries_toggle_label_and_title() {
    let panel = PanelState::default();
    let html = render_panel(&panel.view(&Configuration::default()));
    assert!(html.contains(r#"aria-label="Close sidebar""#));
    assert!(html.contains("3D Configurator"));
    assert!(html.contains(r#"data-action="toggle-section" data-value="shape" aria-expanded="false""#));
    // collapsed sections render no bodies
    assert!(!html.contains(r#"data-action="shape""#));
}

#[test]
fn html_renders_expanded_bodies() {
    let mut panel = PanelState::default();
    let config = Configuration::default();
    for s in Section::ALL {
        panel.apply(PanelAction::ToggleSection(s), &config);
    }
    let html = render_panel(&panel.view(&config));
    assert!(html.contains(
        r#"class="option-button active" data-action="shape" data-value="sphere""#
    ));
    assert!(html.contains(r#"data-action="material" data-value="wallStone" title="Wall Stone""#));
    assert!(html.contains(r#"<img src="/textures/wood/color.png""#));
    assert!(html.contains(r##"data-action="custom-color" value="#ff6600""##));
    assert!(html.contains(r#"<span data-label-for="metalness">0.6</span>"#));
    assert!(html.contains(r#"step="0.1" value="0.4" data-action="roughness""#));
}

#[test]
fn html_escapes_user_color() {
    let mut panel = PanelState::default();
    let config = Configuration {
        color: Some(r#""><script>"#.into()),
        ..Configuration::default()
    };
    panel.apply(PanelAction::ToggleSection(Section::Color), &config);
    let html = render_panel(&panel.view(&config));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    assert_eq!(escape_attr(r#"a&'b"#), "a&amp;&#39;b");
}

#[test]
fn html_hides_properties_for_textured_materials() {
    let panel = PanelState::default();
    let html = render_panel(&panel.view(&config_with("metal")));
    assert!(!html.contains(r#"data-section="properties""#));
    assert!(html.contains(r#"data-section="color""#));
}
