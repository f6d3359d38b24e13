// Host-side tests for the configuration record, its merge and color parsing.

use configurator_core::*;

#[test]
fn default_configuration_matches_initial_state() {
    let c = Configuration::default();
    assert_eq!(c.shape, "sphere");
    assert_eq!(c.material, "standard");
    assert_eq!(c.color.as_deref(), Some("#ff6600"));
    assert!((c.metalness - 0.6).abs() < 1e-6);
    assert!((c.roughness - 0.4).abs() < 1e-6);
}

#[test]
fn update_merges_only_present_fields() {
    let mut state = ConfigState::default();
    let next = state.update_configuration(&ConfigUpdate::shape("torus")).clone();
    assert_eq!(next.shape, "torus");
    assert_eq!(next.material, "standard");
    assert_eq!(next.color.as_deref(), Some("#ff6600"));
    assert_eq!(state.revision(), 1);

    state.update_configuration(&ConfigUpdate {
        material: Some("wood".into()),
        roughness: Some(0.9),
        ..Default::default()
    });
    let c = state.current();
    assert_eq!(c.shape, "torus");
    assert_eq!(c.material, "wood");
    assert!((c.roughness - 0.9).abs() < 1e-6);
    assert!((c.metalness - 0.6).abs() < 1e-6);
    assert_eq!(state.revision(), 2);
}

#[test]
fn update_with_same_values_keeps_revision() {
    let mut state = ConfigState::default();
    state.update_configuration(&ConfigUpdate::shape("sphere"));
    state.update_configuration(&ConfigUpdate::default());
    assert_eq!(state.revision(), 0);
    assert!(ConfigUpdate::default().is_empty());
    assert!(!ConfigUpdate::metalness(0.1).is_empty());
}

#[test]
fn unknown_identifiers_are_stored_verbatim() {
    let mut state = ConfigState::default();
    state.update_configuration(&ConfigUpdate::shape("dodecahedron"));
    state.update_configuration(&ConfigUpdate::material("glass"));
    assert_eq!(state.current().shape, "dodecahedron");
    assert_eq!(state.current().material, "glass");
    assert!(!state.current().is_standard_material());
}

#[test]
fn empty_color_reads_as_unset() {
    let mut c = Configuration::default();
    c.color = Some(String::new());
    assert_eq!(c.color_hex(), None);
    c.color = None;
    assert_eq!(c.color_hex(), None);
    c.color = Some("#123456".into());
    assert_eq!(c.color_hex(), Some("#123456"));
}

#[test]
fn identifiers_round_trip_through_lookup() {
    for s in Shape::ALL {
        assert_eq!(Shape::from_id(s.id()), Some(s));
    }
    for m in MaterialKind::ALL {
        assert_eq!(MaterialKind::from_id(m.id()), Some(m));
    }
    assert_eq!(MaterialKind::WallStone.id(), "wallStone");
    assert_eq!(MaterialKind::WallStone.label(), "Wall Stone");
    assert_eq!(Shape::from_id("Sphere"), None);
}

#[test]
fn serde_uses_wire_identifiers() {
    assert_eq!(
        serde_json::to_string(&MaterialKind::WallStone).unwrap(),
        "\"wallStone\""
    );
    let update: ConfigUpdate = serde_json::from_str(r#"{"material":"wallStone"}"#).unwrap();
    assert_eq!(update, ConfigUpdate::material("wallStone"));

    let json = serde_json::to_string(&Configuration::default()).unwrap();
    let back: Configuration = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Configuration::default());
}

#[test]
fn hex_colors_parse_short_and_long_forms() {
    assert_eq!(parse_hex_srgb("#ff0000").unwrap(), [1.0, 0.0, 0.0]);
    assert_eq!(parse_hex_srgb("#fff").unwrap(), [1.0, 1.0, 1.0]);
    assert_eq!(parse_hex_srgb(" #000000 ").unwrap(), [0.0, 0.0, 0.0]);
    let orange = parse_hex_srgb("#ff6600").unwrap();
    assert!((orange[1] - 0.4).abs() < 1e-6);
}

#[test]
fn malformed_colors_are_rejected() {
    assert!(matches!(
        parse_hex_srgb("ff0000"),
        Err(ColorError::MissingHash(_))
    ));
    assert!(matches!(
        parse_hex_srgb("#12345"),
        Err(ColorError::BadLength(_))
    ));
    assert!(matches!(
        parse_hex_srgb("#gg0000"),
        Err(ColorError::BadDigit(_))
    ));
    assert!(matches!(parse_hex_srgb("#éé"), Err(ColorError::BadDigit(_))));
    // signs are not hex digits even though integer parsing accepts them
    assert!(matches!(
        parse_hex_srgb("#+f+f+f"),
        Err(ColorError::BadDigit(_))
    ));
    assert!(matches!(parse_hex_srgb("#+ff"), Err(ColorError::BadDigit(_))));
    assert!(parse_hex_srgb("").is_err());
}

#[test]
fn srgb_transfer_preserves_endpoints_and_darkens_midtones() {
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    let mid = srgb_to_linear(0.5);
    assert!(mid > 0.2 && mid < 0.22);
    let lin = parse_hex_linear("#808080").unwrap();
    assert!(lin.iter().all(|c| (*c - lin[0]).abs() < 1e-6));
}
