// Host-side tests for the static shape and material tables.

use configurator_core::*;
use glam::Vec2;

#[test]
fn every_shape_has_its_own_descriptor() {
    for s in Shape::ALL {
        let g = geometry_for(s);
        assert_eq!(g.shape, s);
        assert_eq!(resolve_geometry(s.id()).shape, s);
        assert_eq!(g.target_scale, 1.0);
    }
}

#[test]
fn unknown_shape_resolves_to_sphere() {
    assert_eq!(resolve_geometry("pyramid").shape, Shape::Sphere);
    assert_eq!(resolve_geometry("").shape, Shape::Sphere);
}

#[test]
fn uv_scales_follow_surface_proportions() {
    assert_eq!(geometry_for(Shape::Sphere).uv_scale, Vec2::new(1.0, 1.0));
    assert_eq!(geometry_for(Shape::Cube).uv_scale, Vec2::new(1.0, 1.0));
    assert_eq!(geometry_for(Shape::Torus).uv_scale, Vec2::new(2.0, 1.0));
    assert_eq!(geometry_for(Shape::Cone).uv_scale, Vec2::new(1.0, 1.5));
    assert_eq!(geometry_for(Shape::Cylinder).uv_scale, Vec2::new(1.0, 1.5));
}

#[test]
fn cone_is_a_cylinder_with_zero_top_radius() {
    match geometry_for(Shape::Cone).primitive {
        Primitive::Cylinder {
            radius_top,
            radius_bottom,
            height,
            ..
        } => {
            assert_eq!(radius_top, 0.0);
            assert_eq!(radius_bottom, 1.0);
            assert_eq!(height, 2.0);
        }
        other => panic!("unexpected cone primitive {:?}", other),
    }
}

#[test]
fn material_lookup_distinguishes_unknown_ids() {
    for m in MaterialKind::ALL {
        assert!(resolve_material(m.id()).is_some(), "{} missing", m.id());
    }
    assert!(resolve_material("glass").is_none());
    assert_eq!(
        resolve_material("standard"),
        Some(&MaterialDescriptor::Standard)
    );
}

fn texture_set(kind: MaterialKind) -> &'static TextureSet {
    match material_for(kind) {
        MaterialDescriptor::Textured(set) => set,
        MaterialDescriptor::Standard => panic!("{:?} is not textured", kind),
    }
}

#[test]
fn wall_stone_binds_ambient_occlusion_and_carries_height() {
    let set = texture_set(MaterialKind::WallStone);
    assert_eq!(set.maps.len(), 5);
    assert_eq!(set.repeat_multiplier, 2.0);
    assert_eq!(
        set.path_for(MapSlot::AmbientOcclusion),
        Some("textures/wallstone/ao.png")
    );
    assert_eq!(
        set.path_for(MapSlot::Height),
        Some("textures/wallstone/height.png")
    );
}

#[test]
fn only_metal_has_a_metalness_map() {
    for kind in [MaterialKind::Abstract, MaterialKind::Wood, MaterialKind::WallStone] {
        assert_eq!(texture_set(kind).path_for(MapSlot::Metalness), None);
    }
    assert_eq!(
        texture_set(MaterialKind::Metal).path_for(MapSlot::Metalness),
        Some("textures/metal/metallic.png")
    );
    assert_eq!(
        texture_set(MaterialKind::Abstract).path_for(MapSlot::Color),
        Some("textures/abstract/color.jpg")
    );
}

#[test]
fn swatches_use_color_maps() {
    assert_eq!(swatch_image(MaterialKind::Standard), None);
    assert_eq!(
        swatch_image(MaterialKind::Wood),
        Some("textures/wood/color.png")
    );
}

#[test]
fn texture_paths_map_back_to_their_channel() {
    assert_eq!(
        slot_for_path("textures/abstract/color.jpg"),
        Some(MapSlot::Color)
    );
    assert_eq!(
        slot_for_path("textures/metal/normal.png"),
        Some(MapSlot::Normal)
    );
    assert_eq!(slot_for_path("textures/unknown.png"), None);
    assert!(MapSlot::Color.is_srgb());
    assert!(!MapSlot::Normal.is_srgb());
    assert!(!MapSlot::AmbientOcclusion.is_srgb());
}
