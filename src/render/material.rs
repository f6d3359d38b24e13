use super::helpers;
use crate::core::{SampledMap, ShaderParams, TextureCache, TEXTURE_ANISOTROPY};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MaterialUniforms {
    base_color: [f32; 4],
    // x: metalness, y: roughness, zw: uv repeat
    factors: [f32; 4],
    has_maps: [f32; 4],
    has_maps2: [f32; 4],
}

impl MaterialUniforms {
    pub(crate) fn from_params(params: &ShaderParams) -> Self {
        let flag = |m: Option<SampledMap>| if m.is_some() { 1.0 } else { 0.0 };
        let maps = &params.maps;
        let repeat = [
            maps.color,
            maps.normal,
            maps.roughness,
            maps.metalness,
            maps.occlusion,
        ]
        .into_iter()
        .flatten()
        .map(|m| m.repeat)
        .next()
        .unwrap_or(glam::Vec2::ONE);
        let [r, g, b] = params.base_color;
        Self {
            base_color: [r, g, b, 1.0],
            factors: [params.metalness, params.roughness, repeat.x, repeat.y],
            has_maps: [
                flag(maps.color),
                flag(maps.normal),
                flag(maps.roughness),
                flag(maps.metalness),
            ],
            has_maps2: [flag(maps.occlusion), 0.0, 0.0, 0.0],
        }
    }
}

/// A decoded map resident on the GPU.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

/// Layout, sampler and fallback textures for the material bind group.
pub(crate) struct MaterialResources {
    pub(crate) layout: wgpu::BindGroupLayout,
    pub(crate) uniform_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,
    white: GpuTexture,
    flat_normal: GpuTexture,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

impl MaterialResources {
    pub(crate) fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                texture_entry(1),
                texture_entry(2),
                texture_entry(3),
                texture_entry(4),
                texture_entry(5),
                wgpu::BindGroupLayoutEntry {
                    binding: 6,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("material_ub"),
            size: std::mem::size_of::<MaterialUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("repeat_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            anisotropy_clamp: TEXTURE_ANISOTROPY,
            ..Default::default()
        });
        let (texture, view) = helpers::solid_texture(
            device,
            queue,
            "white_tex",
            [255, 255, 255, 255],
            wgpu::TextureFormat::Rgba8Unorm,
        );
        let white = GpuTexture { texture, view };
        let (texture, view) = helpers::solid_texture(
            device,
            queue,
            "flat_normal_tex",
            [128, 128, 255, 255],
            wgpu::TextureFormat::Rgba8Unorm,
        );
        let flat_normal = GpuTexture { texture, view };
        Self {
            layout,
            uniform_buffer,
            sampler,
            white,
            flat_normal,
        }
    }

    /// Binds the maps of `params`; unbound or not yet uploaded channels get
    /// the neutral fallback texture.
    pub(crate) fn bind_group(
        &self,
        device: &wgpu::Device,
        params: &ShaderParams,
        textures: &TextureCache<GpuTexture>,
    ) -> wgpu::BindGroup {
        let view_for = |map: Option<SampledMap>, fallback: &'_ GpuTexture| {
            map.and_then(|m| textures.get(m.path))
                .map(|t| t.view.clone())
                .unwrap_or_else(|| fallback.view.clone())
        };
        let maps = &params.maps;
        let views = [
            view_for(maps.color, &self.white),
            view_for(maps.normal, &self.flat_normal),
            view_for(maps.roughness, &self.white),
            view_for(maps.metalness, &self.white),
            view_for(maps.occlusion, &self.white),
        ];
        let mut entries = vec![wgpu::BindGroupEntry {
            binding: 0,
            resource: self.uniform_buffer.as_entire_binding(),
        }];
        entries.extend(views.iter().enumerate().map(|(i, view)| wgpu::BindGroupEntry {
            binding: i as u32 + 1,
            resource: wgpu::BindingResource::TextureView(view),
        }));
        entries.push(wgpu::BindGroupEntry {
            binding: 6,
            resource: wgpu::BindingResource::Sampler(&self.sampler),
        });
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material_bg"),
            layout: &self.layout,
            entries: &entries,
        })
    }
}
