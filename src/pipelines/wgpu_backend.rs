use super::{
    naga_backend::{NagaBackend, NagaStage},
    ShaderBackend, StageKind,
};

/// Everything a render pipeline needs besides its two stages.
#[derive(Debug, Clone)]
pub struct PipelineTargets<'a> {
    pub layout: Option<&'a wgpu::PipelineLayout>,
    pub color_format: wgpu::TextureFormat,
    pub blend: Option<wgpu::BlendState>,
    pub depth_format: Option<wgpu::TextureFormat>,
    pub vertex_layouts: &'a [wgpu::VertexBufferLayout<'a>],
}

impl<'a> PipelineTargets<'a> {
    /// Opaque colour output, no depth, no vertex buffers and an automatic layout.
    pub fn new(color_format: wgpu::TextureFormat) -> Self {
        Self {
            layout: None,
            color_format,
            blend: Some(wgpu::BlendState {
                alpha: wgpu::BlendComponent::REPLACE,
                color: wgpu::BlendComponent::REPLACE,
            }),
            depth_format: None,
            vertex_layouts: &[],
        }
    }
}

#[derive(Debug)]
pub struct WgpuStage {
    naga: NagaStage,
    module: wgpu::ShaderModule,
}

impl WgpuStage {
    pub fn kind(&self) -> StageKind {
        self.naga.kind
    }

    pub fn entry_point(&self) -> &str {
        &self.naga.entry_point
    }
}

/// Compiles stages into `wgpu::ShaderModule`s and links them into a `wgpu::RenderPipeline`.
///
/// Sources are validated with naga first. Module and pipeline creation run inside a
/// validation error scope, so whatever the device rejects (a vertex input without a
/// buffer layout, a layout that does not match the bind groups) comes back as a
/// diagnostic instead of reaching the device's uncaptured error handler.
pub struct WgpuBackend<'a> {
    device: &'a wgpu::Device,
    targets: PipelineTargets<'a>,
    validator: NagaBackend,
}

impl<'a> WgpuBackend<'a> {
    pub fn new(device: &'a wgpu::Device, targets: PipelineTargets<'a>) -> Self {
        Self {
            device,
            targets,
            validator: NagaBackend::new(),
        }
    }

    pub fn live_stages(&self) -> usize {
        self.validator.live_stages()
    }
}

impl ShaderBackend for WgpuBackend<'_> {
    type Stage = WgpuStage;
    type Program = wgpu::RenderPipeline;

    fn compile_stage(
        &mut self,
        kind: StageKind,
        label: &str,
        source: &str,
    ) -> Result<WgpuStage, String> {
        let naga = self.validator.compile_stage(kind, label, source)?;
        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{} {} shader", label, kind)),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });
        if let Some(error) = pollster::block_on(scope.pop()) {
            self.validator.delete_stage(naga);
            return Err(error.to_string());
        }
        Ok(WgpuStage { naga, module })
    }

    fn link_program(
        &mut self,
        label: &str,
        vertex: &WgpuStage,
        fragment: &WgpuStage,
    ) -> Result<wgpu::RenderPipeline, String> {
        NagaBackend::check_interface(&vertex.naga, &fragment.naga)?;
        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = mk_render_pipeline(self.device, label, &self.targets, vertex, fragment);
        match pollster::block_on(scope.pop()) {
            Some(error) => Err(error.to_string()),
            None => Ok(pipeline),
        }
    }

    fn delete_stage(&mut self, stage: WgpuStage) {
        let WgpuStage { naga, module } = stage;
        self.validator.delete_stage(naga);
        drop(module);
    }
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    label: &str,
    targets: &PipelineTargets,
    vertex: &WgpuStage,
    fragment: &WgpuStage,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(label),
        layout: targets.layout,
        vertex: wgpu::VertexState {
            module: &vertex.module,
            entry_point: Some(vertex.entry_point()),
            buffers: targets.vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment.module,
            entry_point: Some(fragment.entry_point()),
            targets: &[Some(wgpu::ColorTargetState {
                format: targets.color_format,
                blend: targets.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: targets.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: Some(true),
            depth_compare: Some(wgpu::CompareFunction::Less),
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}
