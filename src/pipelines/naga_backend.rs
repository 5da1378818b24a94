use std::collections::BTreeMap;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::{ShaderBackend, StageKind};

/// Opaque identifier of a program linked by [`NagaBackend`]. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// A parsed and validated WGSL stage.
#[derive(Debug)]
pub struct NagaStage {
    pub kind: StageKind,
    pub entry_point: String,
    module: naga::Module,
}

#[derive(Debug, Clone)]
pub struct LinkedProgram {
    pub id: ProgramId,
    pub vertex_entry_point: String,
    pub fragment_entry_point: String,
    /// `@location`s carried from the vertex to the fragment stage.
    pub varyings: Vec<u32>,
}

/// Builds programs without a device by running WGSL through naga.
///
/// Compiling parses and validates one stage and requires an entry point of the
/// stage's kind. Linking checks that every fragment input location is written by
/// the vertex stage with the same type.
#[derive(Debug, Default)]
pub struct NagaBackend {
    next_program: u32,
    live_stages: usize,
}

impl NagaBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages compiled but not yet deleted.
    pub fn live_stages(&self) -> usize {
        self.live_stages
    }

    pub(crate) fn check_interface(
        vertex: &NagaStage,
        fragment: &NagaStage,
    ) -> Result<Vec<u32>, String> {
        if vertex.kind != StageKind::Vertex {
            return Err(format!(
                "expected a vertex stage, got a {} stage",
                vertex.kind
            ));
        }
        if fragment.kind != StageKind::Fragment {
            return Err(format!(
                "expected a fragment stage, got a {} stage",
                fragment.kind
            ));
        }
        let outputs = vertex.outputs();
        let inputs = fragment.inputs();
        for (location, ty) in &inputs {
            match outputs.get(location) {
                None => {
                    return Err(format!(
                        "fragment input @location({}) in `{}` is not written by vertex entry point `{}`",
                        location, fragment.entry_point, vertex.entry_point
                    ));
                }
                Some(out_ty) if out_ty != ty => {
                    return Err(format!(
                        "@location({}) type mismatch: vertex writes {:?}, fragment reads {:?}",
                        location, out_ty, ty
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(inputs.into_keys().collect())
    }
}

impl ShaderBackend for NagaBackend {
    type Stage = NagaStage;
    type Program = LinkedProgram;

    fn compile_stage(
        &mut self,
        kind: StageKind,
        label: &str,
        source: &str,
    ) -> Result<NagaStage, String> {
        let stage = NagaStage::parse(kind, label, source)?;
        self.live_stages += 1;
        Ok(stage)
    }

    fn link_program(
        &mut self,
        label: &str,
        vertex: &NagaStage,
        fragment: &NagaStage,
    ) -> Result<LinkedProgram, String> {
        let varyings = Self::check_interface(vertex, fragment)?;
        self.next_program += 1;
        log::debug!(
            "Linked program {} ({}) with {} varyings",
            self.next_program,
            label,
            varyings.len()
        );
        Ok(LinkedProgram {
            id: ProgramId(self.next_program),
            vertex_entry_point: vertex.entry_point.clone(),
            fragment_entry_point: fragment.entry_point.clone(),
            varyings,
        })
    }

    fn delete_stage(&mut self, stage: NagaStage) {
        self.live_stages = self.live_stages.saturating_sub(1);
        drop(stage);
    }
}

impl NagaStage {
    pub(crate) fn parse(kind: StageKind, label: &str, source: &str) -> Result<Self, String> {
        let module = naga::front::wgsl::parse_str(source)
            .map_err(|e| e.emit_to_string_with_path(source, label))?;
        let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
        validator
            .validate(&module)
            .map_err(|e| e.emit_to_string_with_path(source, label))?;
        let entry_point = module
            .entry_points
            .iter()
            .find(|ep| ep.stage == naga_stage(kind))
            .map(|ep| ep.name.clone())
            .ok_or_else(|| format!("{}: no @{} entry point found", label, kind))?;
        Ok(Self {
            kind,
            entry_point,
            module,
        })
    }

    fn entry(&self) -> Option<&naga::EntryPoint> {
        self.module
            .entry_points
            .iter()
            .find(|ep| ep.name == self.entry_point)
    }

    /// Locations written by the entry point's result.
    fn outputs(&self) -> BTreeMap<u32, naga::TypeInner> {
        let mut locations = BTreeMap::new();
        if let Some(result) = self.entry().and_then(|ep| ep.function.result.as_ref()) {
            self.collect_locations(result.ty, result.binding.as_ref(), &mut locations);
        }
        locations
    }

    /// Locations read by the entry point's arguments.
    fn inputs(&self) -> BTreeMap<u32, naga::TypeInner> {
        let mut locations = BTreeMap::new();
        if let Some(ep) = self.entry() {
            for argument in &ep.function.arguments {
                self.collect_locations(argument.ty, argument.binding.as_ref(), &mut locations);
            }
        }
        locations
    }

    fn collect_locations(
        &self,
        ty: naga::Handle<naga::Type>,
        binding: Option<&naga::Binding>,
        locations: &mut BTreeMap<u32, naga::TypeInner>,
    ) {
        let inner = &self.module.types[ty].inner;
        match binding {
            Some(naga::Binding::Location { location, .. }) => {
                locations.insert(*location, inner.clone());
            }
            Some(_) => {}
            None => {
                if let naga::TypeInner::Struct { members, .. } = inner {
                    for member in members {
                        if let Some(naga::Binding::Location { location, .. }) = &member.binding {
                            let member_inner = &self.module.types[member.ty].inner;
                            locations.insert(*location, member_inner.clone());
                        }
                    }
                }
            }
        }
    }
}

fn naga_stage(kind: StageKind) -> naga::ShaderStage {
    match kind {
        StageKind::Vertex => naga::ShaderStage::Vertex,
        StageKind::Fragment => naga::ShaderStage::Fragment,
    }
}
