//! # Scene Context
//!
//! Owns everything a configurator session mutates: the active shape, one
//! parameter store per shape kind, the build options, the texture cache and
//! the single installed mesh.
//!
//! ## Event Flow
//!
//! ```text
//! ParametersChanged → dispatch → mutate state → rebuild → dispose old / install new
//! ```
//!
//! Rebuilds run synchronously. Hosts that build elsewhere take a
//! [`BuildRequest`] snapshot together with a [`RebuildTicket`]; only the
//! newest ticket may install its result.


use crate::assembler::{build_with_config, Material, RenderableMesh};
use crate::catalog::{default_values, schema, BuildOptions, ParameterValues, ShapeKind, ShapeParams};
use crate::error::MeshError;
use crate::texture::{TextureCache, TextureHandle, TextureRole};
use config::constants::PipelineConfig;
use std::collections::BTreeMap;
use tracing::{debug, warn};

// =============================================================================
// BACKEND
// =============================================================================

/// The renderer a scene installs meshes into.
pub trait RenderBackend {
    type Geometry;
    type Material;
    type Object;

    /// Uploads flattened `[x, y, z, ...]` positions and `[u, v, ...]` UVs.
    fn create_geometry(&mut self, positions: &[f32], uvs: &[f32]) -> Self::Geometry;

    fn create_material(&mut self, material: &Material) -> Self::Material;

    /// Adds an object with a uniform scale to the scene.
    fn create_object(
        &mut self,
        geometry: Self::Geometry,
        material: Self::Material,
        scale: f64,
    ) -> Self::Object;

    /// Removes an object and frees its geometry and material.
    fn dispose(&mut self, object: Self::Object);

    /// Frees a texture previously delivered through
    /// [`ParametersChanged::TextureLoaded`].
    fn dispose_texture(&mut self, handle: TextureHandle);
}

// =============================================================================
// EVENTS
// =============================================================================

/// A single change coming from the parameter panel or a loader.
#[derive(Debug, Clone, PartialEq)]
pub enum ParametersChanged {
    /// Update one parameter of the active shape.
    SetParameter { name: String, value: f64 },
    SelectShape(ShapeKind),
    SetMeshScale(f64),
    SetUseUvTest(bool),
    /// An asynchronously loaded texture became available.
    TextureLoaded {
        role: TextureRole,
        handle: TextureHandle,
    },
}

/// Generation number of an in-flight rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RebuildTicket(u64);

/// Everything needed to build the current shape away from the scene.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub kind: ShapeKind,
    pub values: ParameterValues,
    pub options: BuildOptions,
    pub textures: TextureCache,
    pub config: PipelineConfig,
}

impl BuildRequest {
    pub fn run(&self) -> Result<Option<RenderableMesh>, MeshError> {
        let params = ShapeParams::from_values(self.kind, &self.values)?;
        build_with_config(&params, &self.options, &self.textures, &self.config)
    }
}

struct Installed<O> {
    object: O,
    mesh: RenderableMesh,
}

// =============================================================================
// SCENE CONTEXT
// =============================================================================

/// Session state with a single mesh slot.
pub struct SceneContext<B: RenderBackend> {
    backend: B,
    textures: TextureCache,
    active: ShapeKind,
    values: BTreeMap<ShapeKind, ParameterValues>,
    options: BuildOptions,
    config: PipelineConfig,
    slot: Option<Installed<B::Object>>,
    generation: u64,
}

impl<B: RenderBackend> SceneContext<B> {
    /// Creates a scene showing nothing, with default parameters for every
    /// shape kind and `active` selected.
    pub fn new(backend: B, active: ShapeKind) -> Self {
        Self::with_config(backend, active, PipelineConfig::default())
    }

    pub fn with_config(backend: B, active: ShapeKind, config: PipelineConfig) -> Self {
        let values = ShapeKind::ALL
            .into_iter()
            .map(|kind| (kind, default_values(kind)))
            .collect();

        Self {
            backend,
            textures: TextureCache::new(),
            active,
            values,
            options: BuildOptions::default(),
            config,
            slot: None,
            generation: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureCache {
        &mut self.textures
    }

    pub fn active_shape(&self) -> ShapeKind {
        self.active
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Parameter store of a shape kind.
    pub fn values(&self, kind: ShapeKind) -> Option<&ParameterValues> {
        self.values.get(&kind)
    }

    /// Replaces the parameter store of a shape kind without rebuilding,
    /// e.g. when restoring a saved session.
    pub fn load_values(&mut self, kind: ShapeKind, values: ParameterValues) {
        self.values.insert(kind, values);
    }

    /// The installed mesh, if any.
    pub fn current(&self) -> Option<&RenderableMesh> {
        self.slot.as_ref().map(|installed| &installed.mesh)
    }

    /// Applies an event and rebuilds the active shape.
    ///
    /// Unknown parameter names are logged and ignored. Parameter values are
    /// clamped and snapped onto their schema grid before they are stored,
    /// and the mesh scale is clamped into its range. A non-finite value is
    /// rejected without touching the scene. If the rebuild fails, the
    /// previous shape, options and parameters are restored and the installed
    /// mesh stays in place.
    pub fn dispatch(&mut self, event: ParametersChanged) -> Result<(), MeshError> {
        let active = self.active;
        let options = self.options;
        let values = self.values.get(&active).cloned();

        match event {
            ParametersChanged::SetParameter { name, value } => {
                let Some(spec) = schema::find(active, &name) else {
                    warn!(shape = %active, name = %name, "ignoring unknown parameter");
                    return Ok(());
                };
                if !value.is_finite() {
                    return Err(MeshError::invalid(name, value));
                }
                self.values
                    .entry(active)
                    .or_insert_with(|| default_values(active))
                    .set(name, spec.clamp_snap(value));
            }
            ParametersChanged::SelectShape(kind) => self.active = kind,
            ParametersChanged::SetMeshScale(scale) => {
                self.options = BuildOptions {
                    mesh_scale: scale,
                    ..self.options
                }
                .normalized()?;
            }
            ParametersChanged::SetUseUvTest(enabled) => self.options.use_uv_test = enabled,
            ParametersChanged::TextureLoaded { role, handle } => {
                self.textures.insert(role, handle);
            }
        }

        self.rebuild().map_err(|err| {
            warn!(shape = %self.active, error = %err, "rebuild failed, restoring previous state");
            self.active = active;
            self.options = options;
            if let Some(values) = values {
                self.values.insert(active, values);
            }
            err
        })
    }

    /// Rebuilds the active shape synchronously and swaps it into the slot.
    pub fn rebuild(&mut self) -> Result<(), MeshError> {
        let ticket = self.begin_rebuild();
        let built = self.build_request().run()?;
        self.complete_rebuild(ticket, built);
        Ok(())
    }

    /// Snapshot of the inputs of the next rebuild.
    pub fn build_request(&self) -> BuildRequest {
        BuildRequest {
            kind: self.active,
            values: self
                .values
                .get(&self.active)
                .cloned()
                .unwrap_or_else(|| default_values(self.active)),
            options: self.options,
            textures: self.textures.clone(),
            config: self.config,
        }
    }

    /// Hands out a ticket that supersedes every earlier one.
    pub fn begin_rebuild(&mut self) -> RebuildTicket {
        self.generation += 1;
        RebuildTicket(self.generation)
    }

    /// Installs the result of a rebuild if its ticket is still the newest.
    ///
    /// The previous object is disposed before the new one is created. A
    /// `None` result leaves the slot empty. Returns false for a stale ticket,
    /// whose result is dropped without touching the scene.
    pub fn complete_rebuild(
        &mut self,
        ticket: RebuildTicket,
        built: Option<RenderableMesh>,
    ) -> bool {
        if ticket.0 != self.generation {
            warn!(
                ticket = ticket.0,
                latest = self.generation,
                "discarding stale rebuild"
            );
            return false;
        }

        self.clear_slot();

        if let Some(mesh) = built {
            let positions = mesh.mesh.vertices_f32();
            let uvs = mesh.mesh.uvs_f32().unwrap_or_default();

            let geometry = self.backend.create_geometry(&positions, &uvs);
            let material = self.backend.create_material(&mesh.material);
            let object = self.backend.create_object(geometry, material, mesh.scale);

            debug!(
                shape = %mesh.kind,
                vertices = mesh.mesh.vertex_count(),
                "installed mesh"
            );
            self.slot = Some(Installed { object, mesh });
        }

        true
    }

    /// Disposes the installed object and every cached texture.
    pub fn shutdown(&mut self) {
        self.clear_slot();
        for (role, handle) in self.textures.drain() {
            debug!(?role, handle = handle.0, "disposing texture");
            self.backend.dispose_texture(handle);
        }
    }

    fn clear_slot(&mut self) {
        if let Some(installed) = self.slot.take() {
            self.backend.dispose(installed.object);
        }
    }
}
