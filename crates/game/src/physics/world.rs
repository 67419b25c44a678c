use glam::Vec3;
use rapier3d::control::{EffectiveCharacterMovement, KinematicCharacterController};
use rapier3d::prelude::*;

/// Thickness of the floor slab under `add_ground`.
const GROUND_THICKNESS: Real = 20.0;

fn to_vector(v: Vec3) -> Vector {
    Vector::new(v.x, v.y, v.z)
}

fn to_vec3(v: &Vector) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Rapier state for the sandbox. Only kinematic and fixed colliders live
/// here, so `step` mostly keeps the broad phase current for shape casts.
pub struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    integration_parameters: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    gravity: Vector,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

impl PhysicsWorld {
    pub fn new(dt: Real) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = dt;
        integration_parameters.min_ccd_dt = dt / 100.0;

        Self {
            pipeline: PhysicsPipeline::new(),
            integration_parameters,
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity: Vector::new(0.0, -980.0, 0.0),
        }
    }

    pub fn dt(&self) -> Real {
        self.integration_parameters.dt
    }

    pub fn step(&mut self) {
        self.pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Upright kinematic cylinder centred on `position`.
    pub fn add_character(&mut self, position: Vec3, radius: Real, height: Real) -> RigidBodyHandle {
        let handle = self.bodies.insert(
            RigidBodyBuilder::kinematic_position_based()
                .translation(to_vector(position))
                .lock_rotations()
                .build(),
        );

        self.colliders.insert_with_parent(
            ColliderBuilder::cylinder(height / 2.0, radius)
                .friction(0.0)
                .build(),
            handle,
            &mut self.bodies,
        );

        handle
    }

    pub fn add_static_box(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        let half_extents = half_extents.abs();
        self.colliders.insert(
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
                .translation(to_vector(center))
                .build(),
        )
    }

    /// Square floor whose top face sits at height `y`.
    pub fn add_ground(&mut self, y: Real, half_size: Real) -> ColliderHandle {
        let half_thickness = GROUND_THICKNESS / 2.0;
        self.add_static_box(
            Vec3::new(0.0, y - half_thickness, 0.0),
            Vec3::new(half_size, half_thickness, half_size),
        )
    }

    pub fn body_pose(&self, handle: RigidBodyHandle) -> Pose {
        self.bodies
            .get(handle)
            .map_or(Pose::IDENTITY, |body| *body.position())
    }

    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.bodies
            .get(handle)
            .map(|body| to_vec3(&body.translation()))
    }

    pub fn set_body_position(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle) {
            let rotation = *body.rotation();
            body.set_position(Pose::from_parts(to_vector(position), rotation), true);
        }
    }

    /// Sweeps `shape` from `pose` along `desired`, sliding and stepping as
    /// the controller allows. The body owning `handle` is ignored.
    pub fn move_character(
        &self,
        controller: &KinematicCharacterController,
        handle: RigidBodyHandle,
        shape: &SharedShape,
        pose: Pose,
        desired: Vec3,
    ) -> EffectiveCharacterMovement {
        let query = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            QueryFilter::default().exclude_rigid_body(handle),
        );

        controller.move_shape(
            self.integration_parameters.dt,
            &query,
            shape.as_ref(),
            &pose,
            to_vector(desired),
            |_| {},
        )
    }

    /// Distance to the first collider hit, skipping `exclude` when given.
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: Real,
        exclude: Option<RigidBodyHandle>,
    ) -> Option<Real> {
        let mut filter = QueryFilter::default();
        if let Some(handle) = exclude {
            filter = filter.exclude_rigid_body(handle);
        }
        let query = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        );

        let ray = Ray::new(to_vector(origin), to_vector(direction));
        query
            .cast_ray(&ray, max_distance, true)
            .map(|(_, distance)| distance)
    }
}
