mod cube_sampling;
mod particle_collider;
mod resource_release;
mod spatial_grid;
#[cfg(feature = "wavefront")]
mod wavefront;
