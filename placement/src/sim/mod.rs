/*!
A deterministic stand-in for a host AR runtime.

Planes are bounded polygons, ray queries go through rapier half-spaces, and screen
coordinates come from a pinhole camera. Used by the controller tests and by the
desktop viewer.
*/

pub mod camera;
pub mod plane;
pub mod query_world;
pub mod session;

pub use camera::PinholeCamera;
pub use plane::DetectedPlane;
pub use query_world::{PlaneRayHit, SurfaceQueryWorld};
pub use session::SimulatedSession;
